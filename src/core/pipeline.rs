/// The rendering pipeline: request → materials → trial set.
///
/// Resolves the experiment variant, loads its two materials pools, renders
/// experimental and filler trials, and assembles the shuffled trial set.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::core::error::RenderError;
use crate::core::experiment::Experiment;
use crate::core::names::{NameCorpus, NameError};
use crate::core::registry::ExperimentRegistry;
use crate::core::store::{parse_materials_ids, validate_id, MaterialsStore, StoreError};
use crate::schema::materials::MaterialsBundle;
use crate::schema::trial::TrialSet;

/// Query parameter carrying the materials identifiers.
pub const MATERIALS_PARAM: &str = "materials";

/// Number of materials sets a request names: experimental, then fillers.
pub const MATERIALS_PER_REQUEST: usize = 2;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("name corpus error: {0}")]
    Names(#[from] NameError),
    #[error("unknown experiment '{0}'")]
    UnknownVariant(String),
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),
    #[error("expected {expected} materials identifiers, got {found}")]
    MaterialsCount { expected: usize, found: usize },
}

/// Arguments of a trial set request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrialRequest {
    /// `"<experimental id>,<filler id>"`
    pub materials: Option<String>,
}

impl TrialRequest {
    pub fn new(materials: &str) -> Self {
        Self {
            materials: Some(materials.to_string()),
        }
    }

    /// The experimental and filler materials identifiers, in that order.
    pub fn materials_ids(&self) -> Result<Vec<String>, PipelineError> {
        let param = self
            .materials
            .as_deref()
            .ok_or_else(|| PipelineError::MissingParameter(MATERIALS_PARAM.to_string()))?;
        let ids = parse_materials_ids(param);
        if ids.is_empty() {
            return Err(PipelineError::MissingParameter(MATERIALS_PARAM.to_string()));
        }
        if ids.len() != MATERIALS_PER_REQUEST {
            return Err(PipelineError::MaterialsCount {
                expected: MATERIALS_PER_REQUEST,
                found: ids.len(),
            });
        }
        Ok(ids)
    }
}

/// Renders trial sets. Built via `StimulusEngine::builder()`.
///
/// Rendering takes `&mut self`; share the registry and name corpus (they
/// sit behind `Arc`) and build one engine per concurrent caller.
pub struct StimulusEngine {
    registry: Arc<ExperimentRegistry>,
    names: Arc<NameCorpus>,
    seed: Option<u64>,
    render_count: u64,
}

/// Builder for constructing a `StimulusEngine`.
#[derive(Default)]
pub struct StimulusEngineBuilder {
    registry: Option<Arc<ExperimentRegistry>>,
    names: Option<Arc<NameCorpus>>,
    names_path: Option<String>,
    seed: Option<u64>,
}

impl StimulusEngine {
    pub fn builder() -> StimulusEngineBuilder {
        StimulusEngineBuilder::default()
    }

    pub fn registry(&self) -> &ExperimentRegistry {
        &self.registry
    }

    pub fn names(&self) -> &NameCorpus {
        &self.names
    }

    /// How many trial sets this engine has rendered.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Render a trial set for a registered experiment from in-memory
    /// materials.
    pub fn get_trials(
        &mut self,
        experiment: &str,
        materials: &MaterialsBundle,
        materials_id: &str,
    ) -> Result<TrialSet, PipelineError> {
        let experiment = self.experiment(experiment)?;
        self.render(&experiment, materials, materials_id)
    }

    /// Render a trial set for an experiment that need not be registered,
    /// e.g. one with pilot trial counts.
    pub fn render(
        &mut self,
        experiment: &Experiment,
        materials: &MaterialsBundle,
        materials_id: &str,
    ) -> Result<TrialSet, PipelineError> {
        let mut rng = self.next_rng();
        Ok(assemble_trial_set(
            experiment,
            materials,
            materials_id,
            &self.names,
            &mut rng,
        )?)
    }

    /// Resolve a request against a materials store and render it.
    ///
    /// Checks run in request order: the experiment name, the `materials`
    /// parameter, each identifier, then the files themselves.
    pub fn get_trials_from_store(
        &mut self,
        experiment: &str,
        store: &MaterialsStore,
        request: &TrialRequest,
    ) -> Result<TrialSet, PipelineError> {
        let experiment = self.experiment(experiment)?;
        let ids = request.materials_ids()?;
        for id in &ids {
            validate_id(id)?;
        }
        let bundle = MaterialsBundle {
            experimental: store.load(&ids[0])?,
            fillers: store.load(&ids[1])?,
        };
        self.render(&experiment, &bundle, &ids.join(","))
    }

    fn experiment(&self, name: &str) -> Result<Experiment, PipelineError> {
        self.registry
            .create(name)
            .ok_or_else(|| PipelineError::UnknownVariant(name.to_string()))
    }

    fn next_rng(&mut self) -> StdRng {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.render_count)),
            None => StdRng::from_entropy(),
        };
        self.render_count += 1;
        rng
    }
}

impl StimulusEngineBuilder {
    /// Share an existing registry.
    pub fn registry(mut self, registry: Arc<ExperimentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_registry(self, registry: ExperimentRegistry) -> Self {
        self.registry(Arc::new(registry))
    }

    /// Share an existing name corpus.
    pub fn names(mut self, names: Arc<NameCorpus>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_names(self, names: NameCorpus) -> Self {
        self.names(Arc::new(names))
    }

    /// Load the name corpus from a RON file at build time.
    pub fn names_file(mut self, path: &str) -> Self {
        self.names_path = Some(path.to_string());
        self
    }

    /// Make rendering reproducible: render `n` uses `seed + n`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<StimulusEngine, PipelineError> {
        let names = match (self.names, self.names_path) {
            (Some(names), _) => names,
            (None, Some(path)) => Arc::new(NameCorpus::load_from_ron(Path::new(&path))?),
            (None, None) => Arc::new(NameCorpus::builtin()),
        };
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ExperimentRegistry::standard()));

        Ok(StimulusEngine {
            registry,
            names,
            seed: self.seed,
            render_count: 0,
        })
    }
}

/// Render experimental and filler trials and combine them into one
/// shuffled trial set.
///
/// When the experiment names a lead measure, the first experimental trial
/// with that measure (after shuffling) is moved to the front.
pub fn assemble_trial_set(
    experiment: &Experiment,
    materials: &MaterialsBundle,
    materials_id: &str,
    names: &NameCorpus,
    rng: &mut StdRng,
) -> Result<TrialSet, RenderError> {
    let mut trials = experiment.build_experimental_trials(&materials.experimental, names, rng)?;
    let experimental = trials.len();

    let fillers =
        experiment
            .fillers
            .build_fillers(&materials.fillers, experiment.filler_trials(), names, rng)?;
    let filler_count = fillers.len();
    trials.extend(fillers);
    trials.shuffle(rng);

    if let Some(measure) = experiment.lead_measure {
        let lead = trials
            .iter()
            .position(|t| !t.is_filler() && t.presentation.measure == Some(measure));
        if let Some(index) = lead {
            let trial = trials.remove(index);
            trials.insert(0, trial);
        }
    }

    info!(
        experiment = %experiment.name,
        materials_id,
        experimental,
        fillers = filler_count,
        "rendered trial set"
    );

    Ok(TrialSet {
        experiment: experiment.name.clone(),
        materials_id: materials_id.to_string(),
        trials,
    })
}
