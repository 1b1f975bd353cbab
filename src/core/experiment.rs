/// Experiment variants: composition of an experimental trial builder, a
/// filler builder, and the variant's trial counts.
use rand::rngs::StdRng;
use tracing::debug;

use crate::core::error::RenderError;
use crate::core::fields::FieldProcessor;
use crate::core::names::NameCorpus;
use crate::core::sampling::{filter_items, sample_conditions, sample_items};
use crate::schema::condition::Condition;
use crate::schema::materials::{Item, MaterialsSet};
use crate::schema::trial::{Measure, Trial};

/// Builds one experimental trial from an item and its condition.
pub trait ExperimentalBuilder: Send + Sync {
    /// Fields an item must have filled to be sampled.
    fn required_fields(&self) -> &[&'static str];

    /// Fields an item must carry but that may be `false` or empty.
    fn flag_fields(&self) -> &[&'static str] {
        &[]
    }

    /// Valid conditions. A condition listed twice is drawn twice as often.
    fn condition_space(&self) -> &[Condition];

    /// Render the trial. `fields` is fresh for this trial.
    fn build_trial(
        &self,
        item: &Item,
        condition: &Condition,
        materials_id: &str,
        fields: &mut FieldProcessor<'_>,
    ) -> Result<Trial, RenderError>;
}

/// Draws and formats filler trials from a filler pool.
pub trait FillerBuilder: Send + Sync {
    fn build_fillers(
        &self,
        materials: &MaterialsSet,
        count: usize,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<Vec<Trial>, RenderError>;
}

/// A registered experiment variant.
pub struct Experiment {
    pub name: String,
    pub total_trials: usize,
    pub experimental_trials: usize,
    pub experimental: Box<dyn ExperimentalBuilder>,
    pub fillers: Box<dyn FillerBuilder>,
    /// If set, the assembled trial set starts with a trial using this
    /// measure whenever one exists.
    pub lead_measure: Option<Measure>,
}

impl Experiment {
    pub fn new(
        name: &str,
        total_trials: usize,
        experimental_trials: usize,
        experimental: Box<dyn ExperimentalBuilder>,
        fillers: Box<dyn FillerBuilder>,
    ) -> Self {
        Self {
            name: name.to_string(),
            total_trials,
            experimental_trials,
            experimental,
            fillers,
            lead_measure: None,
        }
    }

    pub fn with_lead_measure(mut self, measure: Measure) -> Self {
        self.lead_measure = Some(measure);
        self
    }

    /// Override the trial counts, e.g. for pilots with small pools.
    pub fn with_trial_counts(mut self, total: usize, experimental: usize) -> Self {
        self.total_trials = total;
        self.experimental_trials = experimental;
        self
    }

    pub fn filler_trials(&self) -> usize {
        self.total_trials.saturating_sub(self.experimental_trials)
    }

    /// Filter and sample items, pair each with a sampled condition, and
    /// render one trial per pair.
    pub fn build_experimental_trials(
        &self,
        materials: &MaterialsSet,
        corpus: &NameCorpus,
        rng: &mut StdRng,
    ) -> Result<Vec<Trial>, RenderError> {
        let usable = filter_items(
            &materials.items,
            self.experimental.required_fields(),
            self.experimental.flag_fields(),
        );
        debug!(
            experiment = %self.name,
            materials = %materials.name,
            total = materials.items.len(),
            usable = usable.len(),
            "filtered materials"
        );

        let items = sample_items(&usable, self.experimental_trials, &materials.name, rng)?;
        let conditions =
            sample_conditions(self.experimental.condition_space(), items.len(), rng)?;

        let mut trials = Vec::with_capacity(items.len());
        for (item, condition) in items.into_iter().zip(conditions.iter()) {
            let mut fields = FieldProcessor::new(corpus, rng);
            trials.push(
                self.experimental
                    .build_trial(item, condition, &materials.name, &mut fields)?,
            );
        }
        Ok(trials)
    }
}

impl std::fmt::Debug for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Experiment")
            .field("name", &self.name)
            .field("total_trials", &self.total_trials)
            .field("experimental_trials", &self.experimental_trials)
            .field("lead_measure", &self.lead_measure)
            .finish_non_exhaustive()
    }
}
