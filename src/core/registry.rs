/// Experiment registry: the table of variant names and their factories.
use std::collections::HashMap;

use crate::core::experiment::Experiment;
use crate::core::{spray_load, swarm};

/// Constructs an experiment for the name it is registered under.
pub type ExperimentFactory = fn(&str) -> Experiment;

/// Every variant served by [`ExperimentRegistry::standard`], in
/// registration order.
pub const STANDARD_EXPERIMENTS: &[(&str, ExperimentFactory)] = &[
    ("00_comprehension_swarm-construction-meaning", swarm::construction_meaning),
    ("01_production_swarm-topicality", swarm::topicality),
    ("02_acceptability_swarm", swarm::acceptability),
    ("03_production_swarm-givenness", swarm::givenness),
    ("04_comprehension_swarm-full", swarm::full_comprehension),
    ("05_comprehension_spray-load-construction-meaning", spray_load::construction_meaning),
    ("06_production_spray-load-weight", spray_load::weight),
    (
        "07_comprehension_spray-load-construction-meaning-with-images",
        spray_load::construction_meaning_with_images,
    ),
    ("08_acceptability_swarm-withprefix", swarm::prefixed_acceptability),
    (
        "09_comprehension_swarm-full-nonalternating-control",
        swarm::nonalternating_control,
    ),
];

/// Maps experiment names to factories. Built once at startup and shared
/// read-only afterwards.
#[derive(Clone, Default)]
pub struct ExperimentRegistry {
    factories: HashMap<String, ExperimentFactory>,
}

impl ExperimentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every standard variant.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (name, factory) in STANDARD_EXPERIMENTS {
            registry.register(name, *factory);
        }
        registry
    }

    /// Register a factory, replacing any previous one under `name`.
    pub fn register(&mut self, name: &str, factory: ExperimentFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// A fresh experiment for `name`, if registered.
    pub fn create(&self, name: &str) -> Option<Experiment> {
        self.factories.get(name).map(|factory| factory(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ExperimentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
