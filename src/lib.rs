//! Stimulus Engine: trial rendering for web-based psycholinguistics
//! experiments.
//!
//! Turns author-supplied materials into randomized trial sets: items are
//! filtered and sampled, paired with sampled conditions, rendered through
//! per-experiment sentence frames with consistent person-name bindings,
//! and mixed with balanced filler trials.

pub mod core;
pub mod schema;
