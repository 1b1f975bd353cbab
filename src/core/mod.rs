//! Rendering core: name binding, field processing, sampling, and the
//! per-experiment trial builders.

pub mod bindings;
pub mod error;
pub mod experiment;
pub mod fields;
pub mod fillers;
pub mod names;
pub mod phrase;
pub mod pipeline;
pub mod registry;
pub mod sampling;
pub mod spray_load;
pub mod store;
pub mod swarm;
