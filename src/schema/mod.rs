//! Data types shared by the renderer and its callers: materials in,
//! trials out.

pub mod condition;
pub mod materials;
pub mod trial;
