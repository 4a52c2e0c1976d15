//! Core data types shared by the readers and the merge engine.

pub mod record;
pub mod types;
