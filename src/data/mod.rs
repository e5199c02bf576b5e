//! Model artefact acquisition.

pub mod hub;
