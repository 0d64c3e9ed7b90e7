//! Outbound service clients

pub mod concept_api;

pub use concept_api::{ConceptApi, ConceptData};
