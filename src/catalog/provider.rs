//! The read contract the prediction engine consumes.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::disease::DiseaseRecord;
use crate::core::symptom::Symptom;
use crate::core::types::{DiseaseId, SymptomId};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate symptom: {0}")]
    DuplicateSymptom(String),

    #[error("Duplicate disease: {0}")]
    DuplicateDisease(String),

    #[error("{entity} has an empty '{field}' field")]
    EmptyField { entity: String, field: &'static str },

    #[error(
        "Probability {probability} for symptom {symptom_id} of disease {disease_id} is outside [0, 1]"
    )]
    ProbabilityOutOfRange {
        disease_id: DiseaseId,
        symptom_id: SymptomId,
        probability: f64,
    },

    #[error("Unknown symptom ID: {0}")]
    UnknownSymptom(SymptomId),

    #[error("Unknown disease ID: {0}")]
    UnknownDisease(DiseaseId),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of symptoms, diseases and their links.
///
/// Each call must observe a consistent snapshot; the engine makes exactly one
/// call of each kind per prediction.
pub trait CatalogProvider {
    /// Return the subset of `ids` that exist, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn fetch_symptoms_by_ids(
        &self,
        ids: &BTreeSet<SymptomId>,
    ) -> Result<Vec<Symptom>, CatalogError>;

    /// Return every disease together with its symptom links
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn fetch_all_diseases_with_links(&self) -> Result<Vec<DiseaseRecord>, CatalogError>;
}
