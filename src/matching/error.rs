use thiserror::Error;

use crate::catalog::provider::CatalogError;
use crate::core::types::{join_ids, SymptomId};

/// Why a prediction request was rejected
#[derive(Error, Debug)]
pub enum PredictionError {
    /// No symptom IDs were supplied
    #[error("No symptoms provided: at least one symptom ID is required")]
    EmptyInput,

    /// Some requested IDs are not in the catalog; sorted ascending, no duplicates
    #[error("Unknown symptom IDs: {}", join_ids(.0))]
    UnknownSymptoms(Vec<SymptomId>),

    /// The catalog itself failed; not a problem with the request
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl PredictionError {
    /// Whether the caller can fix this by changing the request
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::UnknownSymptoms(_))
    }
}
