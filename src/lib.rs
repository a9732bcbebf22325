//! # symptom-solver
//!
//! A library for ranking likely diseases from a set of observed symptoms.
//!
//! Every disease in a catalog carries an expected-symptom profile: a list of
//! symptoms, each with the probability that it presents given the disease.
//! `symptom-solver` scores each disease by how well that profile overlaps the
//! symptoms a user reports and returns the best three candidates.
//!
//! ## Features
//!
//! - **Deterministic ranking**: Same input and catalog, same ordered output
//! - **Strict validation**: Unknown symptom IDs reject the whole request
//! - **Pluggable catalog**: The engine reads through the [`CatalogProvider`] trait
//! - **CLI and JSON API**: Predict and browse the catalog from a shell or over HTTP
//!
//! The score is a ranking signal, not a calibrated probability.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::{DiseaseCatalog, PredictionEngine, SymptomId};
//!
//! // Load the embedded sample catalog
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//!
//! // Rank diseases for fever and cough
//! let engine = PredictionEngine::new(&catalog);
//! let report = engine.predict(&[SymptomId::new(1), SymptomId::new(2)]).unwrap();
//!
//! for p in &report.predictions {
//!     println!("#{} {}: {:.4}", p.rank, p.disease_name, p.score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog contract and the in-memory JSON-backed store
//! - [`core`]: Symptom, disease and link types
//! - [`matching`]: Validation, matching, scoring and ranking
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON web API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::catalog::provider::{CatalogError, CatalogProvider};
pub use crate::catalog::store::DiseaseCatalog;
pub use crate::core::disease::{Disease, DiseaseRecord, DiseaseSymptomLink};
pub use crate::core::symptom::Symptom;
pub use crate::core::types::{DiseaseId, SymptomId};
pub use crate::matching::engine::{
    DiseasePrediction, MatchedSymptom, PredictionConfig, PredictionEngine, PredictionReport,
};
pub use crate::matching::PredictionError;
