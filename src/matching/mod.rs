//! Symptom-to-disease prediction.
//!
//! This module provides the prediction pipeline:
//!
//! - [`validate`]: Checks the requested symptom IDs against the catalog
//! - [`engine`]: Finds candidate diseases and drives the pipeline ([`PredictionEngine`])
//! - [`scoring`]: Turns a disease's matched symptoms into a score
//! - [`ranking`]: Orders, truncates and ranks scored candidates
//!
//! ## Scoring
//!
//! For each disease with at least one requested symptom among its links:
//!
//! ```text
//! coverage        = matched / requested
//! meanProbability = average probability of the matched links
//! matchBonus      = 1 + 0.1 * matched
//! score           = coverage * meanProbability * matchBonus
//! ```
//!
//! Candidates are sorted by unrounded score (highest first), ties go to the lower
//! disease ID, and the top three are returned with scores rounded to four decimals.
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptom_solver::{DiseaseCatalog, PredictionEngine, SymptomId};
//!
//! let catalog = DiseaseCatalog::load_embedded().unwrap();
//! let engine = PredictionEngine::new(&catalog);
//! let report = engine.predict(&[SymptomId::new(1), SymptomId::new(2)]).unwrap();
//!
//! for p in &report.predictions {
//!     println!("#{} {} ({:.4})", p.rank, p.disease_name, p.score);
//! }
//! ```
//!
//! [`PredictionEngine`]: engine::PredictionEngine

pub mod engine;
pub mod error;
pub mod ranking;
pub mod scoring;
pub mod validate;

pub use error::PredictionError;
