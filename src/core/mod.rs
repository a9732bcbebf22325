//! Core data types for symptom-based disease ranking.
//!
//! - [`Symptom`]: A symptom a patient can report
//! - [`Disease`]: A disease with its display metadata
//! - [`DiseaseSymptomLink`]: How strongly a symptom indicates a disease
//! - [`DiseaseRecord`]: A disease together with all of its links
//! - [`SymptomId`], [`DiseaseId`]: Catalog identifiers
//!
//! All of these are owned by the catalog; the prediction engine only reads them.
//!
//! [`Symptom`]: symptom::Symptom
//! [`Disease`]: disease::Disease
//! [`DiseaseSymptomLink`]: disease::DiseaseSymptomLink
//! [`DiseaseRecord`]: disease::DiseaseRecord
//! [`SymptomId`]: types::SymptomId
//! [`DiseaseId`]: types::DiseaseId

pub mod disease;
pub mod symptom;
pub mod types;
