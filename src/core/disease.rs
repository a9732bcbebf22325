use serde::{Deserialize, Serialize};

use crate::core::types::{DiseaseId, SymptomId};

/// A disease known to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    /// Unique identifier
    pub id: DiseaseId,

    /// Unique, non-empty display name
    pub name: String,

    /// Non-empty description
    pub description: String,

    /// Grouping label used for display and filtering, never for scoring
    pub category: String,
}

impl Disease {
    pub fn new(
        id: impl Into<DiseaseId>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
        }
    }
}

/// Association between a disease and one of its expected symptoms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiseaseSymptomLink {
    /// The linked symptom
    pub symptom_id: SymptomId,

    /// Likelihood that the symptom presents given the disease, in [0.0, 1.0]
    pub probability: f64,

    /// Informational flag; not used for scoring
    #[serde(default)]
    pub is_primary: bool,
}

impl DiseaseSymptomLink {
    pub fn new(symptom_id: impl Into<SymptomId>, probability: f64) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            probability,
            is_primary: false,
        }
    }

    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// A disease together with its symptom profile, as read from a catalog snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseRecord {
    pub disease: Disease,
    pub links: Vec<DiseaseSymptomLink>,
}

impl DiseaseRecord {
    pub fn new(disease: Disease, links: Vec<DiseaseSymptomLink>) -> Self {
        Self { disease, links }
    }

    /// Whether this disease can be scored at all
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }
}
