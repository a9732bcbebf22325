use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use crate::catalog::provider::{CatalogError, CatalogProvider};
use crate::core::disease::{Disease, DiseaseRecord, DiseaseSymptomLink};
use crate::core::symptom::Symptom;
use crate::core::types::{DiseaseId, SymptomId};

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub symptoms: Vec<Symptom>,
    pub diseases: Vec<DiseaseEntry>,
}

/// A disease as stored on disk, with its links inlined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseEntry {
    pub id: DiseaseId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub symptoms: Vec<DiseaseSymptomLink>,
}

/// In-memory disease catalog with lookup indexes
#[derive(Debug)]
pub struct DiseaseCatalog {
    /// All symptoms, in insertion order
    symptoms: Vec<Symptom>,

    /// Index: symptom ID -> index in symptoms vec
    symptom_index: HashMap<SymptomId, usize>,

    /// All diseases with their links, in insertion order
    diseases: Vec<DiseaseRecord>,

    /// Index: disease ID -> index in diseases vec
    disease_index: HashMap<DiseaseId, usize>,

    /// Names already in use, for uniqueness checks
    symptom_names: HashSet<String>,
    disease_names: HashSet<String>,
}

impl DiseaseCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            symptoms: Vec::new(),
            symptom_index: HashMap::new(),
            diseases: Vec::new(),
            disease_index: HashMap::new(),
            symptom_names: HashSet::new(),
            disease_names: HashSet::new(),
        }
    }

    /// Load the embedded default catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON violates a catalog invariant.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/disease_catalog.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or is inconsistent.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or violates a catalog invariant.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for symptom in data.symptoms {
            catalog.add_symptom(symptom)?;
        }
        for entry in data.diseases {
            let disease_id = entry.id;
            catalog.add_disease(Disease::new(
                entry.id,
                entry.name,
                entry.description,
                entry.category,
            ))?;
            for link in entry.symptoms {
                catalog.link_symptom(disease_id, link)?;
            }
        }

        tracing::debug!(
            "Loaded catalog with {} symptoms and {} diseases",
            catalog.symptom_count(),
            catalog.disease_count()
        );

        Ok(catalog)
    }

    /// Add a symptom to the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the ID or name is already taken.
    pub fn add_symptom(&mut self, symptom: Symptom) -> Result<(), CatalogError> {
        if symptom.name.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                entity: format!("Symptom {}", symptom.id),
                field: "name",
            });
        }
        if self.symptom_index.contains_key(&symptom.id) {
            return Err(CatalogError::DuplicateSymptom(format!("id {}", symptom.id)));
        }
        if !self.symptom_names.insert(symptom.name.clone()) {
            return Err(CatalogError::DuplicateSymptom(format!("name '{}'", symptom.name)));
        }

        self.symptom_index.insert(symptom.id, self.symptoms.len());
        self.symptoms.push(symptom);
        Ok(())
    }

    /// Add a disease with no symptom links yet
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is empty or the ID or name is already taken.
    pub fn add_disease(&mut self, disease: Disease) -> Result<(), CatalogError> {
        for (field, value) in [
            ("name", &disease.name),
            ("description", &disease.description),
            ("category", &disease.category),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    entity: format!("Disease {}", disease.id),
                    field,
                });
            }
        }
        if self.disease_index.contains_key(&disease.id) {
            return Err(CatalogError::DuplicateDisease(format!("id {}", disease.id)));
        }
        if !self.disease_names.insert(disease.name.clone()) {
            return Err(CatalogError::DuplicateDisease(format!("name '{}'", disease.name)));
        }

        self.disease_index.insert(disease.id, self.diseases.len());
        self.diseases.push(DiseaseRecord::new(disease, Vec::new()));
        Ok(())
    }

    /// Link a symptom to a disease, replacing any existing link for the same pair
    ///
    /// # Errors
    ///
    /// Returns an error if the disease or symptom is unknown or the probability
    /// is outside [0, 1].
    pub fn link_symptom(
        &mut self,
        disease_id: DiseaseId,
        link: DiseaseSymptomLink,
    ) -> Result<(), CatalogError> {
        if !(0.0..=1.0).contains(&link.probability) {
            return Err(CatalogError::ProbabilityOutOfRange {
                disease_id,
                symptom_id: link.symptom_id,
                probability: link.probability,
            });
        }
        if !self.symptom_index.contains_key(&link.symptom_id) {
            return Err(CatalogError::UnknownSymptom(link.symptom_id));
        }
        let record = self.record_mut(disease_id)?;

        match record
            .links
            .iter_mut()
            .find(|existing| existing.symptom_id == link.symptom_id)
        {
            Some(existing) => *existing = link,
            None => record.links.push(link),
        }
        Ok(())
    }

    /// Remove a symptom link from a disease. Returns whether a link was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the disease is unknown.
    pub fn unlink_symptom(
        &mut self,
        disease_id: DiseaseId,
        symptom_id: SymptomId,
    ) -> Result<bool, CatalogError> {
        let record = self.record_mut(disease_id)?;
        let before = record.links.len();
        record.links.retain(|link| link.symptom_id != symptom_id);
        Ok(record.links.len() != before)
    }

    fn record_mut(&mut self, disease_id: DiseaseId) -> Result<&mut DiseaseRecord, CatalogError> {
        let idx = *self
            .disease_index
            .get(&disease_id)
            .ok_or(CatalogError::UnknownDisease(disease_id))?;
        Ok(&mut self.diseases[idx])
    }

    /// Get a symptom by ID
    pub fn symptom(&self, id: SymptomId) -> Option<&Symptom> {
        self.symptom_index.get(&id).map(|&idx| &self.symptoms[idx])
    }

    /// Find a symptom by name, ignoring case
    pub fn find_symptom_by_name(&self, name: &str) -> Option<&Symptom> {
        let wanted = name.trim().to_lowercase();
        self.symptoms
            .iter()
            .find(|s| s.name.to_lowercase() == wanted)
    }

    /// All symptoms, ordered by ID
    pub fn symptoms(&self) -> Vec<&Symptom> {
        let mut symptoms: Vec<&Symptom> = self.symptoms.iter().collect();
        symptoms.sort_by_key(|s| s.id);
        symptoms
    }

    /// Get a disease and its links by ID
    pub fn disease(&self, id: DiseaseId) -> Option<&DiseaseRecord> {
        self.disease_index.get(&id).map(|&idx| &self.diseases[idx])
    }

    /// Diseases ordered by ID, optionally restricted to one category
    pub fn diseases(&self, category: Option<&str>) -> Vec<&Disease> {
        let mut diseases: Vec<&Disease> = self
            .diseases
            .iter()
            .map(|record| &record.disease)
            .filter(|d| category.map_or(true, |c| d.category == c))
            .collect();
        diseases.sort_by_key(|d| d.id);
        diseases
    }

    /// Distinct disease categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        self.diseases
            .iter()
            .map(|record| record.disease.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// A disease's links joined with their symptoms, in link order
    pub fn disease_symptoms(&self, id: DiseaseId) -> Option<Vec<(&Symptom, DiseaseSymptomLink)>> {
        let record = self.disease(id)?;
        Some(
            record
                .links
                .iter()
                .filter_map(|link| self.symptom(link.symptom_id).map(|s| (s, *link)))
                .collect(),
        )
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            symptoms: self.symptoms.clone(),
            diseases: self
                .diseases
                .iter()
                .map(|record| DiseaseEntry {
                    id: record.disease.id,
                    name: record.disease.name.clone(),
                    description: record.disease.description.clone(),
                    category: record.disease.category.clone(),
                    symptoms: record.links.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of symptoms in catalog
    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }

    /// Number of diseases in catalog
    pub fn disease_count(&self) -> usize {
        self.diseases.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty() && self.diseases.is_empty()
    }
}

impl Default for DiseaseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for DiseaseCatalog {
    fn fetch_symptoms_by_ids(
        &self,
        ids: &BTreeSet<SymptomId>,
    ) -> Result<Vec<Symptom>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|&id| self.symptom(id).cloned())
            .collect())
    }

    fn fetch_all_diseases_with_links(&self) -> Result<Vec<DiseaseRecord>, CatalogError> {
        Ok(self.diseases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> DiseaseCatalog {
        let mut catalog = DiseaseCatalog::new();
        catalog
            .add_symptom(Symptom::new(1, "Fever").with_description("Temperature above 38°C"))
            .unwrap();
        catalog.add_symptom(Symptom::new(2, "Cough")).unwrap();
        catalog
            .add_disease(Disease::new(1, "Flu", "Influenza", "Respiratory"))
            .unwrap();
        catalog
    }

    #[test]
    fn test_symptom_descriptions_survive_export() {
        let catalog = small_catalog();
        let reloaded = DiseaseCatalog::from_json(&catalog.to_json().unwrap()).unwrap();

        let fever = reloaded.symptom(SymptomId::new(1)).unwrap();
        assert_eq!(fever.description.as_deref(), Some("Temperature above 38°C"));
        let cough = reloaded.symptom(SymptomId::new(2)).unwrap();
        assert!(cough.description.is_none());
    }

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = DiseaseCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.symptom_count(), 10);
        assert_eq!(catalog.disease_count(), 5);
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = DiseaseCatalog::load_embedded().unwrap();

        let flu = catalog.disease(DiseaseId::new(1));
        assert!(flu.is_some());
        let flu = flu.unwrap();
        assert_eq!(flu.disease.name, "Influenza");
        assert!(flu.has_links());

        assert!(catalog.disease(DiseaseId::new(999)).is_none());
        assert!(catalog.symptom(SymptomId::new(999)).is_none());
    }

    #[test]
    fn test_catalog_to_json_round_trips() {
        let catalog = DiseaseCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"symptoms\""));
        assert!(json.contains("Influenza"));

        let reloaded = DiseaseCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.symptom_count(), catalog.symptom_count());
        assert_eq!(reloaded.disease_count(), catalog.disease_count());
    }

    #[test]
    fn test_relinking_replaces_existing_link() {
        let mut catalog = small_catalog();
        let flu = DiseaseId::new(1);

        catalog
            .link_symptom(flu, DiseaseSymptomLink::new(1, 0.5))
            .unwrap();
        catalog
            .link_symptom(flu, DiseaseSymptomLink::new(1, 0.9).primary())
            .unwrap();

        let links = &catalog.disease(flu).unwrap().links;
        assert_eq!(links.len(), 1);
        assert!((links[0].probability - 0.9).abs() < 1e-12);
        assert!(links[0].is_primary);
    }

    #[test]
    fn test_link_rejects_bad_input() {
        let mut catalog = small_catalog();
        let flu = DiseaseId::new(1);

        assert!(matches!(
            catalog.link_symptom(flu, DiseaseSymptomLink::new(1, 1.5)),
            Err(CatalogError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            catalog.link_symptom(flu, DiseaseSymptomLink::new(1, f64::NAN)),
            Err(CatalogError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            catalog.link_symptom(flu, DiseaseSymptomLink::new(7, 0.5)),
            Err(CatalogError::UnknownSymptom(_))
        ));
        assert!(matches!(
            catalog.link_symptom(DiseaseId::new(9), DiseaseSymptomLink::new(1, 0.5)),
            Err(CatalogError::UnknownDisease(_))
        ));
    }

    #[test]
    fn test_unlink_symptom() {
        let mut catalog = small_catalog();
        let flu = DiseaseId::new(1);
        catalog
            .link_symptom(flu, DiseaseSymptomLink::new(2, 0.8))
            .unwrap();

        assert!(catalog.unlink_symptom(flu, SymptomId::new(2)).unwrap());
        assert!(!catalog.unlink_symptom(flu, SymptomId::new(2)).unwrap());
        assert!(!catalog.disease(flu).unwrap().has_links());
    }

    #[test]
    fn test_duplicates_and_empty_fields_rejected() {
        let mut catalog = small_catalog();

        assert!(matches!(
            catalog.add_symptom(Symptom::new(1, "Other")),
            Err(CatalogError::DuplicateSymptom(_))
        ));
        assert!(matches!(
            catalog.add_symptom(Symptom::new(3, "Fever")),
            Err(CatalogError::DuplicateSymptom(_))
        ));
        assert!(matches!(
            catalog.add_symptom(Symptom::new(3, "  ")),
            Err(CatalogError::EmptyField { field: "name", .. })
        ));
        assert!(matches!(
            catalog.add_disease(Disease::new(2, "Flu", "dup", "Respiratory")),
            Err(CatalogError::DuplicateDisease(_))
        ));
        assert!(matches!(
            catalog.add_disease(Disease::new(2, "Cold", "Common cold", "")),
            Err(CatalogError::EmptyField { field: "category", .. })
        ));
    }

    #[test]
    fn test_read_side_lookups() {
        let catalog = DiseaseCatalog::load_embedded().unwrap();

        let fever = catalog.find_symptom_by_name("fever").unwrap();
        assert_eq!(fever.id, SymptomId::new(1));
        assert!(catalog.find_symptom_by_name("sneezing").is_none());

        let respiratory = catalog.diseases(Some("Respiratory"));
        assert_eq!(respiratory.len(), 2);
        assert!(respiratory.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(catalog.diseases(None).len(), 5);

        let categories = catalog.categories();
        assert!(categories.windows(2).all(|w| w[0] < w[1]));
        assert!(categories.contains(&"Digestive"));

        let linked = catalog.disease_symptoms(DiseaseId::new(1)).unwrap();
        assert_eq!(linked.len(), 5);
        assert_eq!(linked[0].0.name, "Fever");
        assert!(linked[0].1.is_primary);
    }

    #[test]
    fn test_fetch_symptoms_by_ids_returns_existing_subset() {
        let catalog = small_catalog();
        let ids: BTreeSet<SymptomId> = [2, 1, 999].into_iter().map(SymptomId::new).collect();

        let found = catalog.fetch_symptoms_by_ids(&ids).unwrap();
        let found_ids: Vec<u32> = found.iter().map(|s| s.id.0).collect();
        assert_eq!(found_ids, vec![1, 2]);
    }

    #[test]
    fn test_from_json_rejects_link_to_unknown_symptom() {
        let json = r#"{
            "version": "1.0.0",
            "created_at": "2025-01-01T00:00:00+00:00",
            "symptoms": [{"id": 1, "name": "Fever"}],
            "diseases": [{"id": 1, "name": "Flu", "description": "d", "category": "c",
                          "symptoms": [{"symptom_id": 2, "probability": 0.5}]}]
        }"#;
        assert!(matches!(
            DiseaseCatalog::from_json(json),
            Err(CatalogError::UnknownSymptom(_))
        ));
    }
}
