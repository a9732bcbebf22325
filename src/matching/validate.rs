use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::provider::CatalogProvider;
use crate::core::symptom::Symptom;
use crate::core::types::SymptomId;
use crate::matching::error::PredictionError;

/// The deduplicated set of requested symptoms, all known to the catalog
#[derive(Debug, Clone)]
pub struct ValidatedSymptoms {
    symptoms: BTreeMap<SymptomId, Symptom>,
}

impl ValidatedSymptoms {
    /// Number of distinct requested symptoms
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    /// Always false for a validated set
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn contains(&self, id: SymptomId) -> bool {
        self.symptoms.contains_key(&id)
    }

    pub fn get(&self, id: SymptomId) -> Option<&Symptom> {
        self.symptoms.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = SymptomId> + '_ {
        self.symptoms.keys().copied()
    }
}

/// Check requested symptom IDs against the catalog.
///
/// Empty input is rejected before the catalog is touched. Any ID missing from the
/// catalog rejects the whole request.
///
/// # Errors
///
/// Returns [`PredictionError::EmptyInput`], [`PredictionError::UnknownSymptoms`]
/// listing every missing ID, or [`PredictionError::Catalog`] if the lookup fails.
pub fn validate_symptoms(
    catalog: &dyn CatalogProvider,
    requested: &[SymptomId],
) -> Result<ValidatedSymptoms, PredictionError> {
    if requested.is_empty() {
        return Err(PredictionError::EmptyInput);
    }

    let wanted: BTreeSet<SymptomId> = requested.iter().copied().collect();
    let symptoms: BTreeMap<SymptomId, Symptom> = catalog
        .fetch_symptoms_by_ids(&wanted)?
        .into_iter()
        .filter(|s| wanted.contains(&s.id))
        .map(|s| (s.id, s))
        .collect();

    let unknown: Vec<SymptomId> = wanted
        .iter()
        .filter(|id| !symptoms.contains_key(id))
        .copied()
        .collect();
    if !unknown.is_empty() {
        return Err(PredictionError::UnknownSymptoms(unknown));
    }

    Ok(ValidatedSymptoms { symptoms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::DiseaseCatalog;

    fn catalog() -> DiseaseCatalog {
        let mut catalog = DiseaseCatalog::new();
        for (id, name) in [(1, "Fever"), (2, "Cough"), (3, "Rash")] {
            catalog.add_symptom(Symptom::new(id, name)).unwrap();
        }
        catalog
    }

    fn ids(raw: &[u32]) -> Vec<SymptomId> {
        raw.iter().copied().map(SymptomId::new).collect()
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = validate_symptoms(&catalog(), &[]);
        assert!(matches!(result, Err(PredictionError::EmptyInput)));
    }

    #[test]
    fn test_duplicates_collapse() {
        let validated = validate_symptoms(&catalog(), &ids(&[2, 1, 2, 1])).unwrap();
        assert_eq!(validated.len(), 2);
        assert_eq!(validated.ids().collect::<Vec<_>>(), ids(&[1, 2]));
        assert_eq!(validated.get(SymptomId::new(2)).unwrap().name, "Cough");
    }

    #[test]
    fn test_unknown_ids_listed_exactly() {
        match validate_symptoms(&catalog(), &ids(&[1, 999, 5, 999])) {
            Err(PredictionError::UnknownSymptoms(unknown)) => {
                assert_eq!(unknown, ids(&[5, 999]));
            }
            other => panic!("expected UnknownSymptoms, got {other:?}"),
        }
    }
}
