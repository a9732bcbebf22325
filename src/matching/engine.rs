use serde::Serialize;

use crate::catalog::provider::CatalogProvider;
use crate::core::disease::{Disease, DiseaseRecord, DiseaseSymptomLink};
use crate::core::types::{DiseaseId, SymptomId};
use crate::matching::error::PredictionError;
use crate::matching::ranking::{rank_candidates, RankedCandidate, ScoredCandidate};
use crate::matching::scoring::ScoreBreakdown;
use crate::matching::validate::{validate_symptoms, ValidatedSymptoms};

/// Number of ranked diseases returned per request, and the most ever returned
pub const DEFAULT_RESULT_LIMIT: usize = 3;

/// Configuration for the prediction engine
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    /// Maximum number of ranked diseases to return, clamped to 1..=3
    pub result_limit: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// A disease with at least one link matching the request
#[derive(Debug, Clone)]
pub struct Candidate {
    pub disease: Disease,

    /// Links whose symptom was requested, in the disease's link order
    pub matched: Vec<DiseaseSymptomLink>,
}

/// Output of the matching step
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub candidates: Vec<Candidate>,

    /// Diseases with at least one link, whether or not they matched
    pub total_diseases_checked: usize,
}

/// Intersect every linked disease's profile with the requested symptoms.
///
/// Diseases without links are skipped entirely and not counted. Diseases whose
/// links miss every requested symptom are counted but produce no candidate.
pub fn find_candidates(records: Vec<DiseaseRecord>, input: &ValidatedSymptoms) -> MatchOutcome {
    let mut total_diseases_checked = 0;
    let mut candidates = Vec::new();

    for record in records.into_iter().filter(DiseaseRecord::has_links) {
        total_diseases_checked += 1;

        let matched: Vec<DiseaseSymptomLink> = record
            .links
            .iter()
            .filter(|link| input.contains(link.symptom_id))
            .copied()
            .collect();

        if !matched.is_empty() {
            candidates.push(Candidate {
                disease: record.disease,
                matched,
            });
        }
    }

    MatchOutcome {
        candidates,
        total_diseases_checked,
    }
}

/// A requested symptom that a predicted disease explains
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedSymptom {
    pub id: SymptomId,
    pub name: String,
    pub probability: f64,
}

/// One ranked disease in a prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseasePrediction {
    pub disease_id: DiseaseId,
    pub disease_name: String,
    pub description: String,
    pub category: String,

    /// Ranking score rounded to four decimals
    pub score: f64,

    /// 1 is the best match
    pub rank: usize,

    pub matched_symptoms: Vec<MatchedSymptom>,

    /// Unrounded components of the score
    #[serde(skip)]
    pub breakdown: ScoreBreakdown,
}

impl DiseasePrediction {
    fn from_ranked(ranked: RankedCandidate, input: &ValidatedSymptoms) -> Self {
        let RankedCandidate { rank, scored } = ranked;
        let ScoredCandidate { candidate, score } = scored;

        let matched_symptoms = candidate
            .matched
            .iter()
            .filter_map(|link| {
                input.get(link.symptom_id).map(|symptom| MatchedSymptom {
                    id: symptom.id,
                    name: symptom.name.clone(),
                    probability: link.probability,
                })
            })
            .collect();

        Self {
            disease_id: candidate.disease.id,
            disease_name: candidate.disease.name,
            description: candidate.disease.description,
            category: candidate.disease.category,
            score: score.reported(),
            rank,
            matched_symptoms,
            breakdown: score,
        }
    }
}

/// Result of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// Best candidates, rank 1 first
    pub predictions: Vec<DiseasePrediction>,

    /// Diseases with at least one symptom link that were considered
    pub total_diseases_checked: usize,
}

/// The main prediction engine
pub struct PredictionEngine<'a> {
    catalog: &'a dyn CatalogProvider,
    config: PredictionConfig,
}

impl<'a> PredictionEngine<'a> {
    /// Create a new prediction engine with default configuration
    pub fn new(catalog: &'a dyn CatalogProvider) -> Self {
        Self::with_config(catalog, PredictionConfig::default())
    }

    /// Create a new prediction engine with custom configuration
    pub fn with_config(catalog: &'a dyn CatalogProvider, config: PredictionConfig) -> Self {
        Self { catalog, config }
    }

    /// Rank the catalog's diseases against the requested symptoms.
    ///
    /// Reads one snapshot of the catalog per call and holds no state between
    /// calls, so repeated calls over the same catalog give identical reports.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::EmptyInput`] before touching the catalog if no IDs
    /// are given, [`PredictionError::UnknownSymptoms`] if any ID is not in the
    /// catalog, or [`PredictionError::Catalog`] if the catalog cannot be read.
    pub fn predict(&self, requested: &[SymptomId]) -> Result<PredictionReport, PredictionError> {
        let input = validate_symptoms(self.catalog, requested)?;
        let records = self.catalog.fetch_all_diseases_with_links()?;

        let outcome = find_candidates(records, &input);

        let scored: Vec<ScoredCandidate> = outcome
            .candidates
            .into_iter()
            .map(|candidate| {
                let score = ScoreBreakdown::calculate(&candidate.matched, input.len());
                tracing::debug!(
                    disease = %candidate.disease.name,
                    matched = candidate.matched.len(),
                    requested = input.len(),
                    coverage = score.coverage,
                    mean_probability = score.mean_probability,
                    match_bonus = score.match_bonus,
                    score = score.raw,
                    "scored candidate"
                );
                ScoredCandidate { candidate, score }
            })
            .collect();
        let candidate_count = scored.len();

        let predictions: Vec<DiseasePrediction> =
            rank_candidates(scored, self.config.result_limit.clamp(1, DEFAULT_RESULT_LIMIT))
                .into_iter()
                .map(|ranked| DiseasePrediction::from_ranked(ranked, &input))
                .collect();

        tracing::info!(
            "Ranked {} of {} candidate diseases ({} checked) for {} symptoms",
            predictions.len(),
            candidate_count,
            outcome.total_diseases_checked,
            input.len()
        );

        Ok(PredictionReport {
            predictions,
            total_diseases_checked: outcome.total_diseases_checked,
        })
    }
}
