use crate::core::disease::DiseaseSymptomLink;

/// Extra credit per matched symptom in the breadth bonus
pub const MATCH_BONUS_PER_SYMPTOM: f64 = 0.1;

/// Decimal places kept when a score leaves the engine
pub const REPORTED_SCORE_DECIMALS: i32 = 4;

/// Safely convert usize to f64 for ratio calculations
///
/// Symptom counts are tiny compared to the f64 mantissa, so the conversion is exact
/// in practice.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How a disease's score was put together
///
/// The score is a ranking signal, not a calibrated probability, and is not
/// normalized across diseases. It can exceed 1.0 when many strongly indicative
/// symptoms match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Fraction of the requested symptoms this disease explains, in (0, 1]
    pub coverage: f64,

    /// Average link probability over the matched symptoms
    pub mean_probability: f64,

    /// `1 + 0.1 * matched`
    pub match_bonus: f64,

    /// `coverage * mean_probability * match_bonus`, unrounded
    pub raw: f64,
}

impl ScoreBreakdown {
    /// Score a disease from its matched links and the number of distinct requested
    /// symptoms.
    ///
    /// Returns an all-zero breakdown when nothing matched or nothing was requested;
    /// the engine never scores such a disease.
    #[must_use]
    pub fn calculate(matched: &[DiseaseSymptomLink], requested: usize) -> Self {
        if matched.is_empty() || requested == 0 {
            return Self {
                coverage: 0.0,
                mean_probability: 0.0,
                match_bonus: 0.0,
                raw: 0.0,
            };
        }

        let matched_count = count_to_f64(matched.len());
        let coverage = matched_count / count_to_f64(requested);
        let mean_probability =
            matched.iter().map(|link| link.probability).sum::<f64>() / matched_count;
        let match_bonus = 1.0 + MATCH_BONUS_PER_SYMPTOM * matched_count;

        Self {
            coverage,
            mean_probability,
            match_bonus,
            raw: coverage * mean_probability * match_bonus,
        }
    }

    /// The score as reported to callers
    #[must_use]
    pub fn reported(&self) -> f64 {
        round_score(self.raw)
    }
}

/// Round to [`REPORTED_SCORE_DECIMALS`] places. Only applied at the output boundary;
/// ranking always compares raw scores.
#[must_use]
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(REPORTED_SCORE_DECIMALS);
    (score * factor).round() / factor
}
