use std::cmp::Ordering;

use crate::matching::engine::Candidate;
use crate::matching::scoring::ScoreBreakdown;

/// A candidate disease together with its score
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: ScoreBreakdown,
}

/// A scored candidate that made the cut, with its 1-based rank
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub rank: usize,
    pub scored: ScoredCandidate,
}

/// Ordering used for ranking: higher raw score first, then lower disease ID.
///
/// Raw scores are compared with `total_cmp`, so the order is total even for
/// pathological inputs and never depends on catalog iteration order.
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .raw
        .total_cmp(&a.score.raw)
        .then_with(|| a.candidate.disease.id.cmp(&b.candidate.disease.id))
}

/// Sort, truncate to `limit` and assign ranks 1..=N
pub fn rank_candidates(mut scored: Vec<ScoredCandidate>, limit: usize) -> Vec<RankedCandidate> {
    scored.sort_by(compare_candidates);
    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, scored)| RankedCandidate { rank: i + 1, scored })
        .collect()
}
