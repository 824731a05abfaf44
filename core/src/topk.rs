use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One entry of a ranking result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: String,
    pub score: f64,
}

/// Clamp a requested count into `[0, n]`.
pub fn clamp_k(k: i64, n: usize) -> usize {
    if k <= 0 {
        0
    } else {
        usize::try_from(k).map_or(n, |k| k.min(n))
    }
}

/// Order by descending score and keep the first `k`.
///
/// The sort is stable, so equal scores keep their submission order.
pub fn select_top_k(mut scored: Vec<RankedCandidate>, k: i64) -> Vec<RankedCandidate> {
    let k = clamp_k(k, scored.len());
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(k);
    scored
}
