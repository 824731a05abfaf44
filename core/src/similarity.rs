use crate::vector::SparseVector;

/// Cosine similarity of two L2-normalized, non-negative vectors.
///
/// A zero vector on either side scores 0.0. The result is clamped into
/// `[0, 1]` so rounding never pushes an identical pair above 1.
pub fn cosine(query: &SparseVector, candidate: &SparseVector) -> f64 {
    if query.is_zero() || candidate.is_zero() {
        return 0.0;
    }
    let score = query.dot(candidate);
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Score every candidate against the query, preserving candidate order.
pub fn score_all(query: &SparseVector, candidates: &[SparseVector]) -> Vec<f64> {
    candidates.iter().map(|c| cosine(query, c)).collect()
}
