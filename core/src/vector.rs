use crate::TermId;

/// Weighted term vector holding only non-zero components, sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    /// Entries need not be sorted; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(tid, _)| tid);
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f64)] { &self.entries }

    pub fn get(&self, tid: TermId) -> f64 {
        match self.entries.binary_search_by_key(&tid, |&(t, _)| t) {
            Ok(i) => self.entries[i].1,
            Err(_) => 0.0,
        }
    }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean length. A zero vector stays zero.
    pub fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return Self::default();
        }
        for (_, w) in self.entries.iter_mut() {
            *w /= norm;
        }
        self
    }

    /// Merge-join over the two sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_unit_length() {
        let v = SparseVector::from_entries(vec![(1, 3.0), (0, 4.0)]).l2_normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.8).abs() < 1e-12);
        assert!((v.get(1) - 0.6).abs() < 1e-12);
        assert_eq!(v.get(7), 0.0);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let v = SparseVector::from_entries(vec![(2, 0.0)]).l2_normalized();
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn dot_only_counts_shared_terms() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 2.0), (5, 1.0)]);
        let b = SparseVector::from_entries(vec![(2, 3.0), (4, 9.0), (5, 0.5)]);
        assert_eq!(a.dot(&b), 6.5);
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }
}
