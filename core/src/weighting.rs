use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::vector::SparseVector;
use crate::vocab::Vocabulary;
use crate::TermId;

/// How raw term counts become term frequencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfScheme {
    /// `tf = count`
    #[default]
    Raw,
    /// `tf = 1 + ln(count)`
    Sublinear,
}

impl TfScheme {
    pub fn tf(self, count: u32) -> f64 {
        if count == 0 {
            return 0.0;
        }
        match self {
            TfScheme::Raw => count as f64,
            TfScheme::Sublinear => 1.0 + (count as f64).ln(),
        }
    }
}

/// Smoothed inverse document frequency: `ln((1 + n) / (1 + df)) + 1`.
///
/// Strictly positive for every `df <= n`.
pub fn smoothed_idf(num_docs: u32, df: u32) -> f64 {
    ((1.0 + num_docs as f64) / (1.0 + df as f64)).ln() + 1.0
}

/// TF-IDF weights fitted on a single corpus.
pub struct TfIdfModel {
    vocab: Vocabulary,
    idf: Vec<f64>,
    scheme: TfScheme,
}

impl TfIdfModel {
    pub fn fit(vocab: Vocabulary, scheme: TfScheme) -> Self {
        let n = vocab.num_docs();
        let idf = (0..vocab.len() as TermId).map(|tid| smoothed_idf(n, vocab.df(tid))).collect();
        Self { vocab, idf, scheme }
    }

    pub fn vocab(&self) -> &Vocabulary { &self.vocab }

    pub fn idf(&self, tid: TermId) -> Option<f64> { self.idf.get(tid as usize).copied() }

    /// Raw (unnormalized) weight row of one document. Terms unknown to the
    /// vocabulary contribute nothing.
    pub fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for term in tokens {
            if let Some(tid) = self.vocab.get(term) {
                *counts.entry(tid).or_insert(0) += 1;
            }
        }
        let entries = counts
            .into_iter()
            .map(|(tid, count)| (tid, self.scheme.tf(count) * self.idf[tid as usize]))
            .collect();
        SparseVector::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> { s.split_whitespace().map(str::to_string).collect() }

    #[test]
    fn idf_is_one_when_term_is_everywhere() {
        assert!((smoothed_idf(4, 4) - 1.0).abs() < 1e-12);
        assert!(smoothed_idf(4, 1) > smoothed_idf(4, 2));
    }

    #[test]
    fn weight_is_count_times_idf() {
        let docs = vec![toks("rust rust go"), toks("go")];
        let model = TfIdfModel::fit(Vocabulary::build(&docs), TfScheme::Raw);
        let rust = model.vocab().get("rust").unwrap();
        let go = model.vocab().get("go").unwrap();
        let row = model.weigh(&docs[0]);
        assert!((row.get(rust) - 2.0 * smoothed_idf(2, 1)).abs() < 1e-12);
        assert!((row.get(go) - 1.0).abs() < 1e-12);
        assert_eq!(model.weigh(&docs[1]).get(rust), 0.0);
    }

    #[test]
    fn sublinear_tf_dampens_repeats() {
        assert_eq!(TfScheme::Sublinear.tf(1), 1.0);
        assert!(TfScheme::Sublinear.tf(10) < TfScheme::Raw.tf(10));
        assert_eq!(TfScheme::Sublinear.tf(0), 0.0);
    }
}
