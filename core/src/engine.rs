use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::{validate_candidates, Candidate, RankRequest};
use crate::similarity::score_all;
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use crate::topk::{select_top_k, RankedCandidate};
use crate::vector::SparseVector;
use crate::vocab::Vocabulary;
use crate::weighting::{TfIdfModel, TfScheme};

/// Knobs shared by every request a `Ranker` serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerOptions {
    pub tokenizer: TokenizerConfig,
    pub tf: TfScheme,
}

/// Ranks candidates against a query by TF-IDF cosine similarity.
///
/// Holds only immutable options. Vocabulary, weights and vectors are built
/// per call and dropped on return.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    tokenizer: Tokenizer,
    tf: TfScheme,
}

impl Ranker {
    pub fn new(options: RankerOptions) -> Self {
        Self { tokenizer: Tokenizer::new(options.tokenizer), tf: options.tf }
    }

    pub fn options(&self) -> RankerOptions {
        RankerOptions { tokenizer: self.tokenizer.config().clone(), tf: self.tf }
    }

    pub fn rank_request(&self, req: &RankRequest) -> Result<Vec<RankedCandidate>> {
        self.rank(&req.query, &req.candidates, req.k)
    }

    /// Return the top `k` candidates by similarity to `query`.
    ///
    /// `k <= 0` yields an empty result; `k` above the candidate count yields
    /// every candidate. Equal scores keep submission order.
    pub fn rank(&self, query: &str, candidates: &[Candidate], k: i64) -> Result<Vec<RankedCandidate>> {
        validate_candidates(candidates)?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut corpus: Vec<Vec<String>> = Vec::with_capacity(candidates.len() + 1);
        corpus.push(self.tokenizer.tokenize(query));
        corpus.extend(candidates.iter().map(|c| self.tokenizer.tokenize(&c.text)));

        let model = TfIdfModel::fit(Vocabulary::build(&corpus), self.tf);
        tracing::debug!(num_docs = corpus.len(), num_terms = model.vocab().len(), "fitted tf-idf model");
        if model.vocab().is_empty() {
            tracing::debug!("empty vocabulary; every candidate scores 0");
        }

        let mut vectors: Vec<SparseVector> = corpus
            .iter()
            .map(|tokens| model.weigh(tokens).l2_normalized())
            .collect();
        let candidate_vectors = vectors.split_off(1);
        let query_vector = &vectors[0];
        if query_vector.is_zero() {
            tracing::debug!("query vector is zero");
        }

        let scores = score_all(query_vector, &candidate_vectors);
        let scored = candidates
            .iter()
            .zip(scores)
            .map(|(c, score)| RankedCandidate { id: c.id.clone(), score })
            .collect();
        Ok(select_top_k(scored, k))
    }
}

/// Rank with default options.
pub fn rank(query: &str, candidates: &[Candidate], k: i64) -> Result<Vec<RankedCandidate>> {
    Ranker::default().rank(query, candidates, k)
}
