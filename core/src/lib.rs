//! Lexical ranking of candidate documents against a query.
//!
//! Every call to [`Ranker::rank`] tokenizes the query and candidates, fits a
//! smoothed TF-IDF model over exactly those documents, projects them into
//! L2-normalized sparse vectors and returns the top `k` candidates by cosine
//! similarity. Nothing is cached between calls.

pub mod engine;
pub mod error;
pub mod request;
pub mod similarity;
pub mod tokenizer;
pub mod topk;
pub mod vector;
pub mod vocab;
pub mod weighting;

pub type TermId = u32;

pub use engine::{rank, Ranker, RankerOptions};
pub use error::{RankError, Result};
pub use request::{Candidate, RankRequest};
pub use tokenizer::TokenizerConfig;
pub use topk::RankedCandidate;
pub use weighting::TfScheme;
