use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Request body is malformed: missing fields, wrong types, non-integer `k`.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Two candidates share an identifier. The request is rejected.
    #[error("duplicate candidate identifier: {0}")]
    DuplicateIdentifier(String),
}
