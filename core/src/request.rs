use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::{RankError, Result};

/// A candidate document as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub text: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// A validated ranking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankRequest {
    pub query: String,
    pub candidates: Vec<Candidate>,
    pub k: i64,
}

impl RankRequest {
    /// Check identifiers: each must be non-empty and unique within the request.
    pub fn validate(&self) -> Result<()> {
        validate_candidates(&self.candidates)
    }

    /// Parse an untyped JSON body of the shape
    /// `{"query": str, "candidates": [{"id": str, "text": str}], "k": int}`.
    ///
    /// `k` may also be a string holding an integer. When `k` is absent,
    /// `default_k` is used, and a missing default is an error.
    pub fn from_value(value: &Value, default_k: Option<i64>) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| invalid("request body must be a JSON object"))?;

        let query = match obj.get("query") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(invalid("`query` must be a string")),
            None => return Err(invalid("missing `query`")),
        };

        let k = match obj.get("k") {
            Some(v) => parse_k(v)?,
            None => default_k.ok_or_else(|| invalid("missing `k`"))?,
        };

        let raw = match obj.get("candidates") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(invalid("`candidates` must be an array")),
            None => return Err(invalid("missing `candidates`")),
        };
        let mut candidates = Vec::with_capacity(raw.len());
        for (i, item) in raw.iter().enumerate() {
            let id = item.get("id").and_then(Value::as_str);
            let text = item.get("text").and_then(Value::as_str);
            match (id, text) {
                (Some(id), Some(text)) => candidates.push(Candidate::new(id, text)),
                (None, _) => return Err(invalid(format!("candidate {i}: missing string `id`"))),
                (_, None) => return Err(invalid(format!("candidate {i}: missing string `text`"))),
            }
        }

        let req = RankRequest { query, candidates, k };
        req.validate()?;
        Ok(req)
    }
}

pub(crate) fn validate_candidates(candidates: &[Candidate]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        if c.id.is_empty() {
            return Err(invalid(format!("candidate {i}: empty `id`")));
        }
        if !seen.insert(c.id.as_str()) {
            return Err(RankError::DuplicateIdentifier(c.id.clone()));
        }
    }
    Ok(())
}

/// Integers outside the `i64` range saturate; `k` is clamped later anyway.
fn parse_k(v: &Value) -> Result<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .ok_or_else(|| invalid(format!("`k` must be an integer, got {n}"))),
        Value::String(s) => parse_k_str(s.trim()).ok_or_else(|| invalid(format!("`k` must be an integer, got {s:?}"))),
        other => Err(invalid(format!("`k` must be an integer, got {other}"))),
    }
}

fn parse_k_str(s: &str) -> Option<i64> {
    if let Ok(k) = s.parse::<i64>() {
        return Some(k);
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn invalid(msg: impl Into<String>) -> RankError {
    RankError::InvalidRequest(msg.into())
}
