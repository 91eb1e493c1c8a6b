//! Request DTOs for the gateway API
//!
//! Every operation is addressed entirely by its URL, so requests are the
//! path segments deserialized into typed tuples.

use serde::Deserialize;

use crate::error::ApiError;

/// Path of `/get/:key`, `/list/:key` and the `view` routes.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyPath {
    pub key: String,
}

/// Path of `/set/:key/:value`, `/list/:key/push/:value` and `/set/add/:key/:value`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyValuePath {
    pub key: String,
    pub value: String,
}

/// Path of `/hash/:key/:field/:value`.
#[derive(Debug, Clone, Deserialize)]
pub struct HashFieldPath {
    pub key: String,
    pub field: String,
    pub value: String,
}

/// Path of `/zset/:key/:member/:score`.
///
/// The score arrives as raw text so a malformed score yields the gateway's
/// own JSON error instead of the extractor's plain-text rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredMemberPath {
    pub key: String,
    pub member: String,
    pub score: String,
}

impl ScoredMemberPath {
    /// Parses the score segment as an integer.
    pub fn parse_score(&self) -> Result<i64, ApiError> {
        self.score.parse::<i64>().map_err(|_| {
            ApiError::InvalidRequest(format!("Score '{}' is not an integer", self.score))
        })
    }
}
