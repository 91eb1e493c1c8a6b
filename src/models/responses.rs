//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::ScoredMember;

/// Route templates advertised by the index endpoint.
pub const ENDPOINTS: &[&str] = &[
    "/set/<key>/<value>",
    "/get/<key>",
    "/list/<key>/push/<value>",
    "/list/<key>",
    "/set/add/<key>/<value>",
    "/set/view/<key>",
    "/hash/<key>/<field>/<value>",
    "/hash/view/<key>",
    "/zset/<key>/<member>/<int:score>",
    "/zset/view/<key>",
    "/visits",
];

const SUCCESS: &str = "success";

/// Response body for the index (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Vec<String>,
}

impl IndexResponse {
    pub fn new() -> Self {
        Self {
            message: "Welcome to the Redis HTTP gateway!".to_string(),
            endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Default for IndexResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for every write route
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    /// Always "success"
    pub status: &'static str,
    /// Human-readable summary of the write
    pub message: String,
}

impl WriteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
        }
    }
}

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
pub struct ValueResponse {
    pub status: &'static str,
    pub key: String,
    pub value: String,
}

impl ValueResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for GET /list/:key
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub status: &'static str,
    pub key: String,
    /// Elements from head to tail
    pub values: Vec<String>,
}

impl ListResponse {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            status: SUCCESS,
            key: key.into(),
            values,
        }
    }
}

/// Response body for GET /set/view/:key
#[derive(Debug, Clone, Serialize)]
pub struct SetMembersResponse {
    pub status: &'static str,
    pub key: String,
    pub members: Vec<String>,
}

impl SetMembersResponse {
    pub fn new(key: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            status: SUCCESS,
            key: key.into(),
            members,
        }
    }
}

/// Response body for GET /hash/view/:key
#[derive(Debug, Clone, Serialize)]
pub struct HashResponse {
    pub status: &'static str,
    pub key: String,
    pub fields: BTreeMap<String, String>,
}

impl HashResponse {
    pub fn new(key: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            status: SUCCESS,
            key: key.into(),
            fields,
        }
    }
}

/// Response body for GET /zset/view/:key
#[derive(Debug, Clone, Serialize)]
pub struct SortedSetResponse {
    pub status: &'static str,
    pub key: String,
    /// Members in ascending score order
    pub members: Vec<ScoredMember>,
}

impl SortedSetResponse {
    pub fn new(key: impl Into<String>, members: Vec<ScoredMember>) -> Self {
        Self {
            status: SUCCESS,
            key: key.into(),
            members,
        }
    }
}

/// Response body for GET /visits
#[derive(Debug, Clone, Serialize)]
pub struct VisitsResponse {
    pub message: String,
    pub total_visits: i64,
}

impl VisitsResponse {
    pub fn new(total_visits: i64) -> Self {
        Self {
            message: "Page visit counter".to_string(),
            total_visits,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the store answered, "degraded" otherwise
    pub status: String,
    /// "up" or "down"
    pub store: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Builds a health report from the outcome of a store ping.
    pub fn from_ping(store_up: bool) -> Self {
        let (status, store) = if store_up {
            ("healthy", "up")
        } else {
            ("degraded", "down")
        };
        Self {
            status: status.to_string(),
            store: store.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// "error", or "empty" for missing collections
    pub status: String,
    /// Error message describing what went wrong
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value<T: Serialize>(resp: &T) -> Value {
        serde_json::to_value(resp).unwrap()
    }

    #[test]
    fn test_index_lists_every_route() {
        let resp = IndexResponse::new();
        assert_eq!(resp.endpoints.len(), ENDPOINTS.len());
        assert!(resp.endpoints.iter().any(|e| e == "/visits"));
    }

    #[test]
    fn test_write_response_serialize() {
        let value = to_value(&WriteResponse::new("Stored a = 1 in Redis"));
        assert_eq!(value, json!({"status": "success", "message": "Stored a = 1 in Redis"}));
    }

    #[test]
    fn test_value_response_serialize() {
        let value = to_value(&ValueResponse::new("a", "1"));
        assert_eq!(value, json!({"status": "success", "key": "a", "value": "1"}));
    }

    #[test]
    fn test_sorted_set_response_serialize() {
        let members = vec![ScoredMember::new("p", 5.0)];
        let value = to_value(&SortedSetResponse::new("board", members));
        assert_eq!(value["members"][0]["member"], "p");
        assert_eq!(value["members"][0]["score"].as_f64(), Some(5.0));
    }

    #[test]
    fn test_visits_response_serialize() {
        let value = to_value(&VisitsResponse::new(3));
        assert_eq!(value, json!({"message": "Page visit counter", "total_visits": 3}));
    }

    #[test]
    fn test_health_response_serialize() {
        let value = to_value(&HealthResponse::from_ping(false));
        assert_eq!(value["status"], "degraded");
        assert_eq!(value["store"], "down");
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_error_response_serialize() {
        let value = to_value(&ErrorResponse::new("empty", "List l is empty or does not exist"));
        assert_eq!(value["status"], "empty");
        assert_eq!(value["message"], "List l is empty or does not exist");
    }
}
