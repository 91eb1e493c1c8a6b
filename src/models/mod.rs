//! Request and Response models for the gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing path parameters and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{HashFieldPath, KeyPath, KeyValuePath, ScoredMemberPath};
pub use responses::{
    ErrorResponse, HashResponse, HealthResponse, IndexResponse, ListResponse, SetMembersResponse,
    SortedSetResponse, ValueResponse, VisitsResponse, WriteResponse, ENDPOINTS,
};
