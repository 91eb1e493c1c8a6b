//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /` - List the available endpoints
//! - `GET /set/:key/:value`, `GET /get/:key` - Strings
//! - `GET /list/:key/push/:value`, `GET /list/:key` - Lists
//! - `GET /set/add/:key/:value`, `GET /set/view/:key` - Sets
//! - `GET /hash/:key/:field/:value`, `GET /hash/view/:key` - Hashes
//! - `GET /zset/:key/:member/:score`, `GET /zset/view/:key` - Sorted sets
//! - `GET /visits` - Page visit counter
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
