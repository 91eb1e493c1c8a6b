//! Redis Gateway - A thin HTTP façade over a Redis server
//!
//! Maps REST-style paths onto single store commands and renders the
//! result as JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use store::Store;
