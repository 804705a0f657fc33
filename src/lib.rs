//! # Person Registry
//!
//! A small record-management service: person records (CPF, name, birth date)
//! are validated, kept in memory keyed by CPF, and served over a REST API.
//!
//! ## Usage
//!
//! ```bash
//! person-registry serve [--host 0.0.0.0] [--port 3000] [--config registry.toml]
//! ```
//!
//! ## Modules
//!
//! - `record` - Record types, the validator and the in-memory store
//! - `registry` - Service composing validation and storage
//! - `api` - axum routes, error mapping and OpenAPI documentation
//! - `config` - Layered server configuration
//! - `error` - Unified error type and error codes
pub mod api;
pub mod config;
pub mod error;
pub mod record;
pub mod registry;


pub use error::{RegistryError, RegistryResult};
pub use registry::Registry;
