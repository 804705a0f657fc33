//! HTTP adapter over the registry
//!
//! Routes:
//! - `GET /` welcome message
//! - `POST /usuario` create a record
//! - `GET /usuario/{cpf}` read one record
//! - `GET /usuarios` read all records
//! - `GET /api-docs`, `GET /api-docs/openapi.json` API documentation

pub mod handlers;
pub mod openapi;
pub mod response;
pub mod server;

pub use server::{ApiServer, ApiState};
