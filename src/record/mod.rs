//! Person records: types, validation and storage
//!
//! A record enters the system only through [`validate`], and the store only
//! ever holds validated records.

pub mod store;
pub mod types;
pub mod validation;

pub use store::{MemoryRecordStore, RecordStore, StoreError, StoreResult};
pub use types::{Record, RecordInput, RecordView};
pub use validation::{is_valid_identifier, parse_birth_date, validate, RejectionReason};
