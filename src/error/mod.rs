use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::record::{RejectionReason, StoreError};

/// Result type used across the registry service
pub type RegistryResult<T> = Result<T, RegistryError>;

/// The unified error type for the registry service
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("[E{code:04}] {reason}", code = reason_code(.reason))]
    Rejected { reason: RejectionReason },

    #[error("[E{code:04}] Record already exists: {identifier}", code = ErrorCode::STORAGE_ALREADY_EXISTS)]
    Duplicate { identifier: String },

    #[error("[E{code:04}] Record not found: {identifier}", code = ErrorCode::STORAGE_NOT_FOUND)]
    NotFound { identifier: String },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] I/O error: {0}", code = ErrorCode::OTHER_IO)]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message, None)
    }

    /// Create a configuration error with specific code and file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a not-found error for an identifier
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.into(),
        }
    }

    /// Attach an underlying cause to a configuration error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        if let Self::Config { source: slot, .. } = &mut self {
            *slot = Some(source.into());
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Rejected { reason } => reason_code(reason),
            Self::Duplicate { .. } => ErrorCode::STORAGE_ALREADY_EXISTS,
            Self::NotFound { .. } => ErrorCode::STORAGE_NOT_FOUND,
            Self::Config { code, .. } => *code,
            Self::Io(_) => ErrorCode::OTHER_IO,
        }
    }

    /// Message suitable for returning to API callers
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { reason } => reason.to_string(),
            Self::Duplicate { .. } => "Usuário com este CPF já existe.".to_string(),
            Self::NotFound { .. } => "Usuário não encontrado.".to_string(),
            Self::Config { message, .. } => message.clone(),
            Self::Io(err) => err.to_string(),
        }
    }

    /// The validation rejection, if this is one
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Check if this is a validation rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn reason_code(reason: &RejectionReason) -> u16 {
    match reason {
        RejectionReason::MissingFields => ErrorCode::VALIDATION_REQUIRED_FIELD,
        RejectionReason::InvalidIdentifierFormat => ErrorCode::VALIDATION_PATTERN_MISMATCH,
        RejectionReason::InvalidName => ErrorCode::VALIDATION_INVALID_DATA,
        RejectionReason::InvalidBirthDate => ErrorCode::VALIDATION_INVALID_FORMAT,
    }
}

impl From<RejectionReason> for RegistryError {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateIdentifier { identifier } => Self::Duplicate { identifier },
        }
    }
}
