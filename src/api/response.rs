//! Response bodies and error mapping for the HTTP adapter

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::RegistryError;
use crate::record::RecordView;

pub const WELCOME_MESSAGE: &str = "Bem-vindo à API de Usuários!";
pub const CREATED_MESSAGE: &str = "Usuário adicionado com sucesso.";
pub const MALFORMED_BODY_MESSAGE: &str = "Corpo da requisição não é um JSON válido.";

/// Body returned with `201 Created`
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    #[serde(rename = "usuario")]
    pub record: RecordView,
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn malformed_body() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MALFORMED_BODY_MESSAGE)
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let status = match &err {
            RegistryError::Rejected { .. } => StatusCode::BAD_REQUEST,
            RegistryError::Duplicate { .. } => StatusCode::CONFLICT,
            RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
            RegistryError::Config { .. } | RegistryError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.user_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
