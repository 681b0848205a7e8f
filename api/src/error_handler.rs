//! Application error and its HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::app::http::response_envelope::ErrorEnvelope;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid value for {var}: {reason}")]
    InvalidConfig { var: &'static str, reason: String },

    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    /// Chat or embedding client could not be built.
    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Qdrant unreachable or collection missing.
    #[error(transparent)]
    Rag(#[from] rag_store::RagError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,
}

impl AppError {
    /// HTTP status and envelope code for this error.
    fn classify(&self) -> (StatusCode, &'static str) {
        use StatusCode as S;
        match self {
            Self::BadRequest(_) => (S::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound => (S::NOT_FOUND, "NOT_FOUND"),
            Self::Llm(_) => (S::SERVICE_UNAVAILABLE, "LLM_UNAVAILABLE"),
            Self::Rag(_) => (S::SERVICE_UNAVAILABLE, "VECTOR_STORE_UNAVAILABLE"),
            Self::InvalidConfig { .. } => (S::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::Bind { .. } => (S::INTERNAL_SERVER_ERROR, "BIND_ERROR"),
            Self::Server(_) => (S::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        ErrorEnvelope::new(code, self.to_string()).with_status(status)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_status() {
        assert_eq!(
            AppError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);

        let e = AppError::InvalidConfig {
            var: "API_ADDRESS",
            reason: "bad".into(),
        };
        assert_eq!(e.to_string(), "invalid value for API_ADDRESS: bad");
        assert_eq!(e.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_failure_is_unavailable() {
        let e = AppError::from(rag_store::RagError::Config("collection 'x' not found".into()));
        assert_eq!(e.classify(), (StatusCode::SERVICE_UNAVAILABLE, "VECTOR_STORE_UNAVAILABLE"));
    }
}
