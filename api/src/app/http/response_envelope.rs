//! JSON body returned for failed requests:
//! `{"success": false, "error": {"code": "...", "message": "..."}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    success: bool,
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Upper snake case, stable across releases.
    pub code: &'static str,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_shape() {
        let v = serde_json::to_value(ErrorEnvelope::new("NOT_FOUND", "no route")).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": "no route" }
            })
        );
    }

    #[test]
    fn status_is_applied() {
        let resp = ErrorEnvelope::new("BAD_REQUEST", "x").with_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
