use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::application::errors::PromoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub error: &'static str,
    pub message: String,
}

/// Malformed bodies go through the same error contract as domain input errors.
impl From<JsonRejection> for PromoError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(
            rejection_status = rejection.status().as_u16(),
            reason = %rejection.body_text(),
            "http: rejected request body"
        );
        PromoError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for PromoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            PromoError::Internal(err) => {
                error!(error = ?err, "http: internal error while handling request");
                // Don't leak internal error detail to client
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            error: self.kind(),
            message,
        });

        (status, body).into_response()
    }
}
