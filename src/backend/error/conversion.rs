//! Error Conversion
//!
//! Implements `IntoResponse` for [`ApiError`], so handlers can return
//! `Result<_, ApiError>` and propagate with `?`. Errors become a JSON body
//! of the form `{"error": <message>, "status": <code>}`.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.public_message();

        // Store failures keep their detail in the log only
        if let ApiError::Store(inner) = &self {
            tracing::error!("[API] Store failure surfaced as {}: {}", status, inner);
        } else {
            tracing::debug!("[API] Request failed with {}: {}", status, message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .expect("static fallback response")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::StoreError;

    #[test]
    fn test_validation_response_shape() {
        let response = ApiError::validation("BoardId", "must be 36 characters").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_store_response_is_bad_gateway() {
        let response = ApiError::from(StoreError::request("boom")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
