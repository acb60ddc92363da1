//! Error types for the dashboard API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use evoq_catalog::CatalogError;
use evoq_sim::SimError;
use serde::Serialize;

/// API error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Numerical failure: {0}")]
    NumericalFailure(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::NumericalFailure(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "numerical_failure")
            }
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_kind();

        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<SimError> for ApiError {
    fn from(e: SimError) -> Self {
        if e.is_numerical_failure() {
            ApiError::NumericalFailure(e.to_string())
        } else {
            ApiError::BadRequest(e.to_string())
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::UnknownMolecule(key) => {
                ApiError::NotFound(format!("Molecule '{key}' not found"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_errors_map_by_kind() {
        let bad = ApiError::from(SimError::InvalidParameter("duration".into()));
        assert!(matches!(bad, ApiError::BadRequest(_)));

        let numeric = ApiError::from(SimError::NonFiniteEnergy(f64::NAN));
        assert!(matches!(numeric, ApiError::NumericalFailure(_)));
    }

    #[test]
    fn test_unknown_molecule_is_not_found() {
        let err = ApiError::from(CatalogError::UnknownMolecule("C6H6".into()));
        assert_eq!(err.status_and_kind().0, StatusCode::NOT_FOUND);
        assert!(err.to_string().contains("C6H6"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NumericalFailure(String::new()).status_and_kind(),
            (StatusCode::UNPROCESSABLE_ENTITY, "numerical_failure")
        );
        assert_eq!(
            ApiError::Unavailable(String::new()).status_and_kind(),
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        );
    }
}
