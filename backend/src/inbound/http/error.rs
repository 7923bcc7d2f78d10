//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns: domain and port failures
//! convert into [`ApiError`], which renders the JSON envelope and status
//! code. Internal errors are redacted before they reach the client.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::{
    AppointmentPersistenceError, DiagnosisPersistenceError, PatientPersistenceError,
    PrescriptionPersistenceError, UserPersistenceError, VitalsPersistenceError,
};
use crate::domain::{Error, ErrorCode};

/// Standard error envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    #[schema(example = "conflict")]
    code: ErrorCode,
    #[schema(example = "email already registered")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    details: Option<Value>,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            // Uniqueness conflicts surface as 400; the envelope's code field
            // keeps them distinguishable from validation failures.
            ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        ApiError {
            code: value.code(),
            message: value.message().to_owned(),
            details: value.details().cloned(),
        }
    }
}

macro_rules! from_persistence_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(value: $ty) -> Self {
                    ApiError::from(Error::from(value))
                }
            }
        )*
    };
}

from_persistence_error!(
    UserPersistenceError,
    PatientPersistenceError,
    AppointmentPersistenceError,
    VitalsPersistenceError,
    DiagnosisPersistenceError,
    PrescriptionPersistenceError,
);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code, ErrorCode::InternalError) {
            // Do not leak store internals to clients.
            error!(message = %self.message, "internal error returned to client");
            let redacted = ApiError {
                code: self.code,
                message: "Internal server error".to_owned(),
                details: None,
            };
            return HttpResponse::build(self.status_code()).json(redacted);
        }
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::conflict("dup"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_codes_follow_error_codes(#[case] err: Error, #[case] expected: StatusCode) {
        let api_err = ApiError::from(err);
        assert_eq!(api_err.status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let api_err = ApiError::from(Error::internal("connection string leaked"));
        let response = api_err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body()).await.expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(payload["message"], "Internal server error");
        assert_eq!(payload["code"], "internal_error");
        assert!(payload.get("details").is_none());
    }

    #[actix_web::test]
    async fn conflict_payload_keeps_its_code() {
        let api_err = ApiError::from(Error::conflict("email already registered"));
        let response = api_err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body()).await.expect("body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(payload["code"], "conflict");
        assert_eq!(payload["message"], "email already registered");
    }

    #[test]
    fn persistence_failures_convert_directly() {
        let api_err = ApiError::from(UserPersistenceError::connection("pool exhausted"));
        assert_eq!(api_err.code(), ErrorCode::ServiceUnavailable);
    }
}
