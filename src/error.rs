// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::params::FieldError;
use crate::area::AreaError;
use crate::database::DatabaseError;

/// Handler result: a JSON body or an `ApiError` envelope
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    InvalidField {
        message: String,
        field_errors: Vec<FieldError>,
    },

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidField { .. } => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidField { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::InvalidField { message, field_errors } => json!({
                "error": true,
                "message": message,
                "code": self.error_code(),
                "field_errors": field_errors
            }),
            _ => json!({
                "error": true,
                "message": self.message(),
                "code": self.error_code()
            }),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidField { .. } => "INVALID_FIELD",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl ApiError {
    pub fn invalid_field(field_errors: Vec<FieldError>) -> Self {
        let fields: Vec<&str> = field_errors.iter().map(|e| e.field.as_str()).collect();
        ApiError::InvalidField {
            message: format!("Invalid query parameters: {}", fields.join(", ")),
            field_errors,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Sqlx(
                sqlx_err @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)),
            ) => {
                tracing::error!("Database connection error: {}", sqlx_err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<AreaError> for ApiError {
    fn from(err: AreaError) -> Self {
        match err {
            AreaError::NotFound { .. } | AreaError::NoYears => ApiError::not_found(err.to_string()),
            AreaError::Database(db_err) => db_err.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaCode;

    #[test]
    fn invalid_field_lists_each_field() {
        let err = ApiError::invalid_field(vec![FieldError::new("villageCode", "String must contain exactly 4 character(s)")]);
        assert_eq!(err.status_code(), 400);

        let body = err.to_json();
        assert_eq!(body["code"], "INVALID_FIELD");
        assert_eq!(body["field_errors"][0]["field"], "villageCode");
        assert!(body["message"].as_str().unwrap().contains("villageCode"));
    }

    #[test]
    fn area_errors_map_to_status() {
        let missing = AreaError::NotFound { year: 2024, code: AreaCode::new("63", "000", "999", "0000") };
        assert_eq!(ApiError::from(missing).status_code(), 404);
        assert_eq!(ApiError::from(AreaError::NoYears).error_code(), "NOT_FOUND");

        let failed = AreaError::Database(DatabaseError::QueryError("relation does not exist".into()));
        let api = ApiError::from(failed);
        assert_eq!(api.status_code(), 500);
        assert!(!api.message().contains("relation"));
    }

    #[test]
    fn pool_timeouts_are_unavailable() {
        let api = ApiError::from(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(api.status_code(), 503);
        assert_eq!(api.error_code(), "SERVICE_UNAVAILABLE");
    }
}
