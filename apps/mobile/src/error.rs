//! # API Error Type
//!
//! Unified error type for app commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shelf                                  │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── Storage failure?  DbError  ──► logged, generic message     │
//! │         │                                                               │
//! │         ├── Invalid product?  CoreError ──► VALIDATION_ERROR           │
//! │         │                                   + one entry per field      │
//! │         │                                                               │
//! │         └── Success ──────────────────────────────────────────────────►│
//! │                                                                         │
//! │  UI receives:                                                          │
//! │  {                                                                      │
//! │    "code": "VALIDATION_ERROR",                                         │
//! │    "message": "Invalid product: Batch is required",                    │
//! │    "fieldErrors": [{ "field": "batch", "code": "EMPTY_FIELD",          │
//! │                      "message": "Batch is required" }]                 │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shelf_core::{CoreError, Field, FieldError, ValidationReport};
use shelf_db::DbError;

/// API error returned from commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field failures, for highlighting form inputs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldErrorDto>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Id already taken
    Conflict,

    /// Storage operation failed
    DatabaseError,
}

/// One failing form field, as the UI receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorDto {
    pub field: Field,
    /// Reason code, e.g. `"INVALID_BATCH_FORMAT"`.
    pub code: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorDto {
    fn from(err: FieldError) -> Self {
        FieldErrorDto {
            field: err.field,
            code: err.reason.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Flattens a report into DTOs, in form order.
pub fn field_errors(report: &ValidationReport) -> Vec<FieldErrorDto> {
    report.iter().map(FieldErrorDto::from).collect()
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not access saved products")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Could not save products")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::CorruptPayload { key, message } => {
                tracing::error!(key = %key, "Stored data is unreadable: {}", message);
                ApiError::new(ErrorCode::DatabaseError, "Saved products could not be read")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidProduct(report) => ApiError {
                code: ErrorCode::ValidationError,
                message: format!("Invalid product: {}", report),
                field_errors: field_errors(&report),
            },
            CoreError::IdSpaceExhausted => {
                tracing::error!("No free product id left");
                ApiError::new(ErrorCode::Conflict, "No free product id left")
            }
            CoreError::Validation(e) => ApiError {
                code: ErrorCode::ValidationError,
                message: e.to_string(),
                field_errors: vec![FieldErrorDto::from(e)],
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::ValidationError;

    #[test]
    fn test_invalid_product_carries_field_errors() {
        let mut report = ValidationReport::new();
        report.record::<()>(Field::Batch, Err(ValidationError::EmptyField));
        report.record::<()>(Field::Name, Err(ValidationError::InvalidCharacters));

        let api: ApiError = CoreError::InvalidProduct(report).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.field_errors.len(), 2);
        assert_eq!(api.field_errors[0].field, Field::Name);
        assert_eq!(api.field_errors[1].code, "EMPTY_FIELD");
        assert_eq!(api.field_errors[1].message, "Batch is required");
    }

    #[test]
    fn test_serialized_shape() {
        let api = ApiError::not_found("Product", "123456");
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 123456");
        assert!(json.get("fieldErrors").is_none());
    }

    #[test]
    fn test_storage_errors_are_generic() {
        let api: ApiError = DbError::corrupt("@stock_products", "expected value at line 1").into();
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert!(!api.message.contains("line 1"));

        let api: ApiError = DbError::duplicate("id", "123456").into();
        assert_eq!(api.code, ErrorCode::Conflict);
    }
}
