//! Unified admin API error codes

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LeadgateError;

/// API error code enum
///
/// Serialized as numbers via serde_repr. Grouped by thousands:
/// - 0: success
/// - 1000-1099: generic errors
/// - 2000-2099: authentication errors
/// - 3000-3099: lead errors
/// - 4000-4099: export errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // Generic errors 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    InvalidDateFormat = 1012,

    // Authentication errors 2000-2099
    AuthFailed = 2000,

    // Lead errors 3000-3099
    LeadNotFound = 3000,
    LeadDatabaseError = 3001,

    // Export errors 4000-4099
    ExportFailed = 4001,
}

impl From<LeadgateError> for ErrorCode {
    fn from(err: LeadgateError) -> Self {
        match err {
            LeadgateError::Validation(_) => ErrorCode::BadRequest,
            LeadgateError::NotFound(_) => ErrorCode::LeadNotFound,
            LeadgateError::DatabaseConfig(_)
            | LeadgateError::DatabaseConnection(_)
            | LeadgateError::DatabaseOperation(_) => ErrorCode::LeadDatabaseError,
            LeadgateError::CsvExport(_) => ErrorCode::ExportFailed,
            LeadgateError::Serialization(_) | LeadgateError::Forwarding(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
