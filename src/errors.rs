use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LeadgateError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    Forwarding(String),
    CsvExport(String),
}

impl LeadgateError {
    /// Stable error code, logged alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            LeadgateError::DatabaseConfig(_) => "E001",
            LeadgateError::DatabaseConnection(_) => "E002",
            LeadgateError::DatabaseOperation(_) => "E003",
            LeadgateError::Validation(_) => "E004",
            LeadgateError::NotFound(_) => "E005",
            LeadgateError::Serialization(_) => "E006",
            LeadgateError::Forwarding(_) => "E007",
            LeadgateError::CsvExport(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LeadgateError::DatabaseConfig(_) => "Database Configuration Error",
            LeadgateError::DatabaseConnection(_) => "Database Connection Error",
            LeadgateError::DatabaseOperation(_) => "Database Operation Error",
            LeadgateError::Validation(_) => "Validation Error",
            LeadgateError::NotFound(_) => "Resource Not Found",
            LeadgateError::Serialization(_) => "Serialization Error",
            LeadgateError::Forwarding(_) => "Conversion Forwarding Error",
            LeadgateError::CsvExport(_) => "CSV Export Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LeadgateError::DatabaseConfig(msg) => msg,
            LeadgateError::DatabaseConnection(msg) => msg,
            LeadgateError::DatabaseOperation(msg) => msg,
            LeadgateError::Validation(msg) => msg,
            LeadgateError::NotFound(msg) => msg,
            LeadgateError::Serialization(msg) => msg,
            LeadgateError::Forwarding(msg) => msg,
            LeadgateError::CsvExport(msg) => msg,
        }
    }

    /// HTTP status this error maps to at the API boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            LeadgateError::Validation(_) => StatusCode::BAD_REQUEST,
            LeadgateError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for LeadgateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LeadgateError {}

impl LeadgateError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LeadgateError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LeadgateError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LeadgateError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LeadgateError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LeadgateError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LeadgateError::Serialization(msg.into())
    }

    pub fn forwarding<T: Into<String>>(msg: T) -> Self {
        LeadgateError::Forwarding(msg.into())
    }

    pub fn csv_export<T: Into<String>>(msg: T) -> Self {
        LeadgateError::CsvExport(msg.into())
    }
}

impl From<sea_orm::DbErr> for LeadgateError {
    fn from(err: sea_orm::DbErr) -> Self {
        LeadgateError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LeadgateError {
    fn from(err: serde_json::Error) -> Self {
        LeadgateError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for LeadgateError {
    fn from(err: csv::Error) -> Self {
        LeadgateError::CsvExport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LeadgateError>;
