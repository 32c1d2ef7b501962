use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::Validation => write!(f, "Validation"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::Storage => write!(f, "Storage"),
        }
    }
}

/// Stable machine-readable error code carried in every error body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ErrorCode {
    InvalidJson,
    InvalidId,
    MissingTitle,
    MissingCompleted,
    DuplicateTitle,
    NotFound,
    DatabaseError,
}

impl ErrorCode {
    pub fn kind(self) -> AppErrorKind {
        match self {
            ErrorCode::InvalidJson
            | ErrorCode::InvalidId
            | ErrorCode::MissingTitle
            | ErrorCode::MissingCompleted => AppErrorKind::Validation,
            ErrorCode::DuplicateTitle => AppErrorKind::Conflict,
            ErrorCode::NotFound => AppErrorKind::NotFound,
            ErrorCode::DatabaseError => AppErrorKind::Storage,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::MissingTitle => "MISSING_TITLE",
            ErrorCode::MissingCompleted => "MISSING_COMPLETED",
            ErrorCode::DuplicateTitle => "DUPLICATE_TITLE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error returned by every endpoint.
///
/// Serializes as `{"error": "<message>", "code": "<STABLE_CODE>"}`. Clients should
/// branch on `code`; the message text may change between versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    #[serde(rename = "error")]
    pub message: String,
    pub code: ErrorCode,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidJson, message)
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidId, message)
    }

    pub fn missing_title() -> Self {
        Self::new(ErrorCode::MissingTitle, "Title is required")
    }

    pub fn missing_completed() -> Self {
        Self::new(ErrorCode::MissingCompleted, "Completed flag is required")
    }

    pub fn duplicate_title() -> Self {
        Self::new(ErrorCode::DuplicateTitle, "Todo with this title already exists")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn kind(&self) -> AppErrorKind {
        self.code.kind()
    }

    #[cfg_attr(not(feature = "server"), allow(dead_code))]
    fn status_code_u16(&self) -> u16 {
        match self.kind() {
            AppErrorKind::Validation => 400,
            AppErrorKind::Conflict => 409,
            AppErrorKind::NotFound => 404,
            AppErrorKind::Storage => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
