use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    InvalidKeys {
        message: String,
        keys: Vec<&'static str>,
    },

    #[error("{message}")]
    InvalidOption {
        message: String,
        options: &'static [&'static str],
    },

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Unsupported {
        message: String,
        options: &'static [&'static str],
    },

    #[error("{0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    keys: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'static [&'static str]>,
}

impl ErrorResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            keys: None,
            options: None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidKeys { .. }
            | AppError::InvalidOption { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::Unsupported { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::InvalidKeys { message, keys } => ErrorResponse {
                keys: Some(keys),
                ..ErrorResponse::message(message)
            },
            AppError::InvalidOption { message, options }
            | AppError::Unsupported { message, options } => ErrorResponse {
                options: Some(options),
                ..ErrorResponse::message(message)
            },
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                ErrorResponse::message("Internal server error")
            }
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                ErrorResponse::message(msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Database constraint classes the API translates into client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    ForeignKey,
}

impl Constraint {
    /// Classify a database error from the driver's error code.
    pub fn of(err: &DbErr) -> Option<Self> {
        match err.sql_err()? {
            SqlErr::UniqueConstraintViolation(_) => Some(Constraint::Unique),
            SqlErr::ForeignKeyConstraintViolation(_) => Some(Constraint::ForeignKey),
            _ => None,
        }
    }
}

/// Call-site refinement of constraint violations, e.g. turning a unique
/// violation on `developers.email` into "Email already exists.".
pub trait DbResultExt<T> {
    fn on_constraint<F>(self, constraint: Constraint, f: F) -> AppResult<T>
    where
        F: FnOnce() -> AppError;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn on_constraint<F>(self, constraint: Constraint, f: F) -> AppResult<T>
    where
        F: FnOnce() -> AppError,
    {
        self.map_err(|err| AppError::from_db(err, constraint, f))
    }
}

impl AppError {
    /// Translate a database error, replacing one constraint class with a
    /// call-site specific error.
    pub fn from_db<F>(err: DbErr, constraint: Constraint, f: F) -> AppError
    where
        F: FnOnce() -> AppError,
    {
        if Constraint::of(&err) == Some(constraint) {
            f()
        } else {
            err.into()
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match Constraint::of(&err) {
            Some(Constraint::Unique) => {
                return AppError::Conflict("Record already exists.".to_string())
            }
            Some(Constraint::ForeignKey) => {
                return AppError::NotFound("Referenced record not found.".to_string())
            }
            None => {}
        }

        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
                AppError::NotFound("Record not found.".to_string())
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
