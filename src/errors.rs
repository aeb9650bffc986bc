//! # Error Handling for the Admin Dispatcher
//!
//! Every handler failure is expressed as an [`ApiError`] and serialised as
//! `{"error": "..."}` with the matching HTTP status code.
//!
//! ## Philosophy
//!
//! **Never expose internal errors to callers**. Driver and connection errors
//! are logged server-side via `tracing`; the response body only carries the
//! operation-level message ("Failed to create user", never the raw `DbErr`
//! text). The one deliberate exception is the 409 conflict path, where the
//! violating column names are extracted from the driver detail so the caller
//! can tell which field is already taken.
//!
//! ## Logging
//!
//! Internal details are logged with the `tracing` crate. Hosts that want
//! them on stderr set up a subscriber:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt().with_target(false).compact().init();
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

/// Dispatcher error type with automatic logging and sanitised responses.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - no record with the given id exists for the model
    NotFound {
        /// Registered model name (e.g. "user")
        model: String,
        /// The primary key that was requested
        id: i64,
    },

    /// 400 Bad Request - missing/invalid parameter, unknown model, bad body
    BadRequest {
        /// Caller-facing error message
        message: String,
    },

    /// 409 Conflict - unique-constraint violation
    Conflict {
        /// Column names extracted from the driver's conflict detail
        fields: Vec<String>,
    },

    /// 500 Internal Server Error - database failure (detail logged, not sent)
    Database {
        /// Caller-facing operation message, e.g. "Failed to create user"
        message: String,
        /// Internal error (logged, never serialised into the response)
        internal: DbErr,
    },

    /// 500 Internal Server Error - non-database failure (detail logged)
    Internal {
        /// Caller-facing operation message
        message: String,
        /// Internal detail (logged, never serialised into the response)
        internal: String,
    },
}

impl ApiError {
    /// Create a 404 for a missing record.
    ///
    /// The message follows the dispatcher's wire contract:
    /// `"<model> with id <id> not found"`.
    pub fn not_found(model: impl Into<String>, id: i64) -> Self {
        Self::NotFound {
            model: model.into(),
            id,
        }
    }

    /// Create a 400 Bad Request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a 409 Conflict from an explicit field list.
    #[must_use]
    pub fn conflict(fields: Vec<String>) -> Self {
        Self::Conflict { fields }
    }

    /// Create a 500 from a database error. The `DbErr` is logged, the caller
    /// only sees `message`.
    pub fn database(message: impl Into<String>, internal: DbErr) -> Self {
        Self::Database {
            message: message.into(),
            internal,
        }
    }

    /// Create a 500 with a non-database internal detail.
    pub fn internal(message: impl Into<String>, internal: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            internal: internal.into(),
        }
    }

    /// Classify a `DbErr` coming out of a mutating call: unique-constraint
    /// violations become 409 with the violating fields, everything else is a
    /// sanitised 500 carrying `message`.
    pub fn from_db(message: impl Into<String>, err: DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return Self::Conflict {
                fields: violated_fields(&detail),
            };
        }
        Self::Database {
            message: message.into(),
            internal: err,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The caller-facing message (sanitised).
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { model, id } => format!("{model} with id {id} not found"),
            Self::BadRequest { message } => message.clone(),
            Self::Conflict { fields } => {
                if fields.is_empty() {
                    "duplicate value violates a unique constraint".to_string()
                } else {
                    fields
                        .iter()
                        .map(|field| format!("{field} is already in use"))
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            }
            Self::Database { message, .. } | Self::Internal { message, .. } => message.clone(),
        }
    }

    /// Log internal detail. Only fires if the host enabled tracing.
    fn log_internal(&self) {
        match self {
            Self::Database { message, internal } => {
                tracing::error!(error = ?internal, "{message}");
            }
            Self::Internal { message, internal } => {
                tracing::error!(details = %internal, "{message}");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "admin request rejected"
                );
            }
        }
    }
}

/// Wire shape of every error body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Pull the violating column names out of a unique-constraint detail string.
///
/// The detail text is backend-specific:
/// - SQLite: `UNIQUE constraint failed: users.email, users.name`
/// - Postgres: `... Key (email)=(a@b.com) already exists.`
/// - MySQL: `Duplicate entry 'a@b.com' for key 'users.uniq_email'`
///
/// Unrecognised formats yield an empty list; the 409 response then falls
/// back to a generic duplicate-value message instead of leaking the detail.
fn violated_fields(detail: &str) -> Vec<String> {
    if let Some(rest) = detail.split("UNIQUE constraint failed:").nth(1) {
        return rest
            .split(',')
            .filter_map(|part| part.trim().rsplit('.').next())
            .filter(|column| !column.is_empty())
            .map(ToString::to_string)
            .collect();
    }

    if let Some(start) = detail.find("Key (") {
        let rest = &detail[start + "Key (".len()..];
        if let Some(end) = rest.find(')') {
            return rest[..end]
                .split(',')
                .map(|column| column.trim().trim_matches('"').to_string())
                .filter(|column| !column.is_empty())
                .collect();
        }
    }

    if let Some(rest) = detail.split("for key ").nth(1) {
        let key = rest.trim().trim_matches('\'');
        let column = key.rsplit_once('.').map_or(key, |(_, column)| column);
        if !column.is_empty() {
            return vec![column.to_string()];
        }
    }

    Vec::new()
}
