use std::collections::BTreeMap;

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use sea_orm::DbErr;
use serde::Serialize;
use tracing::error;

/// Error envelope for not-found and duplicate-email responses.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    pub details: String,
    pub timestamp: String,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound { message: String, details: String },
    DuplicateEmail { message: String, details: String },
    Validation(BTreeMap<String, String>),
    Internal(DbErr),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>, uri: &Uri) -> Self {
        Self::NotFound {
            message: message.into(),
            details: format!("uri={uri}"),
        }
    }

    pub fn duplicate_email(email: &str, uri: &Uri) -> Self {
        Self::DuplicateEmail {
            message: format!("Employee already exists with this email id :: {email}"),
            details: format!("uri={uri}"),
        }
    }

    /// Flatten a validation report into one message per field, keyed by the
    /// wire-format (camelCase) field name.
    pub fn validation(report: garde::Report) -> Self {
        let mut fields = BTreeMap::new();
        for (path, error) in report.iter() {
            fields
                .entry(camel_case(&path.to_string()))
                .or_insert_with(|| error.to_string());
        }
        Self::Validation(fields)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Duplicate email renders 404 with the same envelope as not-found.
            Self::NotFound { message, details } | Self::DuplicateEmail { message, details } => (
                StatusCode::NOT_FOUND,
                Json(ErrorDetails {
                    message,
                    details,
                    timestamp: timestamp(),
                }),
            )
                .into_response(),
            Self::Validation(fields) => (StatusCode::BAD_REQUEST, Json(fields)).into_response(),
            Self::Internal(err) => {
                error!(error = %err, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
