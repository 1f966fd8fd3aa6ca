//! Observed API outcome taxonomy.
//!
//! The backend under test reports business outcomes purely through status
//! codes. This module names them. Missing resources come back as 400 rather
//! than 404 on this API, so `ValidationError` covers both.

use serde::{Deserialize, Serialize};

use crate::response::StatusCode;

/// A classified API outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum ApiStatus {
    /// 200: request accepted.
    Ok,
    /// 204: accepted with no body.
    NoContent,
    /// 400: malformed, out-of-range, missing or wrong-typed fields, and
    /// lookups of ids that do not exist.
    ValidationError,
    /// 401: invalid credential.
    AuthError,
    /// 405: wrong method for the route.
    MethodNotAllowed,
    /// 415: wrong content type.
    UnsupportedMediaType,
    /// Anything else.
    Other(u16),
}

impl ApiStatus {
    /// Classifies a raw status code.
    #[must_use]
    pub const fn classify(status: u16) -> Self {
        match status {
            200 => Self::Ok,
            204 => Self::NoContent,
            400 => Self::ValidationError,
            401 => Self::AuthError,
            405 => Self::MethodNotAllowed,
            415 => Self::UnsupportedMediaType,
            other => Self::Other(other),
        }
    }

    /// Returns the status code this outcome is reported with.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::NoContent => 204,
            Self::ValidationError => 400,
            Self::AuthError => 401,
            Self::MethodNotAllowed => 405,
            Self::UnsupportedMediaType => 415,
            Self::Other(code) => code,
        }
    }
}

impl From<StatusCode> for ApiStatus {
    fn from(status: StatusCode) -> Self {
        Self::classify(status.as_u16())
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(code) => write!(f, "{}", StatusCode::new(*code)),
            known => write!(f, "{}", StatusCode::new(known.code())),
        }
    }
}
