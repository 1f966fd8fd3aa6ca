//! HTTP Request body types

use serde::{Deserialize, Serialize};

/// HTTP request body.
///
/// JSON bodies are kept as structured values until the adapter encodes them;
/// raw bodies are sent byte-for-byte with the content type they carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Structured JSON body
    Json {
        /// The JSON document to send.
        value: serde_json::Value,
    },
    /// Raw text body
    Raw {
        /// The content type (e.g., "text/plain")
        content_type: String,
        /// The body content
        content: String,
    },
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: serde_json::Value) -> Self {
        Self::Json { value }
    }

    /// Creates a plain text body.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Raw {
            content_type: "text/plain".to_string(),
            content: content.into(),
        }
    }

    /// Returns whether there is no body to send.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type implied by the body.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Json { .. } => Some("application/json"),
            Self::Raw { content_type, .. } => Some(content_type),
        }
    }

    /// Encodes the body into the bytes that go on the wire.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::None => Vec::new(),
            Self::Json { value } => value.to_string().into_bytes(),
            Self::Raw { content, .. } => content.clone().into_bytes(),
        }
    }
}
