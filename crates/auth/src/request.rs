//! Outgoing request descriptor and body canonicalization.

use crate::error::AuthError;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Body of an outgoing request.
///
/// The variant decides how the body contributes to the signed payload:
/// `Empty` contributes nothing, `Text` is used verbatim and `Structured`
/// is serialized to compact JSON. Empty text and `null`, `""`, `{}` or `[]`
/// structured values collapse to the empty contribution, while `0` and
/// `false` do not.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A raw text body, signed as-is.
    Text(String),
    /// A JSON value, signed as its serialized text.
    Structured(Value),
}

impl RequestBody {
    /// Build a structured body from any serializable value.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidInput` if the value cannot be represented
    /// as JSON (e.g. a map with non-string keys).
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, AuthError> {
        serde_json::to_value(value)
            .map(Self::Structured)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))
    }

    /// Returns true if this body contributes nothing to the signed payload.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Structured(value) => match value {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(map) => map.is_empty(),
                Value::Bool(_) | Value::Number(_) => false,
            },
        }
    }

    /// Render the body text used both in the signed payload and on the wire.
    ///
    /// Object keys come out in sorted order, so the same structured body
    /// always renders to the same text.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidInput` if the structured value cannot be serialized.
    pub fn canonicalize(&self) -> Result<String, AuthError> {
        if self.is_empty() {
            return Ok(String::new());
        }

        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Structured(value) => {
                serde_json::to_string(value).map_err(|e| AuthError::InvalidInput(e.to_string()))
            }
            Self::Empty => Ok(String::new()),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

/// A fully formed but unsent HTTP request.
///
/// Built by the dispatch layer; authentication only ever touches `headers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutgoingRequest {
    /// HTTP method, in any case.
    pub method: Option<String>,
    /// Absolute target URL, including the query string.
    pub url: String,
    /// Request body.
    pub body: RequestBody,
    /// Header name to value.
    pub headers: HashMap<String, String>,
}

impl OutgoingRequest {
    /// Create a request with no body and no headers.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            url: url.into(),
            body: RequestBody::Empty,
            headers: HashMap::new(),
        }
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
