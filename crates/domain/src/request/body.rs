//! HTTP Request body types

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Content type of JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of an outgoing API request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(serde_json::Value),
    /// Multipart form data (file uploads)
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serializes a value into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| DomainError::validation("body", e.to_string()))
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if applicable.
    ///
    /// Multipart bodies return `None`: the boundary is chosen by the transport.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
            Self::None | Self::Multipart(_) => None,
        }
    }
}

/// A multipart form made of text fields and files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file field. Repeating the name sends several files under it.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file,
        });
        self
    }

    /// Returns the parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

/// A single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field
    File {
        /// Field name
        name: String,
        /// File payload
        file: FilePart,
    },
}

/// File contents together with the metadata sent in the part headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the contents
    pub content_type: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a file part.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_body_content_type() {
        let body = RequestBody::json(&serde_json::json!({"correo": "a@b.c"})).unwrap_or_default();
        assert_eq!(body.content_type(), Some(JSON_CONTENT_TYPE));
        assert!(!body.is_empty());
    }

    #[test]
    fn test_multipart_keeps_order_and_repeats() {
        let form = MultipartForm::new()
            .file("evidences", FilePart::new("a.png", "image/png", vec![1]))
            .file("evidences", FilePart::new("b.png", "image/png", vec![2]))
            .text("notes", "mine");

        let names: Vec<&str> = form
            .parts()
            .iter()
            .map(|p| match p {
                FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names, vec!["evidences", "evidences", "notes"]);
        assert_eq!(RequestBody::Multipart(form).content_type(), None);
    }
}
