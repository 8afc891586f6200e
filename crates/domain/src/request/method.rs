//! Verbs spoken by the lost & found API

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four verbs the backend routes use. Updates are full `PUT`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read
    #[default]
    Get,
    /// Create, log in, submit a claim
    Post,
    /// Update
    Put,
    /// Delete
    Delete,
}

impl HttpMethod {
    /// Wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
