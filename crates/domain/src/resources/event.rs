//! University events shown in the calendar

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::{check_len, check_opt_len, check_pattern};
use crate::error::DomainResult;

static TITLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\sÁÉÍÓÚÑáéíóúñ]+$").ok());
static LOCATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\sÁÉÍÓÚÑáéíóúñ]*$").ok());

const PLAIN_TEXT: &str = "may only contain letters, digits and spaces";

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniEvent {
    /// Event id
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    /// Title
    pub title: String,
    /// ISO-8601 start
    pub start: String,
    /// ISO-8601 end
    #[serde(default)]
    pub end: Option<String>,
    /// Venue
    #[serde(default)]
    pub location: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 creation time
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO-8601 last update
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    /// Title
    pub title: String,
    /// Start instant
    pub start: DateTime<Utc>,
    /// End instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Venue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewEvent {
    /// Checks the payload against the API's limits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        check_title(&self.title)?;
        if let Some(location) = &self.location {
            check_len("location", location, 0, 200)?;
            check_pattern("location", location, &LOCATION, PLAIN_TEXT)?;
        }
        check_opt_len("description", self.description.as_deref(), 1000)
    }
}

/// Partial update of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct EventUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// New end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// New venue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventUpdate {
    /// Checks the set fields against the API's limits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        check_opt_len("location", self.location.as_deref(), 200)?;
        check_opt_len("description", self.description.as_deref(), 1000)
    }
}

fn check_title(title: &str) -> DomainResult<()> {
    check_len("title", title, 3, 200)?;
    check_pattern("title", title, &TITLE, PLAIN_TEXT)
}
