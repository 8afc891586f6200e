//! Lost & found items

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::{check_len, check_opt_len};
use crate::error::{DomainError, DomainResult};
use crate::request::{FilePart, MultipartForm};

/// Multipart field repeated once per evidence file.
pub const EVIDENCE_FIELD: &str = "evidences";
/// Multipart field carrying the claimant's notes.
pub const NOTES_FIELD: &str = "notes";

/// Where an item is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LostItemStatus {
    /// Waiting for its owner
    #[default]
    Available,
    /// Someone has filed a claim
    Claimed,
    /// Handed back
    Returned,
}

impl LostItemStatus {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Claimed => "claimed",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for LostItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LostItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "available" => Ok(Self::Available),
            "claimed" => Ok(Self::Claimed),
            "returned" => Ok(Self::Returned),
            other => Err(DomainError::validation(
                "status",
                format!("'{other}' is not one of available, claimed, returned"),
            )),
        }
    }
}

/// A found object as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostItem {
    /// Item id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Short title
    pub title: String,
    /// Where it was found
    pub found_location: String,
    /// Lifecycle status
    pub status: LostItemStatus,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// How to reach whoever holds it
    #[serde(default)]
    pub contact_info: Option<String>,
    /// ISO-8601 creation time
    pub created_at: String,
    /// ISO-8601 last update
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for registering a found object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLostItem {
    /// Short title
    pub title: String,
    /// Where it was found
    pub found_location: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How to reach whoever holds it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
}

impl NewLostItem {
    /// Checks the payload against the API's limits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        check_len("title", &self.title, 1, 200)?;
        check_len("found_location", &self.found_location, 1, 200)?;
        check_opt_len("description", self.description.as_deref(), 1000)?;
        check_opt_len("contact_info", self.contact_info.as_deref(), 200)
    }
}

/// Partial update of a found object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct LostItemUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_location: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LostItemStatus>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
}

impl LostItemUpdate {
    /// Checks the set fields against the API's limits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            check_len("title", title, 1, 200)?;
        }
        if let Some(location) = &self.found_location {
            check_len("found_location", location, 1, 200)?;
        }
        check_opt_len("description", self.description.as_deref(), 1000)?;
        check_opt_len("contact_info", self.contact_info.as_deref(), 200)
    }
}

/// A claim on a found object: notes plus at least one evidence file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSubmission {
    /// What the claimant says about the object
    pub notes: String,
    /// Photos or documents backing the claim
    pub evidences: Vec<FilePart>,
}

impl ClaimSubmission {
    /// Checks notes length and that evidence is attached.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        check_len(NOTES_FIELD, &self.notes, 1, 1000)?;
        if self.evidences.is_empty() {
            return Err(DomainError::validation(
                EVIDENCE_FIELD,
                "at least one evidence file is required",
            ));
        }
        Ok(())
    }

    /// Builds the multipart form: one `evidences` part per file, then `notes`.
    #[must_use]
    pub fn into_form(self) -> MultipartForm {
        let form = self
            .evidences
            .into_iter()
            .fold(MultipartForm::new(), |form, file| form.file(EVIDENCE_FIELD, file));
        form.text(NOTES_FIELD, self.notes)
    }
}

/// Response to a successful claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    /// Confirmation message
    pub message: String,
    /// Id of the created claim
    pub claim_id: String,
    /// New item status
    pub status: String,
}
