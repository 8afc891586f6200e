//! User accounts managed by administrators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::{check_email, check_len};
use crate::error::{DomainError, DomainResult};

/// Account type as spelled by the user administration API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    /// Regular account
    #[serde(rename = "usuario", alias = "student")]
    Member,
    /// Administrator
    #[serde(rename = "admin")]
    Admin,
}

impl AccountKind {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "usuario",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "usuario" | "student" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::validation(
                "tipo",
                format!("'{other}' is not one of usuario, admin"),
            )),
        }
    }
}

/// An account as returned by `/admin/users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account id
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name
    pub nombre: String,
    /// Login email
    pub correo: String,
    /// Account type
    pub tipo: AccountKind,
    /// ISO-8601 creation time
    #[serde(default)]
    pub fecha_creacion: Option<String>,
}

/// Payload for creating an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    /// Display name
    pub nombre: String,
    /// Login email
    pub correo: String,
    /// Initial password
    #[serde(rename = "contraseña")]
    pub password: String,
    /// Account type
    pub tipo: AccountKind,
}

impl NewAccount {
    /// Checks required fields before sending.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        check_len("nombre", self.nombre.trim(), 1, 200)?;
        check_email("correo", &self.correo)?;
        check_len("contraseña", &self.password, 1, 200)
    }
}

/// Partial update of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct AccountUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    /// New email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    /// New password
    #[serde(rename = "contraseña", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New account type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<AccountKind>,
}

impl AccountUpdate {
    /// Checks the set fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` naming the first offending field.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(nombre) = &self.nombre {
            check_len("nombre", nombre.trim(), 1, 200)?;
        }
        if let Some(correo) = &self.correo {
            check_email("correo", correo)?;
        }
        if let Some(password) = &self.password {
            check_len("contraseña", password, 1, 200)?;
        }
        Ok(())
    }
}
