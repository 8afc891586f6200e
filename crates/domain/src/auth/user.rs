//! User identity derived from token claims

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried in the `tipo` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular member of the university. The backend's user API calls this
    /// role `usuario`.
    #[serde(alias = "usuario")]
    Student,
    /// Administrator
    Admin,
}

impl Role {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of the logged-in user.
///
/// Stored next to the token as `{"_id", "email", "role"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id
    #[serde(rename = "_id")]
    pub id: String,
    /// Login email
    pub email: String,
    /// Role
    pub role: Role,
}

impl UserProfile {
    /// Returns true if the user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_aliases() {
        assert_eq!(serde_json::from_str::<Role>(r#""usuario""#).unwrap(), Role::Student);
        assert_eq!(serde_json::from_str::<Role>(r#""student""#).unwrap(), Role::Student);
        assert_eq!(serde_json::from_str::<Role>(r#""admin""#).unwrap(), Role::Admin);
        assert!(serde_json::from_str::<Role>(r#""root""#).is_err());
    }

    #[test]
    fn test_profile_storage_shape() {
        let user = UserProfile {
            id: "65f0".to_string(),
            email: "ana@uni.edu".to_string(),
            role: Role::Student,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"_id": "65f0", "email": "ana@uni.edu", "role": "student"})
        );
        assert!(!user.is_admin());
    }
}
