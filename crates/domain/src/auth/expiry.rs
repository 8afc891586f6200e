//! Token expiry policy

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::claims::Claims;

/// How the client decides that a session has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Only a 401 from the backend ends a session.
    #[default]
    ServerOnly,
    /// Also honour the `exp` claim, treating tokens as expired `leeway_secs`
    /// early.
    LocalExp {
        /// Seconds subtracted from the expiry instant
        #[serde(default)]
        leeway_secs: i64,
    },
}

impl ExpiryPolicy {
    /// Returns true if the policy considers these claims expired at `now`.
    #[must_use]
    pub fn is_expired(&self, claims: &Claims, now: DateTime<Utc>) -> bool {
        match self {
            Self::ServerOnly => false,
            Self::LocalExp { leeway_secs } => claims.is_expired_at(now, *leeway_secs),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use pretty_assertions::assert_eq;

    fn claims(exp: i64) -> Claims {
        Claims {
            user_id: "1".to_string(),
            correo: "a@b.c".to_string(),
            tipo: Role::Student,
            exp: Some(exp),
        }
    }

    #[test]
    fn test_server_only_never_expires_locally() {
        let now = DateTime::from_timestamp(10_000, 0).unwrap();
        assert!(!ExpiryPolicy::ServerOnly.is_expired(&claims(1), now));
    }

    #[test]
    fn test_local_exp_with_leeway() {
        let now = DateTime::from_timestamp(950, 0).unwrap();
        assert!(!ExpiryPolicy::LocalExp { leeway_secs: 0 }.is_expired(&claims(1_000), now));
        assert!(ExpiryPolicy::LocalExp { leeway_secs: 60 }.is_expired(&claims(1_000), now));
    }

    #[test]
    fn test_policy_deserializes_from_tagged_form() {
        let policy: ExpiryPolicy =
            serde_json::from_str(r#"{"mode":"local_exp","leeway_secs":30}"#).unwrap();
        assert_eq!(policy, ExpiryPolicy::LocalExp { leeway_secs: 30 });
        let policy: ExpiryPolicy = serde_json::from_str(r#"{"mode":"server_only"}"#).unwrap();
        assert_eq!(policy, ExpiryPolicy::ServerOnly);
    }
}
