//! Bearer token claims decoding.
//!
//! Tokens are three dot-separated segments; the middle one is a base64
//! JSON object. Nothing here checks the signature: the backend is the only
//! party able to vouch for a token, and it does so by answering 401.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::{Role, UserProfile};

/// Why a token could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not have three non-empty dot-separated segments.
    #[error("token must have three dot-separated segments, found {found}")]
    MissingSegment {
        /// Number of segments found.
        found: usize,
    },

    /// The claims segment is not valid base64.
    #[error("claims segment is not valid base64: {0}")]
    InvalidBase64(String),

    /// The claims segment is not a JSON object matching the claims schema.
    #[error("invalid claims: {0}")]
    InvalidClaims(String),
}

/// Claims the backend embeds in every token it issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Backend user id
    pub user_id: String,
    /// Login email
    #[serde(alias = "email")]
    pub correo: String,
    /// Role
    #[serde(alias = "role")]
    pub tipo: Role,
    /// Expiry as seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Projects the claims onto the user profile.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id.clone(),
            email: self.correo.clone(),
            role: self.tipo,
        }
    }

    /// Expiry instant, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Returns true if `exp` is present and `now + leeway` has reached it.
    /// A leeway too large to represent counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_secs: i64) -> bool {
        self.expires_at().is_some_and(|expires_at| {
            chrono::Duration::try_seconds(leeway_secs)
                .and_then(|leeway| now.checked_add_signed(leeway))
                .is_none_or(|deadline| deadline >= expires_at)
        })
    }

    /// Builds an unsigned token carrying these claims.
    #[cfg(any(test, feature = "fixtures"))]
    #[must_use]
    pub fn to_unsigned_token(&self) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = serde_json::to_vec(self).unwrap_or_default();
        format!("{header}.{}.unsigned", URL_SAFE_NO_PAD.encode(payload))
    }
}

/// Decodes and validates the claims segment of a token.
///
/// # Errors
///
/// Returns a `TokenError` if the token is structurally wrong, the payload is
/// not base64, or the JSON does not match the claims schema.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(TokenError::MissingSegment {
            found: segments.iter().filter(|s| !s.is_empty()).count(),
        });
    }

    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|e| TokenError::InvalidBase64(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::InvalidClaims(e.to_string()))
}

/// Decodes the user profile carried by a token.
///
/// # Errors
///
/// See [`decode_claims`].
pub fn decode_token(token: &str) -> Result<UserProfile, TokenError> {
    decode_claims(token).map(|claims| claims.profile())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token_with_payload(payload: &[u8]) -> String {
        format!("aGVhZGVy.{}.c2ln", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_round_trip() {
        for (id, email, role) in [
            ("65f01a", "ana@uni.edu", Role::Student),
            ("1", "root@uni.edu", Role::Admin),
            ("ñandú-7", "ñ@uni.edu", Role::Student),
        ] {
            let claims = Claims {
                user_id: id.to_string(),
                correo: email.to_string(),
                tipo: role,
                exp: Some(1_900_000_000),
            };
            let user = decode_token(&claims.to_unsigned_token()).unwrap();
            assert_eq!(
                user,
                UserProfile {
                    id: id.to_string(),
                    email: email.to_string(),
                    role,
                }
            );
        }
    }

    #[test]
    fn test_decode_backend_token_shape() {
        let token = token_with_payload(
            br#"{"user_id":"65f0","correo":"ana@uni.edu","tipo":"usuario","exp":1700000000}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.tipo, Role::Student);
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn test_decode_accepts_english_aliases() {
        let token = token_with_payload(br#"{"user_id":"9","email":"x@uni.edu","role":"admin"}"#);
        let user = decode_token(&token).unwrap();
        assert_eq!(user.email, "x@uni.edu");
        assert!(user.is_admin());
    }

    #[test]
    fn test_decode_accepts_standard_padded_base64() {
        use base64::engine::general_purpose::STANDARD;
        let payload = STANDARD.encode(br#"{"user_id":"1","correo":"a@b.c","tipo":"admin"}"#);
        let token = format!("h.{payload}.s");
        assert!(decode_token(&token).is_ok());
    }

    #[test]
    fn test_missing_segment() {
        assert_eq!(
            decode_token("only-one"),
            Err(TokenError::MissingSegment { found: 1 })
        );
        assert_eq!(decode_token(""), Err(TokenError::MissingSegment { found: 0 }));
        assert!(matches!(
            decode_token("a..c"),
            Err(TokenError::MissingSegment { found: 2 })
        ));
        assert!(matches!(
            decode_token("a.b.c.d"),
            Err(TokenError::MissingSegment { .. })
        ));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_token("a.!!!not base64!!!.c"),
            Err(TokenError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_invalid_json_and_schema() {
        let not_json = token_with_payload(b"not json");
        assert!(matches!(decode_token(&not_json), Err(TokenError::InvalidClaims(_))));

        let missing_role = token_with_payload(br#"{"user_id":"1","correo":"a@b.c"}"#);
        assert!(matches!(decode_token(&missing_role), Err(TokenError::InvalidClaims(_))));

        let unknown_role = token_with_payload(br#"{"user_id":"1","correo":"a@b.c","tipo":"x"}"#);
        assert!(matches!(decode_token(&unknown_role), Err(TokenError::InvalidClaims(_))));

        let numeric_id = token_with_payload(br#"{"user_id":1,"correo":"a@b.c","tipo":"admin"}"#);
        assert!(matches!(decode_token(&numeric_id), Err(TokenError::InvalidClaims(_))));
    }

    #[test]
    fn test_expiry() {
        let claims = Claims {
            user_id: "1".to_string(),
            correo: "a@b.c".to_string(),
            tipo: Role::Admin,
            exp: Some(1_000),
        };
        let before = DateTime::from_timestamp(900, 0).unwrap();
        let after = DateTime::from_timestamp(1_000, 0).unwrap();
        assert!(!claims.is_expired_at(before, 0));
        assert!(claims.is_expired_at(before, 100));
        assert!(claims.is_expired_at(after, 0));

        let no_exp = Claims { exp: None, ..claims };
        assert!(!no_exp.is_expired_at(after, 10_000));
    }

    #[test]
    fn test_expiry_with_out_of_range_leeway() {
        let claims = Claims {
            user_id: "1".to_string(),
            correo: "a@b.c".to_string(),
            tipo: Role::Student,
            exp: Some(1_000),
        };
        let now = DateTime::from_timestamp(900, 0).unwrap();
        assert!(claims.is_expired_at(now, i64::MAX));
        assert!(claims.is_expired_at(now, i64::MIN));

        let policy: crate::auth::ExpiryPolicy =
            serde_json::from_str(r#"{"mode":"local_exp","leeway_secs":9223372036854775807}"#)
                .unwrap();
        assert!(policy.is_expired(&claims, now));
    }
}
