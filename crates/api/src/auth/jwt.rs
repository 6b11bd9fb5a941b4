//! Verification of the backend-issued access token.
//!
//! The clinic backend signs HS256 tokens with a shared key; this server only
//! ever verifies them. A token that fails verification never aborts a
//! request: the caller treats it as anonymous.

use clinic_core::forms::de;
use clinic_core::identity::Identity;
use clinic_core::roles::{Role, RoleSet};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Configuration for access-token verification.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 key shared with the backend.
    pub access_key: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").field("access_key", &"<redacted>").finish()
    }
}

/// `role` is a single name for single-role accounts and a list otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    pub fn names(&self) -> &[String] {
        match self {
            RoleClaim::One(name) => std::slice::from_ref(name),
            RoleClaim::Many(names) => names,
        }
    }
}

/// Claims the backend embeds in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The account email.
    pub sub: String,
    /// Unique token identifier.
    pub jti: String,
    /// Backend user id; sent as a string or a number.
    #[serde(default, deserialize_with = "de::string")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Known roles in the `role` claim. Unknown names are skipped.
    pub fn roles(&self) -> RoleSet {
        let mut roles = RoleSet::EMPTY;
        for name in self.role.iter().flat_map(RoleClaim::names) {
            match name.parse::<Role>() {
                Ok(role) if !role.is_sentinel() => roles.insert(role),
                _ => tracing::warn!(role = %name, "Ignoring unknown role in access token"),
            }
        }
        roles
    }

    pub fn into_identity(self, token: String) -> Identity {
        let roles = self.roles();
        Identity::new(
            self.user_id.unwrap_or_default(),
            self.sub,
            self.jti,
            roles,
            token,
        )
    }
}

/// Why a token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token không hợp lệ: {0}")]
    Invalid(String),

    #[error("Token đã hết hạn")]
    Expired,
}

impl TokenError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Invalid(_) => "invalid",
            TokenError::Expired => "expired",
        }
    }
}

/// Verify the signature and time claims of an access token.
pub fn decode_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_nbf = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.access_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })
}

/// Decode a token straight into the request identity.
pub fn resolve_identity(token: &str, config: &JwtConfig) -> Result<Identity, TokenError> {
    decode_token(token, config).map(|claims| claims.into_identity(token.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            access_key: "test-secret-that-is-long-enough-for-hmac".to_string(),
        }
    }

    fn sign(claims: serde_json::Value, key: &str) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn single_role_claim_becomes_a_role_set() {
        let token = sign(
            json!({
                "sub": "bacsi@phongkham.vn",
                "jti": "a1",
                "userId": "17",
                "role": "doctor",
                "exp": now() + 600,
                "iat": now(),
            }),
            &config().access_key,
        );

        let identity = resolve_identity(&token, &config()).unwrap();
        assert_eq!(identity.id, "17");
        assert_eq!(identity.email, "bacsi@phongkham.vn");
        assert_eq!(identity.uid, "a1");
        assert!(identity.has_role(Role::Doctor));
        assert!(!identity.is_patient);
        assert_eq!(identity.token, token);
    }

    #[test]
    fn role_list_and_numeric_user_id() {
        let token = sign(
            json!({
                "sub": "a@b.vn",
                "jti": "a2",
                "userId": 5,
                "role": ["admin", "accountant", "janitor"],
                "exp": now() + 600,
            }),
            &config().access_key,
        );

        let claims = decode_token(&token, &config()).unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("5"));
        assert_eq!(claims.roles(), RoleSet::of(&[Role::Admin, Role::Accountant]));
    }

    #[test]
    fn patient_role_sets_the_patient_flag() {
        let token = sign(
            json!({ "sub": "bn@b.vn", "jti": "a3", "userId": "9", "role": "patient", "exp": now() + 600 }),
            &config().access_key,
        );
        assert!(resolve_identity(&token, &config()).unwrap().is_patient);
    }

    #[test]
    fn expired_token_is_distinguished() {
        let token = sign(
            json!({ "sub": "a@b.vn", "jti": "x", "exp": now() - 300, "iat": now() - 600 }),
            &config().access_key,
        );
        assert_matches!(decode_token(&token, &config()), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let token = sign(
            json!({ "sub": "a@b.vn", "jti": "x", "exp": now() + 600 }),
            "another-secret",
        );
        assert_matches!(decode_token(&token, &config()), Err(TokenError::Invalid(_)));
        assert_matches!(decode_token("not-a-token", &config()), Err(TokenError::Invalid(_)));
    }
}
