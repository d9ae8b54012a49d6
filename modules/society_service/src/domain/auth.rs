//! Password hashing and session tokens

use crate::contract::{AuthContext, Credential, Role, SocietyError};
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hash a password into an Argon2id PHC string with a fresh random salt
pub fn hash_password(profile_id: Uuid, password: &str) -> Result<Credential, SocietyError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            SocietyError::Internal
        })?
        .to_string();

    Ok(Credential {
        profile_id,
        password_hash,
    })
}

/// Check a password against a stored credential
pub fn verify_password(credential: &Credential, password: &str) -> bool {
    let parsed = match PasswordHash::new(&credential.password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(
                profile_id = %credential.profile_id,
                error = %e,
                "stored password hash is malformed"
            );
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// JWT claims carried by session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Issue a token for a profile, returning it with its expiry
    pub fn issue(
        &self,
        profile_id: Uuid,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), SocietyError> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            tracing::error!(ttl = %self.ttl, "session expiry out of range");
            SocietyError::Internal
        })?;
        let claims = Claims {
            sub: profile_id.to_string(),
            role: role.as_str().to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "failed to sign session token");
            SocietyError::Internal
        })?;

        Ok((token, expires_at))
    }

    /// Verify a token and extract the caller
    pub fn verify(&self, token: &str) -> Result<AuthContext, SocietyError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            SocietyError::Unauthorized
        })?;

        let profile_id =
            Uuid::parse_str(&data.claims.sub).map_err(|_| SocietyError::Unauthorized)?;
        let role = Role::parse(&data.claims.role).ok_or(SocietyError::Unauthorized)?;

        Ok(AuthContext { profile_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-0123456789", "society-hub", Duration::hours(1))
    }

    #[test]
    fn test_password_roundtrip() {
        let id = Uuid::new_v4();
        let credential = hash_password(id, "correct horse").unwrap();
        assert_eq!(credential.profile_id, id);
        assert!(credential.password_hash.starts_with("$argon2id$"));
        assert!(!credential.password_hash.contains("correct horse"));
        assert!(verify_password(&credential, "correct horse"));
        assert!(!verify_password(&credential, "correct horsE"));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let id = Uuid::new_v4();
        let a = hash_password(id, "correct horse").unwrap();
        let b = hash_password(id, "correct horse").unwrap();
        assert_ne!(a.password_hash, b.password_hash);
        assert!(verify_password(&b, "correct horse"));
    }

    #[test]
    fn test_legacy_or_malformed_hash_never_verifies() {
        let credential = Credential {
            profile_id: Uuid::new_v4(),
            password_hash: "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
                .to_string(),
        };
        assert!(!verify_password(&credential, "test"));
        assert!(!verify_password(&credential, ""));
    }

    #[test]
    fn test_token_verifies_to_same_caller() {
        let issuer = issuer();
        let id = Uuid::new_v4();
        let (token, expires_at) = issuer.issue(id, Role::Admin, Utc::now()).unwrap();

        assert!(expires_at > Utc::now());
        let auth = issuer.verify(&token).unwrap();
        assert_eq!(auth, AuthContext::admin(id));
    }

    #[test]
    fn test_expiry_past_calendar_end_is_an_error() {
        let issuer = issuer();
        let result = issuer.issue(Uuid::new_v4(), Role::Admin, DateTime::<Utc>::MAX_UTC);
        assert_eq!(result, Err(SocietyError::Internal));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = issuer();
        let issued_at = Utc::now() - Duration::hours(3);
        let (token, _) = issuer.issue(Uuid::new_v4(), Role::Tenant, issued_at).unwrap();

        assert_eq!(issuer.verify(&token), Err(SocietyError::Unauthorized));
    }

    #[test]
    fn test_token_from_other_secret_or_issuer_is_rejected() {
        let (token, _) = issuer()
            .issue(Uuid::new_v4(), Role::Tenant, Utc::now())
            .unwrap();

        let other_secret = TokenIssuer::new("another-secret-xyz", "society-hub", Duration::hours(1));
        assert_eq!(other_secret.verify(&token), Err(SocietyError::Unauthorized));

        let other_issuer =
            TokenIssuer::new("test-secret-0123456789", "elsewhere", Duration::hours(1));
        assert_eq!(other_issuer.verify(&token), Err(SocietyError::Unauthorized));

        assert_eq!(issuer().verify("not-a-token"), Err(SocietyError::Unauthorized));
    }
}
