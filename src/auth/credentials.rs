//! Basic-auth credential verification.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use super::password::verify_password;
use crate::db::{DbPool, UserRepository};
use crate::{DepotError, Result};

/// Email and password decoded from a `Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Decode an `Authorization: Basic <base64(email:password)>` value.
///
/// The decoded text is split on the first colon, so passwords may
/// themselves contain colons. Returns `None` for anything malformed.
pub fn parse_basic_auth(header: &str) -> Option<Credentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;

    Some(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Verifies `Basic` credentials against stored users.
pub struct CredentialVerifier<'a> {
    pool: &'a DbPool,
}

impl<'a> CredentialVerifier<'a> {
    /// Create a verifier over the given pool.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Resolve an `Authorization` header to a user ID.
    ///
    /// Every failure, including a missing header, is `Unauthorized`.
    pub async fn verify(&self, header: Option<&str>) -> Result<i64> {
        let credentials = header
            .and_then(parse_basic_auth)
            .ok_or(DepotError::Unauthorized)?;

        let user = UserRepository::new(self.pool)
            .get_by_email(&credentials.email)
            .await?
            .ok_or_else(|| {
                debug!("No user for supplied credentials");
                DepotError::Unauthorized
            })?;

        verify_password(&credentials.password, &user.password).map_err(|e| {
            debug!(user_id = user.id, error = %e, "Password check failed");
            DepotError::Unauthorized
        })?;

        Ok(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::db::{Database, NewUser};

    #[test]
    fn test_parse_basic_auth() {
        // base64("bob@dylan.com:toto1234!")
        let creds = parse_basic_auth("Basic Ym9iQGR5bGFuLmNvbTp0b3RvMTIzNCE=").unwrap();
        assert_eq!(creds.email, "bob@dylan.com");
        assert_eq!(creds.password, "toto1234!");
    }

    #[test]
    fn test_parse_basic_auth_splits_on_first_colon() {
        let header = format!("Basic {}", STANDARD.encode("a@b.c:pa:ss"));
        let creds = parse_basic_auth(&header).unwrap();
        assert_eq!(creds.email, "a@b.c");
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_parse_basic_auth_malformed() {
        assert!(parse_basic_auth("").is_none());
        assert!(parse_basic_auth("Basic").is_none());
        assert!(parse_basic_auth("Bearer Ym9iQGR5bGFuLmNvbTp0b3RvMTIzNCE=").is_none());
        assert!(parse_basic_auth("Basic !!!not-base64!!!").is_none());
        let no_colon = format!("Basic {}", STANDARD.encode("no-colon-here"));
        assert!(parse_basic_auth(&no_colon).is_none());
    }

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let hash = hash_password("toto1234!").unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("bob@dylan.com", hash))
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_verify_success() {
        let (db, user_id) = setup().await;
        let verifier = CredentialVerifier::new(db.pool());

        let id = verifier
            .verify(Some("Basic Ym9iQGR5bGFuLmNvbTp0b3RvMTIzNCE="))
            .await
            .unwrap();
        assert_eq!(id, user_id);
    }

    #[tokio::test]
    async fn test_verify_failures_are_unauthorized() {
        let (db, _) = setup().await;
        let verifier = CredentialVerifier::new(db.pool());

        let wrong_password = format!("Basic {}", STANDARD.encode("bob@dylan.com:nope"));
        let unknown_user = format!("Basic {}", STANDARD.encode("who@where.com:toto1234!"));

        for header in [None, Some("garbage"), Some(wrong_password.as_str()), Some(unknown_user.as_str())] {
            let result = verifier.verify(header).await;
            assert!(matches!(result, Err(DepotError::Unauthorized)), "{header:?}");
        }
    }
}
