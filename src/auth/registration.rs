//! User registration for filedepot.

use tracing::info;

use crate::auth::hash_password;
use crate::db::{DbPool, NewUser, User, UserRepository, ALREADY_EXIST};
use crate::{DepotError, Result};

/// Register a new user.
///
/// Checks run in a fixed order: email present, password present, email
/// not yet taken. Empty strings count as missing. The password is stored
/// as an Argon2id hash.
///
/// # Examples
///
/// ```ignore
/// use filedepot::auth::register;
/// use filedepot::db::Database;
///
/// let db = Database::open_in_memory().await?;
/// let user = register(db.pool(), Some("bob@dylan.com"), Some("toto1234!")).await?;
/// println!("Registered user {}", user.id);
/// ```
pub async fn register(pool: &DbPool, email: Option<&str>, password: Option<&str>) -> Result<User> {
    let email = email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| DepotError::Validation("Missing email".to_string()))?;
    let password = password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| DepotError::Validation("Missing password".to_string()))?;

    let repo = UserRepository::new(pool);
    if repo.get_by_email(email).await?.is_some() {
        return Err(DepotError::Conflict(ALREADY_EXIST.to_string()));
    }

    let password_hash = hash_password(password)?;

    // The unique index still guards against a concurrent insert.
    let user = repo.create(&NewUser::new(email, password_hash)).await?;

    info!(user_id = user.id, email = %user.email, "New user registered");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::Database;

    #[tokio::test]
    async fn test_register_success() {
        let db = Database::open_in_memory().await.unwrap();

        let user = register(db.pool(), Some("bob@dylan.com"), Some("toto1234!"))
            .await
            .unwrap();

        assert!(user.id > 0);
        assert_eq!(user.email, "bob@dylan.com");
        assert_ne!(user.password, "toto1234!");
        assert!(verify_password("toto1234!", &user.password).is_ok());
    }

    #[tokio::test]
    async fn test_register_missing_email() {
        let db = Database::open_in_memory().await.unwrap();

        for email in [None, Some("")] {
            let result = register(db.pool(), email, None).await;
            match result {
                Err(DepotError::Validation(msg)) => assert_eq!(msg, "Missing email"),
                other => panic!("Expected Missing email, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_register_missing_password() {
        let db = Database::open_in_memory().await.unwrap();

        let result = register(db.pool(), Some("bob@dylan.com"), None).await;
        match result {
            Err(DepotError::Validation(msg)) => assert_eq!(msg, "Missing password"),
            other => panic!("Expected Missing password, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = Database::open_in_memory().await.unwrap();

        register(db.pool(), Some("bob@dylan.com"), Some("toto1234!"))
            .await
            .unwrap();
        let result = register(db.pool(), Some("bob@dylan.com"), Some("other")).await;

        match result {
            Err(DepotError::Conflict(msg)) => assert_eq!(msg, "Already exist"),
            other => panic!("Expected Already exist, got {other:?}"),
        }

        let count = UserRepository::new(db.pool()).count().await.unwrap();
        assert_eq!(count, 1);
    }
}
