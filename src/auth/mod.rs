//! Authentication module for filedepot.
//!
//! This module provides password hashing, Basic credential verification,
//! cache-backed session tokens and user registration.

mod credentials;
mod password;
mod registration;
mod session;

pub use credentials::{parse_basic_auth, CredentialVerifier, Credentials};
pub use password::{hash_password, verify_password, PasswordError};
pub use registration::register;
pub use session::{SessionToken, SessionTokenManager, SESSION_DURATION_SECS};
