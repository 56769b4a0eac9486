//! Identity provider seam.
//!
//! The workflow only needs three things from the identity service: exchange an
//! email/password pair for a [`Principal`], forget the current session, and
//! delete the account behind a principal. Tests swap in fakes through the
//! [`IdentityProvider`] trait; production uses [`rest::RestIdentityProvider`].

pub mod rest;

use async_trait::async_trait;
use secrecy::SecretString;
use std::fmt;
use thiserror::Error;

pub use self::rest::RestIdentityProvider;

/// The authenticated identity returned by a successful sign-in.
#[derive(Clone)]
pub struct Principal {
    pub uid: String,
    pub email: String,
    /// Bearer credential authorizing calls made on behalf of the user.
    pub id_token: SecretString,
}

impl Principal {
    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>, id_token: SecretString) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            id_token,
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("id_token", &"***")
            .finish()
    }
}

/// Why a credential sign-in was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("user disabled")]
    UserDisabled,
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("too many requests")]
    TooManyRequests,
    #[error("network request failed: {0}")]
    NetworkRequestFailed(String),
    #[error("invalid credential")]
    InvalidCredential,
    #[error("sign-in failed: {0}")]
    Other(String),
}

impl SignInError {
    /// Stable error code, used as the lookup key for user-facing messages.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidEmail => "auth/invalid-email",
            Self::UserDisabled => "auth/user-disabled",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::NetworkRequestFailed(_) => "auth/network-request-failed",
            Self::InvalidCredential => "auth/invalid-credential",
            Self::Other(code) => code,
        }
    }
}

/// Why deleting the account itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountErasureError {
    /// The session is too old for a sensitive operation; the user must sign in again.
    #[error("requires recent login")]
    RequiresRecentLogin,
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an email and password for a principal.
    async fn sign_in(&self, email: &str, password: &SecretString)
        -> Result<Principal, SignInError>;

    /// Forget the current session. Best-effort, never fails from the caller's view.
    async fn sign_out(&self);

    /// Delete the account behind `principal`.
    async fn delete_account(&self, principal: &Principal) -> Result<(), AccountErasureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_error_codes_are_stable() {
        let cases = [
            (SignInError::InvalidEmail, "auth/invalid-email"),
            (SignInError::UserDisabled, "auth/user-disabled"),
            (SignInError::UserNotFound, "auth/user-not-found"),
            (SignInError::WrongPassword, "auth/wrong-password"),
            (SignInError::TooManyRequests, "auth/too-many-requests"),
            (
                SignInError::NetworkRequestFailed("timeout".to_string()),
                "auth/network-request-failed",
            ),
            (SignInError::InvalidCredential, "auth/invalid-credential"),
            (
                SignInError::Other("auth/operation-not-allowed".to_string()),
                "auth/operation-not-allowed",
            ),
        ];

        for (error, code) in cases {
            assert_eq!(error.code(), code);
        }
    }

    #[test]
    fn principal_debug_hides_token() {
        let principal = Principal::new("u1", "a@b.com", SecretString::from("secret".to_string()));
        let debug = format!("{principal:?}");
        assert!(debug.contains("u1"));
        assert!(!debug.contains("secret"));
    }
}
