//! Authentication errors.

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error type.
///
/// Variants mirror the failure codes hosted identity providers report, so
/// any provider behind [`crate::AuthProvider`] can map onto them.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The account exists but has been disabled.
    #[error("account disabled: {0}")]
    UserDisabled(String),

    /// No account matches the email.
    #[error("no account for email: {0}")]
    UserNotFound(String),

    /// The password does not match.
    #[error("wrong password")]
    WrongPassword,

    /// An account already exists for the email.
    #[error("email already in use: {0}")]
    EmailAlreadyInUse(String),

    /// The password fails the provider's strength rule.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// The provider could not be reached.
    #[error("network request failed: {0}")]
    NetworkFailure(String),

    /// Repeated failures tripped the provider's rate limit.
    #[error("too many failed attempts")]
    TooManyRequests,

    /// Any other provider-reported failure.
    #[error("provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// The message shown at the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Invalid email address format.".to_string(),
            Self::UserDisabled(_) => "This account has been disabled.".to_string(),
            Self::UserNotFound(_) => "No account found with this email.".to_string(),
            Self::WrongPassword => "Incorrect password. Please try again.".to_string(),
            Self::EmailAlreadyInUse(_) => {
                "An account with this email already exists.".to_string()
            }
            Self::WeakPassword(_) => "Password should be at least 6 characters.".to_string(),
            Self::NetworkFailure(_) => "Network error. Please check your connection.".to_string(),
            Self::TooManyRequests => {
                "Too many failed attempts. Please try again later.".to_string()
            }
            Self::Provider(message) => {
                if message.is_empty() {
                    "An unexpected error occurred.".to_string()
                } else {
                    message.clone()
                }
            }
        }
    }

    /// True when different credentials could succeed.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::WrongPassword | Self::UserNotFound(_) | Self::InvalidEmail(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AuthError::InvalidEmail("x".to_string()).user_message(),
            "Invalid email address format."
        );
        assert_eq!(
            AuthError::WrongPassword.user_message(),
            "Incorrect password. Please try again."
        );
        assert_eq!(
            AuthError::WeakPassword("too short".to_string()).user_message(),
            "Password should be at least 6 characters."
        );
        assert_eq!(
            AuthError::TooManyRequests.user_message(),
            "Too many failed attempts. Please try again later."
        );
    }

    #[test]
    fn test_provider_message_passes_through() {
        let err = AuthError::Provider("Popup closed by user.".to_string());
        assert_eq!(err.user_message(), "Popup closed by user.");

        let err = AuthError::Provider(String::new());
        assert_eq!(err.user_message(), "An unexpected error occurred.");
    }

    #[test]
    fn test_credential_failures() {
        assert!(AuthError::WrongPassword.is_credential_failure());
        assert!(AuthError::UserNotFound("a@b.c".to_string()).is_credential_failure());
        assert!(!AuthError::TooManyRequests.is_credential_failure());
    }
}
