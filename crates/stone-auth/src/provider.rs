//! The identity provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stone_catalog::ids::UserId;

use crate::error::AuthResult;

/// A signed-in identity as the provider reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// The name shown in the header; `"User"` when none is set.
    pub fn display_name_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("User")
    }
}

/// Federated identity providers the storefront offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Federated {
    Google,
}

impl Federated {
    pub fn as_str(&self) -> &'static str {
        match self {
            Federated::Google => "google",
        }
    }
}

/// Hosted identity provider seam.
///
/// Implementations wrap whichever identity service the deployment uses.
/// Failures map onto [`crate::AuthError`] so the login form can show the
/// matching friendly message regardless of provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account and sign it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<AuthUser>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser>;

    /// Sign in through a federated provider.
    async fn sign_in_federated(&self, provider: Federated) -> AuthResult<AuthUser>;

    /// End the current session.
    async fn sign_out(&self) -> AuthResult<()>;
}
