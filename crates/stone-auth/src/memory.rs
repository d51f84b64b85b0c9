//! In-memory identity provider for development and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use stone_catalog::ids::UserId;

use crate::error::{AuthError, AuthResult};
use crate::password::PasswordHasher;
use crate::provider::{AuthProvider, AuthUser, Federated};

/// Failed sign-ins allowed before an account locks.
const MAX_FAILED_ATTEMPTS: u32 = 5;

/// How long a lockout lasts, in seconds.
const LOCKOUT_SECS: i64 = 900;

#[derive(Debug, Clone)]
struct StoredUser {
    uid: UserId,
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
    /// None for accounts created through a federated provider.
    password_hash: Option<String>,
    disabled: bool,
    failed_attempts: u32,
    locked_until: Option<i64>,
}

impl StoredUser {
    fn is_locked(&self, now: i64) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    fn to_auth_user(&self) -> AuthUser {
        AuthUser {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct FederatedProfile {
    email: String,
    display_name: String,
    photo_url: Option<String>,
}

#[derive(Default)]
struct Inner {
    /// Accounts keyed by lowercased email.
    users: HashMap<String, StoredUser>,
    /// What each federated provider reports on sign-in.
    federated: HashMap<Federated, FederatedProfile>,
    offline: bool,
    next_uid: u64,
}

/// [`AuthProvider`] backed by process memory.
///
/// Mirrors the behavior of a hosted provider closely enough to exercise
/// every login-form path: duplicate emails, wrong passwords, disabled
/// accounts, lockout after repeated failures, and simulated outages.
pub struct MemoryAuth {
    inner: Mutex<Inner>,
    hasher: PasswordHasher,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            hasher: PasswordHasher::default(),
        }
    }

    /// Use a custom hasher; tests drop the iteration count.
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Set the profile a federated sign-in will return.
    pub fn with_federated_profile(
        self,
        provider: Federated,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.lock().federated.insert(
            provider,
            FederatedProfile {
                email: email.into(),
                display_name: display_name.into(),
                photo_url: None,
            },
        );
        self
    }

    /// Simulate the provider being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Disable an account, as an operator would in the provider console.
    pub fn disable_account(&self, email: &str) {
        if let Some(user) = self.lock().users.get_mut(&email.to_lowercase()) {
            user.disabled = true;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn checked(&self) -> AuthResult<MutexGuard<'_, Inner>> {
        let inner = self.lock();
        if inner.offline {
            return Err(AuthError::NetworkFailure(
                "auth provider offline".to_string(),
            ));
        }
        Ok(inner)
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<AuthUser> {
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        PasswordHasher::validate_password(password)?;
        let hash = self.hasher.hash(password)?;

        let mut inner = self.checked()?;
        let key = email.to_lowercase();
        if inner.users.contains_key(&key) {
            return Err(AuthError::EmailAlreadyInUse(email.to_string()));
        }

        let user = StoredUser {
            uid: next_uid(&mut inner),
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
            photo_url: None,
            password_hash: Some(hash),
            disabled: false,
            failed_attempts: 0,
            locked_until: None,
        };
        let auth_user = user.to_auth_user();
        inner.users.insert(key, user);

        Ok(auth_user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }

        let mut inner = self.checked()?;
        let now = current_timestamp();
        let user = inner
            .users
            .get_mut(&email.to_lowercase())
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

        if user.disabled {
            return Err(AuthError::UserDisabled(email.to_string()));
        }
        if user.is_locked(now) {
            return Err(AuthError::TooManyRequests);
        }

        // Accounts provisioned through a federated provider have no password.
        let stored = user
            .password_hash
            .clone()
            .ok_or(AuthError::WrongPassword)?;

        if self.hasher.verify(password, &stored)? {
            user.failed_attempts = 0;
            user.locked_until = None;
            Ok(user.to_auth_user())
        } else {
            user.failed_attempts += 1;
            if user.failed_attempts >= MAX_FAILED_ATTEMPTS {
                user.locked_until = Some(now + LOCKOUT_SECS);
            }
            Err(AuthError::WrongPassword)
        }
    }

    async fn sign_in_federated(&self, provider: Federated) -> AuthResult<AuthUser> {
        let mut inner = self.checked()?;
        let profile = inner
            .federated
            .get(&provider)
            .cloned()
            .ok_or_else(|| {
                AuthError::Provider(format!("{} sign-in is not configured", provider.as_str()))
            })?;

        let key = profile.email.to_lowercase();
        if let Some(user) = inner.users.get(&key) {
            return Ok(user.to_auth_user());
        }

        let user = StoredUser {
            uid: next_uid(&mut inner),
            email: profile.email,
            display_name: Some(profile.display_name),
            photo_url: profile.photo_url,
            password_hash: None,
            disabled: false,
            failed_attempts: 0,
            locked_until: None,
        };
        let auth_user = user.to_auth_user();
        inner.users.insert(key, user);

        Ok(auth_user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        // Ending a session is local; it works even when the provider is
        // unreachable.
        Ok(())
    }
}

fn next_uid(inner: &mut Inner) -> UserId {
    inner.next_uid += 1;
    UserId::new(format!("user_{}", inner.next_uid))
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// Helper to get current timestamp (seconds since epoch)
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
