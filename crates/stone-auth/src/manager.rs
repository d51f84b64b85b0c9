//! Session orchestration.
//!
//! [`AuthManager`] wraps the identity provider, mirrors the resulting
//! session state for the header to render, and maintains the per-user
//! bookkeeping document in the `users` collection. The provider session is
//! the source of truth: a store outage never blocks a sign-in, it only
//! costs the bookkeeping write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use stone_observability::StructuredLogger;
use stone_store::{DocumentStore, StoreResult};

use crate::error::AuthResult;
use crate::provider::{AuthProvider, AuthUser, Federated};
use crate::view::{AuthVisibility, ProfileView};

/// Collection holding per-user bookkeeping documents.
pub const USERS_COLLECTION: &str = "users";

/// Whether somebody is signed in.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn(AuthUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            SessionState::SignedIn(user) => Some(user),
            SessionState::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }
}

/// Wraps a provider and keeps the session state it reports.
pub struct AuthManager<P: AuthProvider + ?Sized, S: DocumentStore + ?Sized> {
    provider: Arc<P>,
    store: Arc<S>,
    state: Mutex<SessionState>,
    logger: StructuredLogger,
}

impl<P, S> AuthManager<P, S>
where
    P: AuthProvider + ?Sized,
    S: DocumentStore + ?Sized,
{
    pub fn new(provider: Arc<P>, store: Arc<S>) -> Self {
        Self {
            provider,
            store,
            state: Mutex::new(SessionState::SignedOut),
            logger: StructuredLogger::new("auth"),
        }
    }

    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Register a new account and sign it in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> AuthResult<AuthUser> {
        let user = self.provider.sign_up(email, password, display_name).await?;
        self.ensure_user_document(&user).await;
        self.set_state(SessionState::SignedIn(user.clone()));

        self.logger
            .info_builder("signed up")
            .field("uid", user.uid.as_str())
            .emit();

        Ok(user)
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        let user = self.provider.sign_in(email, password).await?;
        self.ensure_user_document(&user).await;
        self.set_state(SessionState::SignedIn(user.clone()));

        self.logger
            .info_builder("signed in")
            .field("uid", user.uid.as_str())
            .emit();

        Ok(user)
    }

    /// Sign in through a federated provider.
    pub async fn sign_in_federated(&self, federated: Federated) -> AuthResult<AuthUser> {
        let user = self.provider.sign_in_federated(federated).await?;
        self.ensure_user_document(&user).await;
        self.set_state(SessionState::SignedIn(user.clone()));

        self.logger
            .info_builder("signed in")
            .field("uid", user.uid.as_str())
            .field("via", federated.as_str())
            .emit();

        Ok(user)
    }

    /// End the session.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.provider.sign_out().await?;
        self.set_state(SessionState::SignedOut);
        self.logger.info("signed out");
        Ok(())
    }

    /// The current session state.
    pub fn session(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.lock().user().cloned()
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().is_signed_in()
    }

    /// What the header should show right now.
    pub fn visibility(&self) -> AuthVisibility {
        AuthVisibility::for_session(&self.lock())
    }

    /// Profile widget contents, when signed in.
    pub fn profile(&self) -> Option<ProfileView> {
        self.lock().user().map(ProfileView::for_user)
    }

    /// Create the user's document on first sign-in, refresh `lastLogin`
    /// afterwards. Best-effort: store trouble is logged, never surfaced.
    async fn ensure_user_document(&self, user: &AuthUser) {
        if let Err(err) = self.upsert_user_document(user).await {
            self.logger
                .with_collection(USERS_COLLECTION)
                .warn_builder("user document write failed")
                .field("uid", user.uid.as_str())
                .field("error", err.to_string())
                .emit();
        }
    }

    async fn upsert_user_document(&self, user: &AuthUser) -> StoreResult<()> {
        let uid = Value::from(user.uid.as_str());
        let existing = self
            .store
            .filtered(USERS_COLLECTION, "uid", &uid)
            .await?;
        let now = current_timestamp();

        match existing.first() {
            Some(doc) => {
                let mut fields = Map::new();
                fields.insert("lastLogin".to_string(), Value::from(now));
                self.store.update(USERS_COLLECTION, &doc.id, fields).await
            }
            None => {
                let mut fields = Map::new();
                fields.insert("uid".to_string(), uid);
                fields.insert("email".to_string(), Value::from(user.email.as_str()));
                fields.insert(
                    "displayName".to_string(),
                    match &user.display_name {
                        Some(name) => Value::from(name.as_str()),
                        None => Value::Null,
                    },
                );
                fields.insert("createdAt".to_string(), Value::from(now));
                fields.insert("lastLogin".to_string(), Value::from(now));
                self.store.add(USERS_COLLECTION, fields).await.map(|_| ())
            }
        }
    }

    fn set_state(&self, next: SessionState) {
        *self.lock() = next;
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Helper to get current timestamp (seconds since epoch)
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::memory::MemoryAuth;
    use crate::password::PasswordHasher;
    use stone_store::MemoryStore;

    fn manager() -> (Arc<MemoryStore>, AuthManager<MemoryAuth, MemoryStore>) {
        let provider = Arc::new(MemoryAuth::new().with_hasher(PasswordHasher::new(50)));
        let store = Arc::new(MemoryStore::new());
        let manager = AuthManager::new(provider, store.clone());
        (store, manager)
    }

    #[tokio::test]
    async fn test_sign_up_writes_one_user_document() {
        let (store, manager) = manager();

        let user = manager
            .sign_up("irya@stonecraft.example", "quarry7", Some("Irya"))
            .await
            .unwrap();

        let docs = store.list(USERS_COLLECTION).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].str_field("uid"), Some(user.uid.as_str()));
        assert_eq!(docs[0].str_field("email"), Some("irya@stonecraft.example"));
        assert_eq!(docs[0].str_field("displayName"), Some("Irya"));
        assert!(docs[0].i64_field("createdAt").is_some());
        assert!(docs[0].i64_field("lastLogin").is_some());
    }

    #[tokio::test]
    async fn test_repeat_sign_in_refreshes_instead_of_duplicating() {
        let (store, manager) = manager();
        manager
            .sign_up("irya@stonecraft.example", "quarry7", Some("Irya"))
            .await
            .unwrap();

        // Age the bookkeeping document, then sign in again.
        let doc_id = store.list(USERS_COLLECTION).await.unwrap()[0].id.clone();
        let mut stale = Map::new();
        stale.insert("lastLogin".to_string(), Value::from(0));
        store
            .update(USERS_COLLECTION, &doc_id, stale)
            .await
            .unwrap();

        manager
            .sign_in("irya@stonecraft.example", "quarry7")
            .await
            .unwrap();

        let docs = store.list(USERS_COLLECTION).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].i64_field("lastLogin").unwrap() > 0);
    }

    #[tokio::test]
    async fn test_store_outage_does_not_block_sign_in() {
        let (store, manager) = manager();
        manager
            .sign_up("irya@stonecraft.example", "quarry7", None)
            .await
            .unwrap();
        manager.sign_out().await.unwrap();

        store.fail_collection(USERS_COLLECTION);
        let user = manager
            .sign_in("irya@stonecraft.example", "quarry7")
            .await
            .unwrap();

        assert_eq!(user.email, "irya@stonecraft.example");
        assert!(manager.is_signed_in());
    }

    #[tokio::test]
    async fn test_session_drives_header_visibility() {
        let (_, manager) = manager();
        assert!(manager.visibility().show_login);
        assert!(manager.profile().is_none());

        manager
            .sign_up("irya@stonecraft.example", "quarry7", Some("Irya"))
            .await
            .unwrap();

        let visibility = manager.visibility();
        assert!(!visibility.show_login);
        assert!(visibility.show_profile);

        let profile = manager.profile().unwrap();
        assert_eq!(profile.display_name, "Irya");
        assert_eq!(profile.avatar_initial, 'I');

        manager.sign_out().await.unwrap();
        assert!(manager.visibility().show_login);
        assert_eq!(manager.session(), SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_failed_sign_in_keeps_signed_out() {
        let (_, manager) = manager();
        manager
            .sign_up("irya@stonecraft.example", "quarry7", None)
            .await
            .unwrap();
        manager.sign_out().await.unwrap();

        let err = manager
            .sign_in("irya@stonecraft.example", "wrong-pass")
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Incorrect password. Please try again.");
        assert!(!manager.is_signed_in());
    }
}
