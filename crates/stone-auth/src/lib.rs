//! Authentication for the StoneCraft storefront.
//!
//! The storefront signs people in through a hosted identity provider; this
//! crate wraps that behind the [`AuthProvider`] seam, keeps the session
//! state the header renders from, and maintains the per-user bookkeeping
//! document in the `users` collection. Every provider failure maps to the
//! friendly message the login form shows via [`AuthError::user_message`].

mod error;
mod manager;
mod memory;
mod password;
mod provider;
mod view;

pub use error::{AuthError, AuthResult};
pub use manager::{AuthManager, SessionState, USERS_COLLECTION};
pub use memory::MemoryAuth;
pub use password::PasswordHasher;
pub use provider::{AuthProvider, AuthUser, Federated};
pub use view::{AuthVisibility, ProfileView};
