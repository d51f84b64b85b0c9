//! Header view-models derived from session state.

use crate::manager::SessionState;
use crate::provider::AuthUser;

/// What the profile widget shows for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub display_name: String,
    pub email: String,
    /// The single character shown in the avatar circle.
    pub avatar_initial: char,
}

impl ProfileView {
    /// Build the view for a user.
    ///
    /// The avatar initial is the first character of the displayed name,
    /// uppercased; with no name set that is the `U` of `"User"`.
    pub fn for_user(user: &AuthUser) -> Self {
        let display_name = user.display_name_or_default().to_string();
        let avatar_initial = display_name
            .chars()
            .flat_map(char::to_uppercase)
            .next()
            .unwrap_or('U');

        Self {
            display_name,
            email: user.email.clone(),
            avatar_initial,
        }
    }
}

/// Which of the login button and the profile widget is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthVisibility {
    pub show_login: bool,
    pub show_profile: bool,
}

impl AuthVisibility {
    pub fn for_session(session: &SessionState) -> Self {
        let signed_in = session.is_signed_in();
        Self {
            show_login: !signed_in,
            show_profile: signed_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_view_uses_display_name() {
        let user = AuthUser::new("u1", "irya@stonecraft.example").with_display_name("irya");
        let view = ProfileView::for_user(&user);

        assert_eq!(view.display_name, "irya");
        assert_eq!(view.email, "irya@stonecraft.example");
        assert_eq!(view.avatar_initial, 'I');
    }

    #[test]
    fn test_profile_view_without_name() {
        let user = AuthUser::new("u2", "anon@stonecraft.example");
        let view = ProfileView::for_user(&user);

        assert_eq!(view.display_name, "User");
        assert_eq!(view.avatar_initial, 'U');
    }

    #[test]
    fn test_visibility_flips_with_session() {
        let out = AuthVisibility::for_session(&SessionState::SignedOut);
        assert!(out.show_login);
        assert!(!out.show_profile);

        let user = AuthUser::new("u1", "irya@stonecraft.example");
        let signed = AuthVisibility::for_session(&SessionState::SignedIn(user));
        assert!(!signed.show_login);
        assert!(signed.show_profile);
    }
}
