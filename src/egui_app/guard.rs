//! Navigation Guard
//!
//! A single synchronous check per route activation.

use crate::egui_app::session::Session;
use crate::egui_app::types::{Navigation, Route};

/// Allow the route when a session exists, otherwise send the user to login.
pub fn can_activate(session: &Session, route: &Route) -> Navigation {
    if route.is_public() || session.get_user().is_some() {
        Navigation::Allow
    } else {
        tracing::debug!("[GUARD] Blocked {:?}, redirecting to login", route);
        Navigation::Redirect(Route::Login)
    }
}

/// The login view bounces a signed-in user to the feed.
pub fn login_redirect(session: &Session) -> Option<Route> {
    session.is_logged_in().then_some(Route::Index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::User;

    #[test]
    fn test_blocks_without_session() {
        let session = Session::in_memory();
        assert_eq!(
            can_activate(&session, &Route::Index),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(can_activate(&session, &Route::Register), Navigation::Allow);
        assert_eq!(login_redirect(&session), None);
    }

    #[test]
    fn test_allows_with_session() {
        let session = Session::in_memory();
        session
            .save_user(&User { id: Some(2), username: "ola".into(), ..Default::default() })
            .unwrap();
        assert_eq!(can_activate(&session, &Route::Profile(2)), Navigation::Allow);
        assert_eq!(login_redirect(&session), Some(Route::Index));
    }

    #[test]
    fn test_token_alone_is_not_a_session() {
        let session = Session::in_memory();
        session.save_token("abc");
        assert_eq!(
            can_activate(&session, &Route::AddPost),
            Navigation::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_headless_never_allows_private_routes() {
        let session = Session::headless();
        assert_eq!(
            can_activate(&session, &Route::Chat(1)),
            Navigation::Redirect(Route::Login)
        );
    }
}
