/**
 * Shared Types Module
 *
 * Routes of the desktop client and the navigation decisions made on them.
 */

/// A navigable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form
    Login,
    /// Account creation form
    Register,
    /// Feed of every user's posts
    Index,
    /// The current user's own posts
    UserPosts,
    /// New post form
    AddPost,
    /// Profile page of a user
    Profile(i64),
    /// Direct chat with a user
    Chat(i64),
}

impl Route {
    /// Routes reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Index => "Feed",
            Route::UserPosts => "My posts",
            Route::AddPost => "New post",
            Route::Profile(_) => "Profile",
            Route::Chat(_) => "Chat",
        }
    }
}

/// Outcome of a navigation guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Route),
}
