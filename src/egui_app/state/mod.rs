//! Application state
//!
//! `AppContext` bundles the long-lived services every view needs.
//! `AppState` adds the current route, the live view and the runtime that
//! drives all background work.

use std::future::Future;

use tokio::runtime::{Handle, Runtime};

use crate::egui_app::api::ApiClient;
use crate::egui_app::config::Config;
use crate::egui_app::events::ProfilePictureEvents;
use crate::egui_app::guard::{can_activate, login_redirect};
use crate::egui_app::notification::Notifier;
use crate::egui_app::session::Session;
use crate::egui_app::tasks::{spawn_pending, Pending};
use crate::egui_app::types::{Navigation, Route};
use crate::egui_app::views::add_post_view::AddPostState;
use crate::egui_app::views::chat_view::ChatState;
use crate::egui_app::views::feed_view::{FeedMode, FeedState};
use crate::egui_app::views::login_view::LoginState;
use crate::egui_app::views::navigation::NavState;
use crate::egui_app::views::profile_view::ProfileState;
use crate::egui_app::views::register_view::RegisterState;

/// Services shared by all views
#[derive(Debug, Clone)]
pub struct AppContext {
    pub handle: Handle,
    pub config: Config,
    pub session: Session,
    pub notifier: Notifier,
    pub api: ApiClient,
    pub profile_events: ProfilePictureEvents,
}

impl AppContext {
    pub fn new(handle: Handle, config: Config, session: Session) -> Self {
        let notifier = Notifier::new(config.toast_duration());
        let api = ApiClient::new(config.clone(), session.clone(), notifier.clone());
        Self {
            handle,
            config,
            session,
            notifier,
            api,
            profile_events: ProfilePictureEvents::new(),
        }
    }

    /// Run a future on the app runtime
    pub fn spawn<F>(&self, fut: F) -> Pending<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        spawn_pending(&self.handle, fut)
    }
}

/// State of the view behind the current route
pub enum ViewState {
    Login(LoginState),
    Register(RegisterState),
    Feed(FeedState),
    AddPost(AddPostState),
    Profile(ProfileState),
    Chat(ChatState),
}

impl ViewState {
    /// Fresh state for `route`; loading starts immediately.
    pub fn enter(route: Route, ctx: &AppContext) -> Self {
        match route {
            Route::Login => ViewState::Login(LoginState::new()),
            Route::Register => ViewState::Register(RegisterState::new()),
            Route::Index => ViewState::Feed(FeedState::new(ctx, FeedMode::All)),
            Route::UserPosts => ViewState::Feed(FeedState::new(ctx, FeedMode::CurrentUser)),
            Route::AddPost => ViewState::AddPost(AddPostState::new()),
            Route::Profile(id) => ViewState::Profile(ProfileState::new(ctx, id)),
            Route::Chat(id) => ViewState::Chat(ChatState::new(ctx, id)),
        }
    }

    fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        match self {
            ViewState::Login(view) => view.poll(ctx),
            ViewState::Register(view) => view.poll(ctx),
            ViewState::Feed(view) => view.poll(ctx),
            ViewState::AddPost(view) => view.poll(ctx),
            ViewState::Profile(view) => view.poll(ctx),
            ViewState::Chat(view) => view.poll(ctx),
        }
    }
}

/// Central application state shared across egui views.
pub struct AppState {
    pub ctx: AppContext,
    route: Route,
    pub view: ViewState,
    pub nav: NavState,
    seen_generation: u64,
    // Dropped last so view tasks can still shut down cleanly.
    runtime: Runtime,
}

impl AppState {
    pub fn new(config: Config) -> std::io::Result<Self> {
        Self::with_session(config, Session::in_memory())
    }

    pub fn with_session(config: Config, session: Session) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("instaclone-io")
            .enable_all()
            .build()?;
        let ctx = AppContext::new(runtime.handle().clone(), config, session);
        let route = login_redirect(&ctx.session).unwrap_or(Route::Login);
        let view = ViewState::enter(route, &ctx);
        let nav = NavState::new(&ctx);
        tracing::info!("[APP] Started on {:?}", route);

        Ok(Self {
            seen_generation: ctx.session.generation(),
            ctx,
            route,
            view,
            nav,
            runtime,
        })
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn handle(&self) -> &Handle {
        self.runtime.handle()
    }

    /// Activate `route`, subject to the navigation guard. A signed-in user
    /// asking for the login page lands on the feed instead.
    pub fn navigate(&mut self, route: Route) {
        let target = match can_activate(&self.ctx.session, &route) {
            Navigation::Allow => route,
            Navigation::Redirect(to) => to,
        };
        let target = match target {
            Route::Login => login_redirect(&self.ctx.session).unwrap_or(Route::Login),
            other => other,
        };
        tracing::debug!("[APP] Navigating to {:?}", target);
        self.route = target;
        self.view = ViewState::enter(target, &self.ctx);
    }

    pub fn log_out(&mut self) {
        self.ctx.session.log_out();
        self.reset();
    }

    fn reset(&mut self) {
        self.seen_generation = self.ctx.session.generation();
        self.nav = NavState::new(&self.ctx);
        self.route = Route::Login;
        self.view = ViewState::enter(Route::Login, &self.ctx);
    }

    /// Per-frame bookkeeping: apply a pending logout, collect finished
    /// background work and re-check the guard on the current route.
    pub fn tick(&mut self) {
        if self.ctx.session.generation() != self.seen_generation {
            tracing::info!("[APP] Session ended, resetting views");
            self.reset();
        }

        self.nav.poll(&self.ctx);

        if let Some(route) = self.view.poll(&self.ctx) {
            self.navigate(route);
        }

        if let Navigation::Redirect(to) = can_activate(&self.ctx.session, &self.route) {
            self.navigate(to);
        }
    }
}
