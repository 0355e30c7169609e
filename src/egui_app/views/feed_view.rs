//! Post feed
//!
//! Serves both the index (every user's posts, with owner avatars) and the
//! current user's own posts. Posts load first; comments, images and
//! avatars follow in one batch.

use eframe::egui;
use std::collections::HashMap;

use crate::egui_app::feed::{
    apply_post_details, fetch_post_details, FeedDetails, LikesInFlight,
};
use crate::egui_app::state::AppContext;
use crate::egui_app::tasks::{take_ready, Pending};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::types::Route;
use crate::shared::display::DecodedImage;
use crate::shared::error::ApiError;
use crate::shared::models::{Comment, MessageResponse, Post, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Every post, newest comments first
    All,
    /// The signed-in user's posts, comments in posting order
    CurrentUser,
}

impl FeedMode {
    pub fn route(&self) -> Route {
        match self {
            FeedMode::All => Route::Index,
            FeedMode::CurrentUser => Route::UserPosts,
        }
    }

    /// New comments go to the front of the index and the back of "my posts".
    pub fn insert_comment(&self, comments: &mut Vec<Comment>, comment: Comment) {
        match self {
            FeedMode::All => comments.insert(0, comment),
            FeedMode::CurrentUser => comments.push(comment),
        }
    }
}

type PostsLoad = (Result<Vec<Post>, ApiError>, Result<User, ApiError>);

pub struct FeedState {
    pub mode: FeedMode,
    pub user: Option<User>,
    pub posts: Vec<Post>,
    pub posts_loaded: bool,
    /// Decoded post images by post id
    images: HashMap<i64, DecodedImage>,
    /// Decoded owner avatars by user id
    avatars: HashMap<i64, DecodedImage>,
    comment_inputs: HashMap<i64, String>,
    load: Option<Pending<PostsLoad>>,
    details: Option<Pending<FeedDetails>>,
    likes: LikesInFlight<Pending<Result<Post, ApiError>>>,
    comments: Vec<Pending<(i64, Result<Comment, ApiError>)>>,
    comment_deletions: Vec<Pending<(i64, i64, Result<MessageResponse, ApiError>)>>,
    post_deletions: Vec<Pending<(i64, Result<MessageResponse, ApiError>)>>,
}

impl FeedState {
    pub fn new(ctx: &AppContext, mode: FeedMode) -> Self {
        let posts_api = ctx.api.posts();
        let users_api = ctx.api.users();
        let load = ctx.spawn(async move {
            match mode {
                FeedMode::All => tokio::join!(posts_api.all(), users_api.current()),
                FeedMode::CurrentUser => {
                    tokio::join!(posts_api.for_current_user(), users_api.current())
                }
            }
        });

        Self {
            mode,
            user: None,
            posts: Vec::new(),
            posts_loaded: false,
            images: HashMap::new(),
            avatars: HashMap::new(),
            comment_inputs: HashMap::new(),
            load: Some(load),
            details: None,
            likes: LikesInFlight::default(),
            comments: Vec::new(),
            comment_deletions: Vec::new(),
            post_deletions: Vec::new(),
        }
    }

    fn post_mut(&mut self, post_id: i64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == Some(post_id))
    }

    pub fn toggle_like(&mut self, ctx: &AppContext, index: usize) {
        let Some(username) = self.user.as_ref().map(|u| u.username.clone()) else {
            return;
        };
        let Some(post) = self.posts.get_mut(index) else {
            return;
        };
        let posts_api = ctx.api.posts();
        let name = username.clone();
        self.likes.begin(post, &username, |post_id| {
            ctx.spawn(async move { posts_api.like(post_id, &name).await })
        });
    }

    /// Comments are still being fetched; edits would be overwritten.
    pub fn comments_loading(&self) -> bool {
        self.details.is_some()
    }

    pub fn post_comment(&mut self, ctx: &AppContext, post_id: i64) {
        if self.comments_loading() {
            return;
        }
        let Some(message) = self
            .comment_inputs
            .get(&post_id)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
        else {
            return;
        };
        let comments_api = ctx.api.comments();
        self.comments.push(ctx.spawn(async move {
            (post_id, comments_api.add(post_id, &message).await)
        }));
    }

    pub fn delete_comment(&mut self, ctx: &AppContext, post_id: i64, comment_id: i64) {
        if self.comments_loading() {
            return;
        }
        let comments_api = ctx.api.comments();
        self.comment_deletions.push(ctx.spawn(async move {
            (post_id, comment_id, comments_api.delete(comment_id).await)
        }));
    }

    pub fn delete_post(&mut self, ctx: &AppContext, post_id: i64) {
        let posts_api = ctx.api.posts();
        self.post_deletions
            .push(ctx.spawn(async move { (post_id, posts_api.delete(post_id).await) }));
    }

    pub fn poll(&mut self, ctx: &AppContext) -> Option<Route> {
        if let Some((posts, user)) = take_ready(&mut self.load) {
            self.on_loaded(ctx, posts, user);
        }

        if let Some(details) = take_ready(&mut self.details) {
            self.on_details(&details);
        }

        for (action, result) in self.likes.settle(&mut self.posts, |call| call.poll()) {
            ctx.notifier.show_snack_bar(action.notification(&result));
        }

        let mut waiting = Vec::new();
        for call in std::mem::take(&mut self.comments) {
            let Some((post_id, outcome)) = call.poll() else {
                waiting.push(call);
                continue;
            };
            match outcome {
                Ok(comment) => {
                    let mode = self.mode;
                    if let Some(post) = self.post_mut(post_id) {
                        mode.insert_comment(&mut post.comments, comment);
                    }
                    self.comment_inputs.remove(&post_id);
                }
                Err(e) => {
                    tracing::warn!("[FEED] Comment on post {} failed: {}", post_id, e);
                    ctx.notifier.show_snack_bar("Error posting comment.");
                }
            }
        }
        self.comments = waiting;

        let mut waiting = Vec::new();
        for call in std::mem::take(&mut self.comment_deletions) {
            let Some((post_id, comment_id, outcome)) = call.poll() else {
                waiting.push(call);
                continue;
            };
            match outcome {
                Ok(_) => {
                    if let Some(post) = self.post_mut(post_id) {
                        post.comments.retain(|c| c.id != Some(comment_id));
                    }
                }
                Err(e) => {
                    tracing::warn!("[FEED] Deleting comment {} failed: {}", comment_id, e);
                    ctx.notifier.show_snack_bar("Error deleting comment.");
                }
            }
        }
        self.comment_deletions = waiting;

        let mut waiting = Vec::new();
        for call in std::mem::take(&mut self.post_deletions) {
            let Some((post_id, outcome)) = call.poll() else {
                waiting.push(call);
                continue;
            };
            match outcome {
                Ok(_) => {
                    self.posts.retain(|p| p.id != Some(post_id));
                    self.images.remove(&post_id);
                    ctx.notifier.show_snack_bar("Post deleted");
                }
                Err(e) => {
                    tracing::warn!("[FEED] Deleting post {} failed: {}", post_id, e);
                    ctx.notifier.show_snack_bar("Error deleting post.");
                }
            }
        }
        self.post_deletions = waiting;

        None
    }

    fn on_loaded(
        &mut self,
        ctx: &AppContext,
        posts: Result<Vec<Post>, ApiError>,
        user: Result<User, ApiError>,
    ) {
        match user {
            Ok(user) => self.user = Some(user),
            Err(e) => tracing::warn!("[FEED] Current user lookup failed: {}", e),
        }
        match posts {
            Ok(posts) => {
                tracing::info!("[FEED] Loaded {} posts", posts.len());
                self.posts = posts;
                self.posts_loaded = true;

                let api = ctx.api.clone();
                let snapshot = self.posts.clone();
                let with_avatars = self.mode == FeedMode::All;
                self.details = Some(ctx.spawn(async move {
                    fetch_post_details(&api, &snapshot, with_avatars).await
                }));
            }
            Err(e) => {
                tracing::error!("[FEED] Loading posts failed: {}", e);
                ctx.notifier.show_snack_bar("Error loading posts.");
            }
        }
    }

    fn on_details(&mut self, details: &FeedDetails) {
        let failures = details.failures();
        if failures > 0 {
            tracing::warn!("[FEED] {} detail requests failed", failures);
        }

        apply_post_details(&mut self.posts, details);
        for post in &self.posts {
            let Some(id) = post.id else { continue };
            if let Some(image) = super::decode_slot(&format!("post-{}", id), post.image.as_deref()) {
                self.images.insert(id, image);
            }
        }
        for (user_id, avatar) in &details.avatars {
            let Ok(avatar) = avatar else { continue };
            if let Some(image) =
                super::decode_slot(&format!("avatar-{}", user_id), avatar.image_bytes.as_deref())
            {
                self.avatars.insert(*user_id, image);
            }
        }
    }
}

enum PostAction {
    Like(usize),
    Comment(i64),
    DeleteComment(i64, i64),
    DeletePost(i64),
    Open(Route),
}

/// Decoded images belonging to one post
struct PostAssets<'a> {
    mode: FeedMode,
    image: Option<&'a DecodedImage>,
    avatar: Option<&'a DecodedImage>,
    like_in_flight: bool,
    comments_loading: bool,
}

pub fn render(ui: &mut egui::Ui, state: &mut FeedState, ctx: &AppContext) -> Option<Route> {
    super::title(ui, state.mode.route());

    if !state.posts_loaded {
        super::loading(ui, "Loading posts...");
        return None;
    }
    if state.posts.is_empty() {
        ui.label(egui::RichText::new("No posts yet").color(colors::TEXT_SECONDARY));
        return None;
    }

    let me = state.user.as_ref().map(|u| u.username.clone());
    let mode = state.mode;
    let comments_loading = state.comments_loading();
    let mut action = None;

    let FeedState {
        posts,
        images,
        avatars,
        comment_inputs,
        likes,
        ..
    } = &mut *state;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, post) in posts.iter().enumerate() {
            let assets = PostAssets {
                mode,
                image: post.id.and_then(|id| images.get(&id)),
                avatar: post.user_id.and_then(|id| avatars.get(&id)),
                like_in_flight: post.id.is_some_and(|id| likes.is_pending(id)),
                comments_loading,
            };
            let draft = post.id.map(|id| comment_inputs.entry(id).or_default());
            styles::card_frame().show(ui, |ui| {
                ui.set_max_width(560.0);
                if let Some(next) = render_post(ui, &assets, index, post, me.as_deref(), draft) {
                    action = Some(next);
                }
            });
            ui.add_space(12.0);
        }
    });

    match action? {
        PostAction::Like(index) => state.toggle_like(ctx, index),
        PostAction::Comment(post_id) => state.post_comment(ctx, post_id),
        PostAction::DeleteComment(post_id, comment_id) => {
            state.delete_comment(ctx, post_id, comment_id)
        }
        PostAction::DeletePost(post_id) => state.delete_post(ctx, post_id),
        PostAction::Open(route) => return Some(route),
    }
    None
}

fn render_post(
    ui: &mut egui::Ui,
    assets: &PostAssets<'_>,
    index: usize,
    post: &Post,
    me: Option<&str>,
    draft: Option<&mut String>,
) -> Option<PostAction> {
    let mut action = None;
    let owner = post.username.as_deref().unwrap_or("unknown");

    ui.horizontal(|ui| {
        if assets.mode == FeedMode::All && super::avatar(ui, assets.avatar, 32.0).clicked() {
            action = post.user_id.map(|id| PostAction::Open(Route::Profile(id)));
        }
        ui.label(egui::RichText::new(&post.title).strong().color(colors::TEXT_PRIMARY));
        ui.label(egui::RichText::new(format!("@{}", owner)).color(colors::TEXT_SECONDARY));
        if let Some(location) = &post.location {
            ui.label(egui::RichText::new(location).color(colors::TEXT_SECONDARY));
        }
    });

    if let Some(image) = assets.image {
        super::show_image(ui, image, egui::vec2(520.0, 520.0));
    }
    ui.label(&post.caption);

    ui.horizontal(|ui| {
        let liked = me.map(|u| post.is_liked_by(u)).unwrap_or(false);
        let heart = if liked { "❤" } else { "♡" };
        let like = ui.add_enabled(
            post.id.is_some() && me.is_some() && !assets.like_in_flight,
            egui::Button::new(egui::RichText::new(heart).color(colors::LIKE)),
        );
        if like.clicked() {
            action = Some(PostAction::Like(index));
        }
        ui.label(format!("{} likes", post.like_count()));

        if assets.mode == FeedMode::CurrentUser {
            if let Some(post_id) = post.id {
                if ui.small_button("Delete post").clicked() {
                    action = Some(PostAction::DeletePost(post_id));
                }
            }
        }
    });

    let (Some(post_id), Some(draft)) = (post.id, draft) else {
        return action;
    };

    for comment in &post.comments {
        ui.horizontal(|ui| {
            let author = comment.username.as_deref().unwrap_or("");
            ui.label(egui::RichText::new(author).strong());
            ui.label(&comment.message);
            if me.is_some() && me == comment.username.as_deref() {
                if let Some(comment_id) = comment.id {
                    let delete =
                        ui.add_enabled(!assets.comments_loading, egui::Button::new("✕").small());
                    if delete.clicked() {
                        action = Some(PostAction::DeleteComment(post_id, comment_id));
                    }
                }
            }
        });
    }

    ui.horizontal(|ui| {
        let edit = ui.add(egui::TextEdit::singleline(draft).hint_text("Add a comment"));
        let submit = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let post_button = ui.add_enabled(!assets.comments_loading, egui::Button::new("Post"));
        if !assets.comments_loading && (post_button.clicked() || submit) {
            action = Some(PostAction::Comment(post_id));
        }
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::config::Config;
    use crate::egui_app::state::AppState;

    fn comment(id: i64) -> Comment {
        Comment {
            id: Some(id),
            message: format!("c{}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_comment_order_depends_on_mode() {
        let mut comments = vec![comment(1)];
        FeedMode::All.insert_comment(&mut comments, comment(2));
        FeedMode::CurrentUser.insert_comment(&mut comments, comment(3));
        let ids: Vec<_> = comments.iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_mode_routes() {
        assert_eq!(FeedMode::All.route(), Route::Index);
        assert_eq!(FeedMode::CurrentUser.route(), Route::UserPosts);
    }

    fn loaded_feed(state: &AppState) -> FeedState {
        let mut feed = FeedState::new(&state.ctx, FeedMode::All);
        feed.load = None;
        feed.user = Some(User { id: Some(2), username: "kari".into(), ..Default::default() });
        feed.posts = vec![Post {
            id: Some(1),
            users_liked: vec!["ola".into()],
            likes: Some(1),
            ..Default::default()
        }];
        feed.posts_loaded = true;
        feed
    }

    #[test]
    fn test_second_like_click_waits_for_the_first() {
        let state = AppState::new(Config::new()).unwrap();
        let mut feed = loaded_feed(&state);

        feed.toggle_like(&state.ctx, 0);
        feed.toggle_like(&state.ctx, 0);

        assert!(feed.likes.is_pending(1));
        assert_eq!(feed.posts[0].users_liked, vec!["ola", "kari"]);
    }

    #[test]
    fn test_comment_edits_wait_for_fetched_comments() {
        let state = AppState::new(Config::new()).unwrap();
        let mut feed = loaded_feed(&state);
        feed.details = Some(state.ctx.spawn(std::future::pending::<FeedDetails>()));
        feed.comment_inputs.insert(1, "hi".into());

        feed.post_comment(&state.ctx, 1);
        feed.delete_comment(&state.ctx, 1, 9);
        assert!(feed.comments.is_empty());
        assert!(feed.comment_deletions.is_empty());

        feed.details = None;
        feed.post_comment(&state.ctx, 1);
        assert_eq!(feed.comments.len(), 1);
    }
}
