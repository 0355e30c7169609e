//! # Feed operations
//!
//! Two operations shared by every view that lists posts:
//!
//! - **Batch detail fetch**: comments and image for every post with an id,
//!   plus each distinct owner's profile image, all concurrently. Results
//!   come back as a map keyed by post id with one result slot per request,
//!   so a failed comment fetch never hides a successful image fetch.
//! - **Like toggle**: an optimistic local change that is always reconciled
//!   against the server's answer. A rejected call reverts the change.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use instaclone::egui_app::feed::{begin_like_toggle, fetch_post_details};
//!
//! # async fn example(api: instaclone::egui_app::api::ApiClient, mut posts: Vec<instaclone::shared::Post>) {
//! let details = fetch_post_details(&api, &posts, true).await;
//!
//! let pending = begin_like_toggle(&mut posts[0], "kari");
//! let outcome = api.posts().like(posts[0].id.unwrap(), "kari").await;
//! let result = pending.reconcile(&mut posts[0], outcome);
//! # }
//! ```

use crate::egui_app::api::ApiClient;
use crate::shared::error::ApiError;
use crate::shared::models::{Comment, ImageModel, Post};
use futures_util::future::join_all;
use std::collections::{BTreeSet, HashMap};

/// Per-post result slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub comments: Result<Vec<Comment>, ApiError>,
    pub image: Result<ImageModel, ApiError>,
}

/// Everything a batch fetch produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDetails {
    /// Keyed by post id; posts without an id have no entry
    pub posts: HashMap<i64, PostDetails>,
    /// Keyed by owner user id
    pub avatars: HashMap<i64, Result<ImageModel, ApiError>>,
}

impl FeedDetails {
    /// Number of per-item slots that failed
    pub fn failures(&self) -> usize {
        let post_failures: usize = self
            .posts
            .values()
            .map(|d| d.comments.is_err() as usize + d.image.is_err() as usize)
            .sum();
        post_failures + self.avatars.values().filter(|a| a.is_err()).count()
    }
}

/// Fetch comments and images for `posts`, and owner avatars when asked.
///
/// Exactly one comment request and one image request are issued per post
/// with an id. No request is issued for a post without one.
pub async fn fetch_post_details(api: &ApiClient, posts: &[Post], with_avatars: bool) -> FeedDetails {
    let post_requests = posts.iter().filter_map(|p| p.id).map(|post_id| {
        let comments_api = api.comments();
        let images_api = api.images();
        async move {
            let (comments, image) = tokio::join!(
                comments_api.for_post(post_id),
                images_api.post_image(post_id)
            );
            if let Err(e) = &comments {
                tracing::warn!("[FEED] Comments for post {} failed: {}", post_id, e);
            }
            if let Err(e) = &image {
                tracing::warn!("[FEED] Image for post {} failed: {}", post_id, e);
            }
            (post_id, PostDetails { comments, image })
        }
    });

    let owners: BTreeSet<i64> = if with_avatars {
        posts.iter().filter_map(|p| p.user_id).collect()
    } else {
        BTreeSet::new()
    };
    let avatar_requests = owners.into_iter().map(|user_id| {
        let images_api = api.images();
        async move {
            let avatar = images_api.profile_image_of(user_id).await;
            if let Err(e) = &avatar {
                tracing::warn!("[FEED] Profile image for user {} failed: {}", user_id, e);
            }
            (user_id, avatar)
        }
    });

    let (post_results, avatar_results) =
        tokio::join!(join_all(post_requests), join_all(avatar_requests));

    FeedDetails {
        posts: post_results.into_iter().collect(),
        avatars: avatar_results.into_iter().collect(),
    }
}

/// Merge fetched details into the posts they belong to. Failed slots
/// leave the post's current value untouched. Callers hold comment edits
/// back until this has run, since a fetched list replaces the post's.
pub fn apply_post_details(posts: &mut [Post], details: &FeedDetails) {
    for post in posts.iter_mut() {
        let Some(entry) = post.id.and_then(|id| details.posts.get(&id)) else {
            continue;
        };
        if let Ok(comments) = &entry.comments {
            post.comments = comments.clone();
        }
        if let Ok(image) = &entry.image {
            post.image = image.image_bytes.clone();
        }
    }
}

/// Outcome of a command issued to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Applied,
    Rejected(String),
}

/// Direction of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// Toast text for an outcome
    pub fn notification(&self, result: &CommandResult) -> &'static str {
        match (self, result) {
            (LikeAction::Like, CommandResult::Applied) => "Liked!",
            (LikeAction::Unlike, CommandResult::Applied) => "Unliked!",
            (LikeAction::Like, CommandResult::Rejected(_)) => "Error liking post.",
            (LikeAction::Unlike, CommandResult::Rejected(_)) => "Error unliking post.",
        }
    }
}

/// An optimistic like toggle waiting for the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLike {
    pub post_id: Option<i64>,
    pub username: String,
    pub action: LikeAction,
    previous_users: Vec<String>,
    previous_likes: Option<i32>,
}

/// Toggle the like locally and remember how to undo it.
pub fn begin_like_toggle(post: &mut Post, username: &str) -> PendingLike {
    let pending = PendingLike {
        post_id: post.id,
        username: username.to_string(),
        action: if post.is_liked_by(username) {
            LikeAction::Unlike
        } else {
            LikeAction::Like
        },
        previous_users: post.users_liked.clone(),
        previous_likes: post.likes,
    };
    match pending.action {
        LikeAction::Like => post.add_like(username),
        LikeAction::Unlike => post.remove_like(username),
    };
    pending
}

impl PendingLike {
    /// Reconcile the post with the server's answer. An accepted toggle
    /// takes the server's like list; a rejected one restores the snapshot.
    pub fn reconcile(self, post: &mut Post, outcome: Result<Post, ApiError>) -> CommandResult {
        match outcome {
            Ok(server) => {
                let mut users = Vec::with_capacity(server.users_liked.len());
                for user in server.users_liked {
                    if !users.contains(&user) {
                        users.push(user);
                    }
                }
                post.users_liked = users;
                post.likes = server.likes.or(Some(post.users_liked.len() as i32));
                CommandResult::Applied
            }
            Err(e) => {
                tracing::warn!(
                    "[FEED] {:?} on post {:?} by {} rejected: {}",
                    self.action,
                    self.post_id,
                    self.username,
                    e
                );
                post.users_liked = self.previous_users;
                post.likes = self.previous_likes;
                CommandResult::Rejected(e.to_string())
            }
        }
    }
}

/// Like toggles waiting for the server, at most one per post.
///
/// `C` is whatever carries the in-flight call; the feed view stores a
/// [`Pending`](crate::egui_app::tasks::Pending) there.
#[derive(Debug)]
pub struct LikesInFlight<C> {
    entries: Vec<(PendingLike, C)>,
}

impl<C> Default for LikesInFlight<C> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<C> LikesInFlight<C> {
    pub fn is_pending(&self, post_id: i64) -> bool {
        self.entries.iter().any(|(p, _)| p.post_id == Some(post_id))
    }

    /// Toggle `post` locally and issue `call` for it. Refused while an
    /// earlier toggle on the same post is unanswered, so every snapshot
    /// is a state the server has confirmed.
    pub fn begin(
        &mut self,
        post: &mut Post,
        username: &str,
        call: impl FnOnce(i64) -> C,
    ) -> bool {
        let Some(post_id) = post.id else {
            return false;
        };
        if self.is_pending(post_id) {
            tracing::debug!("[FEED] Like on post {} still in flight", post_id);
            return false;
        }
        let pending = begin_like_toggle(post, username);
        self.entries.push((pending, call(post_id)));
        true
    }

    /// Reconcile every answered toggle against `posts`. Toggles whose
    /// post is gone are dropped.
    pub fn settle(
        &mut self,
        posts: &mut [Post],
        mut poll: impl FnMut(&C) -> Option<Result<Post, ApiError>>,
    ) -> Vec<(LikeAction, CommandResult)> {
        let mut settled = Vec::new();
        let mut waiting = Vec::new();
        for (pending, call) in std::mem::take(&mut self.entries) {
            let Some(outcome) = poll(&call) else {
                waiting.push((pending, call));
                continue;
            };
            let action = pending.action;
            let Some(post) = posts
                .iter_mut()
                .find(|p| p.id.is_some() && p.id == pending.post_id)
            else {
                continue;
            };
            settled.push((action, pending.reconcile(post, outcome)));
        }
        self.entries = waiting;
        settled
    }
}

/// Full like round trip against the API.
pub async fn toggle_like(api: &ApiClient, post: &mut Post, username: &str) -> (LikeAction, CommandResult) {
    let pending = begin_like_toggle(post, username);
    let action = pending.action;
    let outcome = match post.id {
        Some(post_id) => api.posts().like(post_id, username).await,
        None => Err(ApiError::Local(crate::shared::SharedError::validation(
            "id",
            "Post has no id",
        ))),
    };
    (action, pending.reconcile(post, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(liked: &[&str]) -> Post {
        Post {
            id: Some(1),
            title: "t".into(),
            caption: "c".into(),
            likes: Some(liked.len() as i32),
            users_liked: liked.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_optimistic_like_applied() {
        let mut local = post(&["ola"]);
        let pending = begin_like_toggle(&mut local, "kari");
        assert_eq!(pending.action, LikeAction::Like);
        assert!(local.is_liked_by("kari"));

        let result = pending.reconcile(&mut local, Ok(post(&["ola", "kari"])));
        assert_eq!(result, CommandResult::Applied);
        assert_eq!(local.users_liked, vec!["ola", "kari"]);
        assert_eq!(local.likes, Some(2));
    }

    #[test]
    fn test_rejected_like_is_reverted() {
        let mut local = post(&["ola"]);
        let pending = begin_like_toggle(&mut local, "kari");
        let result = pending.reconcile(
            &mut local,
            Err(ApiError::Http { status: 500, message: "boom".into() }),
        );
        assert!(matches!(result, CommandResult::Rejected(_)));
        assert_eq!(local, post(&["ola"]));
    }

    #[test]
    fn test_rejected_unlike_is_reverted() {
        let mut local = post(&["kari", "ola"]);
        let pending = begin_like_toggle(&mut local, "kari");
        assert_eq!(pending.action, LikeAction::Unlike);
        assert!(!local.is_liked_by("kari"));

        pending.reconcile(&mut local, Err(ApiError::Network("down".into())));
        assert_eq!(local.users_liked, vec!["kari", "ola"]);
    }

    #[test]
    fn test_like_then_unlike_restores_original() {
        let original = post(&["ola"]);
        let mut local = original.clone();

        let pending = begin_like_toggle(&mut local, "kari");
        pending.reconcile(&mut local, Ok(post(&["ola", "kari"])));
        let pending = begin_like_toggle(&mut local, "kari");
        pending.reconcile(&mut local, Ok(post(&["ola"])));

        assert_eq!(local, original);
    }

    #[test]
    fn test_server_duplicates_are_collapsed() {
        let mut local = post(&[]);
        let pending = begin_like_toggle(&mut local, "kari");
        let mut server = post(&["kari", "kari"]);
        server.likes = None;
        pending.reconcile(&mut local, Ok(server));
        assert_eq!(local.users_liked, vec!["kari"]);
        assert_eq!(local.likes, Some(1));
    }

    #[test]
    fn test_overlapping_toggles_on_one_post_are_refused() {
        let mut posts = vec![post(&["ola"])];
        let mut likes = LikesInFlight::default();
        let rejected = || Err::<Post, ApiError>(ApiError::Network("down".into()));

        assert!(likes.begin(&mut posts[0], "kari", |_| rejected()));
        assert!(!likes.begin(&mut posts[0], "kari", |_| rejected()));
        assert!(likes.is_pending(1));
        assert!(posts[0].is_liked_by("kari"));

        let settled = likes.settle(&mut posts, |outcome| Some(outcome.clone()));
        assert_eq!(settled.len(), 1);
        assert!(matches!(settled[0], (LikeAction::Like, CommandResult::Rejected(_))));
        assert_eq!(posts[0].users_liked, vec!["ola"]);
        assert!(!likes.is_pending(1));

        // Answered, so the post takes toggles again.
        assert!(likes.begin(&mut posts[0], "kari", |_| rejected()));
    }

    #[test]
    fn test_unanswered_toggle_stays_pending() {
        let mut posts = vec![post(&[])];
        let mut likes: LikesInFlight<Option<Result<Post, ApiError>>> = LikesInFlight::default();
        assert!(likes.begin(&mut posts[0], "kari", |_| None));

        assert!(likes.settle(&mut posts, |outcome| outcome.clone()).is_empty());
        assert!(likes.is_pending(1));
        assert!(posts[0].is_liked_by("kari"));
    }

    #[test]
    fn test_post_without_id_takes_no_toggle() {
        let mut local = Post { id: None, ..post(&[]) };
        let mut likes = LikesInFlight::default();
        assert!(!likes.begin(&mut local, "kari", |_| ()));
        assert!(local.users_liked.is_empty());
    }

    #[test]
    fn test_notifications() {
        assert_eq!(LikeAction::Like.notification(&CommandResult::Applied), "Liked!");
        assert_eq!(
            LikeAction::Unlike.notification(&CommandResult::Rejected("x".into())),
            "Error unliking post."
        );
    }

    #[test]
    fn test_apply_post_details_keeps_values_on_failure() {
        let mut posts = vec![post(&[]), Post { id: None, ..Default::default() }];
        posts[0].image = Some("OLD".into());

        let mut details = FeedDetails::default();
        details.posts.insert(
            1,
            PostDetails {
                comments: Ok(vec![Comment { id: Some(9), message: "hi".into(), ..Default::default() }]),
                image: Err(ApiError::Http { status: 500, message: String::new() }),
            },
        );
        apply_post_details(&mut posts, &details);

        assert_eq!(posts[0].comments.len(), 1);
        assert_eq!(posts[0].image.as_deref(), Some("OLD"));
        assert!(posts[1].comments.is_empty());
        assert_eq!(details.failures(), 1);
    }
}
