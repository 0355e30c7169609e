//! Property-based tests for optimistic likes

use instaclone::egui_app::feed::{begin_like_toggle, CommandResult, LikeAction};
use instaclone::shared::{ApiError, Post};
use proptest::prelude::*;

fn post_with(users: Vec<String>) -> Post {
    Post {
        id: Some(1),
        likes: Some(users.len() as i32),
        users_liked: users,
        ..Default::default()
    }
}

fn like_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{1,6}", 0..8).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn test_toggle_flips_membership(users in like_list(), me in "[a-z]{1,6}") {
        let mut post = post_with(users);
        let was_liked = post.is_liked_by(&me);
        let before = post.like_count();

        let pending = begin_like_toggle(&mut post, &me);

        prop_assert_eq!(pending.action == LikeAction::Unlike, was_liked);
        prop_assert_eq!(post.is_liked_by(&me), !was_liked);
        let expected = if was_liked { before - 1 } else { before + 1 };
        prop_assert_eq!(post.like_count(), expected);
    }

    #[test]
    fn test_rejection_restores_snapshot(users in like_list(), me in "[a-z]{1,6}") {
        let mut post = post_with(users);
        let before = post.clone();

        let pending = begin_like_toggle(&mut post, &me);
        let result = pending.reconcile(&mut post, Err(ApiError::Network("down".to_string())));

        prop_assert!(matches!(result, CommandResult::Rejected(_)));
        prop_assert_eq!(post, before);
    }

    #[test]
    fn test_server_answer_wins_and_is_deduplicated(users in like_list(), me in "[a-z]{1,6}", server in like_list()) {
        let mut post = post_with(users);
        let pending = begin_like_toggle(&mut post, &me);

        let mut answer = post_with(server.clone());
        answer.users_liked.extend(server.iter().cloned());
        answer.likes = None;
        let result = pending.reconcile(&mut post, Ok(answer));

        prop_assert_eq!(result, CommandResult::Applied);
        prop_assert_eq!(&post.users_liked, &server);
        prop_assert_eq!(post.likes, Some(server.len() as i32));
    }
}
