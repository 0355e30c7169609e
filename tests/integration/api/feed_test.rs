//! Feed batch loading and likes

use crate::common::{post, signed_in_api};
use assert_matches::assert_matches;
use instaclone::egui_app::feed::{
    apply_post_details, fetch_post_details, toggle_like, CommandResult, LikeAction,
};
use instaclone::shared::{ApiError, Post};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_get(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

fn image(payload: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "imageBytes": payload }))
}

#[tokio::test]
async fn test_batch_fetch_issues_one_request_per_slot() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/comment/1/all",
        ResponseTemplate::new(200).set_body_json(json!([{ "id": 9, "message": "fin", "username": "ola" }])),
        1,
    )
    .await;
    mount_get(&server, "/api/comment/2/all", ResponseTemplate::new(200).set_body_json(json!([])), 1).await;
    mount_get(&server, "/api/image/1/image", image("AAAA"), 1).await;
    mount_get(&server, "/api/image/2/image", ResponseTemplate::new(200), 1).await;
    // Both posts share one owner; the avatar is fetched once.
    mount_get(&server, "/api/image/profileImage/10", image("BBBB"), 1).await;

    let test = signed_in_api(&server);
    let mut posts = vec![post(Some(1), 10), post(Some(2), 10), post(None, 10)];
    let details = fetch_post_details(&test.api, &posts, true).await;

    assert_eq!(details.posts.len(), 2);
    assert_eq!(details.failures(), 0);
    assert_eq!(
        details.avatars[&10].as_ref().unwrap().image_bytes.as_deref(),
        Some("BBBB")
    );

    apply_post_details(&mut posts, &details);
    assert_eq!(posts[0].comments.len(), 1);
    assert_eq!(posts[0].comments[0].post_id, Some(1));
    assert_eq!(posts[0].image.as_deref(), Some("AAAA"));
    assert_eq!(posts[1].image, None);
    assert!(posts[2].comments.is_empty());

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 5);
}

#[tokio::test]
async fn test_batch_fetch_without_avatars() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/comment/4/all", ResponseTemplate::new(200).set_body_json(json!([])), 1).await;
    mount_get(&server, "/api/image/4/image", image("CCCC"), 1).await;
    mount_get(&server, "/api/image/profileImage/10", image("BBBB"), 0).await;

    let test = signed_in_api(&server);
    let details = fetch_post_details(&test.api, &[post(Some(4), 10)], false).await;

    assert!(details.avatars.is_empty());
    assert_eq!(details.failures(), 0);
}

#[tokio::test]
async fn test_failed_slot_does_not_hide_the_others() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/comment/1/all", ResponseTemplate::new(500), 1).await;
    mount_get(&server, "/api/image/1/image", image("AAAA"), 1).await;
    mount_get(&server, "/api/comment/2/all", ResponseTemplate::new(200).set_body_json(json!([])), 1).await;
    mount_get(&server, "/api/image/2/image", ResponseTemplate::new(404), 1).await;
    mount_get(&server, "/api/image/profileImage/10", ResponseTemplate::new(500), 1).await;

    let test = signed_in_api(&server);
    let mut posts = vec![post(Some(1), 10), post(Some(2), 10)];
    posts[0].comments = vec![Default::default()];
    let details = fetch_post_details(&test.api, &posts, true).await;

    assert_eq!(details.failures(), 3);
    assert_matches!(details.posts[&1].comments, Err(ApiError::Http { status: 500, .. }));
    assert!(details.posts[&1].image.is_ok());
    assert!(details.posts[&2].comments.is_ok());
    assert_matches!(details.posts[&2].image, Err(ApiError::Http { status: 404, .. }));

    apply_post_details(&mut posts, &details);
    // Failed comment slot keeps what the post already had.
    assert_eq!(posts[0].comments.len(), 1);
    assert_eq!(posts[0].image.as_deref(), Some("AAAA"));
}

fn liked_post(users: &[&str]) -> Post {
    Post {
        users_liked: users.iter().map(|u| u.to_string()).collect(),
        likes: Some(users.len() as i32),
        ..post(Some(7), 10)
    }
}

#[tokio::test]
async fn test_like_takes_server_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/post/7/kari/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "title": "t",
            "caption": "c",
            "likes": 2,
            "usersLiked": ["ola", "kari"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let mut post = liked_post(&["ola"]);
    let (action, result) = toggle_like(&test.api, &mut post, "kari").await;

    assert_eq!(action, LikeAction::Like);
    assert_eq!(result, CommandResult::Applied);
    assert_eq!(action.notification(&result), "Liked!");
    assert_eq!(post.users_liked, vec!["ola", "kari"]);
    assert_eq!(post.likes, Some(2));
}

#[tokio::test]
async fn test_rejected_unlike_restores_the_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/post/7/kari/like"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let mut post = liked_post(&["kari", "ola"]);
    let before = post.clone();
    let (action, result) = toggle_like(&test.api, &mut post, "kari").await;

    assert_eq!(action, LikeAction::Unlike);
    assert_matches!(result, CommandResult::Rejected(_));
    assert_eq!(action.notification(&result), "Error unliking post.");
    assert_eq!(post, before);
}
