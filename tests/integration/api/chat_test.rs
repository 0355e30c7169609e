//! Chat history over REST

use crate::common::signed_in_api;
use instaclone::shared::{ChannelName, Participant};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_messages_are_fetched_by_channel_and_sorted_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessages"))
        .and(body_json(json!({ "chat": "ola&kari" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ms_id": 3, "sender": "kari", "t_stamp": "2024-05-01T10:02:00", "content": "tre" },
            { "ms_id": 1, "sender": "ola", "t_stamp": "2024-05-01T10:05:00", "content": "en" },
            { "ms_id": 2, "sender": "kari", "t_stamp": "2024-05-01T10:01:00", "content": "to" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let channel = ChannelName::between(Participant::new(2, "kari"), Participant::new(5, "ola"));
    let messages = test.api.chat().messages(&channel).await.unwrap();

    let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["en", "to", "tre"]);
}

#[tokio::test]
async fn test_empty_history_body_is_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getMessages"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let channel = ChannelName::between(Participant::new(1, "a"), Participant::new(2, "b"));
    assert!(test.api.chat().messages(&channel).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_list_posts_raw_username() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getChats"))
        .and(body_string("kari"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "chatId": 1, "name": "ola&kari" },
            { "chatId": 2, "name": "kari&per" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let test = signed_in_api(&server);
    let chats = test.api.chat().chats("kari").await.unwrap();
    let others: Vec<&str> = chats.iter().filter_map(|c| c.counterpart("kari")).collect();
    assert_eq!(others, vec!["ola", "per"]);
}
