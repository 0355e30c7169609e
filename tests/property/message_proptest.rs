//! Property-based tests for chat history ordering

use instaclone::shared::models::{sort_messages, ChatMessage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_sort_is_by_id_not_timestamp(ids in proptest::collection::vec(0i64..500, 0..30)) {
        let mut messages: Vec<ChatMessage> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| ChatMessage {
                id: Some(*id),
                sender: "kari".to_string(),
                // Timestamps deliberately run opposite to insertion order.
                timestamp: Some(format!("2024-01-01T00:00:{:02}", 59 - (i % 60))),
                content: i.to_string(),
            })
            .collect();

        sort_messages(&mut messages);

        let sorted: Vec<i64> = messages.iter().filter_map(|m| m.id).collect();
        let mut expected = ids.clone();
        expected.sort();
        prop_assert_eq!(sorted, expected);
    }
}
