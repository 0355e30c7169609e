//! Property-based tests for chat channel naming

use instaclone::shared::{ChannelName, Participant};
use proptest::prelude::*;

fn username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9._]{0,11}"
}

proptest! {
    #[test]
    fn test_channel_is_symmetric(a_id in 1i64..1000, b_id in 1i64..1000, a in username(), b in username()) {
        let one = ChannelName::between(Participant::new(a_id, &a), Participant::new(b_id, &b));
        let other = ChannelName::between(Participant::new(b_id, &b), Participant::new(a_id, &a));
        prop_assert_eq!(one, other);
    }

    #[test]
    fn test_higher_id_comes_first(a_id in 1i64..1000, b_id in 1i64..1000, a in username(), b in username()) {
        prop_assume!(a_id != b_id);
        let name = ChannelName::between(Participant::new(a_id, &a), Participant::new(b_id, &b));
        let expected = if a_id > b_id { format!("{}&{}", a, b) } else { format!("{}&{}", b, a) };
        prop_assert_eq!(name.as_str(), expected.as_str());
        prop_assert_eq!(name.topic(), format!("/topic/messages/{}", expected));
        prop_assert_eq!(name.destination(), format!("/app/chat/{}", expected));
    }
}
