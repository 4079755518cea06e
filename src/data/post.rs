//! Posts and replies.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FeedId;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh random ID.
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a post.
    PostId
);
string_id!(
    /// Identifier of a reply.
    ReplyId
);

pub(crate) use string_id;

/// A single status update in a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Creation time, milliseconds since the epoch.
    pub time: i64,
    /// Feed this post is directed at, if any.
    pub recipient: Option<FeedId>,
    pub text: String,
}

impl Post {
    /// Creates a post with a random ID, stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: PostId::random(),
            time: Utc::now().timestamp_millis(),
            recipient: None,
            text: text.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, time: i64, text: impl Into<String>) -> Self {
        Self {
            id: PostId::new(id),
            time,
            recipient: None,
            text: text.into(),
        }
    }

    pub fn to(mut self, recipient: FeedId) -> Self {
        self.recipient = Some(recipient);
        self
    }
}

/// A reply to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    /// The post being replied to.
    pub post_id: PostId,
    /// Creation time, milliseconds since the epoch.
    pub time: i64,
    pub text: String,
}

impl Reply {
    /// Creates a reply with a random ID, stamped with the current time.
    pub fn new(post_id: PostId, text: impl Into<String>) -> Self {
        Self {
            id: ReplyId::random(),
            post_id,
            time: Utc::now().timestamp_millis(),
            text: text.into(),
        }
    }

    pub fn with_id(
        id: impl Into<String>,
        post_id: impl Into<String>,
        time: i64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: ReplyId::new(id),
            post_id: PostId::new(post_id),
            time,
            text: text.into(),
        }
    }
}
