//! Event types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::FeedId;

/// A lifecycle notification emitted by the publish machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PublishEvent {
    /// A publish has started for the feed.
    Started { feed_id: FeedId },

    /// A publish finished successfully.
    Finished { feed_id: FeedId, duration: Duration },

    /// A publish was aborted. `cause` is the failure description, if the
    /// store reported one.
    Aborted {
        feed_id: FeedId,
        cause: Option<String>,
    },

    /// The feed was administratively locked; publishing is suspended.
    FeedLocked { feed_id: FeedId },

    /// The feed was unlocked; pending changes debounce again.
    FeedUnlocked { feed_id: FeedId },
}

impl PublishEvent {
    /// The feed this event concerns.
    pub fn feed_id(&self) -> &FeedId {
        match self {
            Self::Started { feed_id }
            | Self::Finished { feed_id, .. }
            | Self::Aborted { feed_id, .. }
            | Self::FeedLocked { feed_id }
            | Self::FeedUnlocked { feed_id } => feed_id,
        }
    }
}
