//! Immutable publish snapshots.
//!
//! A snapshot is everything the store adapter needs to render and insert one
//! edition of a feed, copied out of the live feed in a single critical
//! section. The caller must hold the feed lock while capturing; the snapshot
//! itself is owned by the in-flight publish and never changes afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::fingerprint::Fingerprintable;
use crate::data::{Album, Feed, FeedId, Post, PostId, Profile, Reply, ReplyId};

/// Point-in-time copy of a feed's publishable state.
///
/// The `fingerprint` field is computed from the feed inside the same
/// critical section as the field copies, so it always describes exactly the
/// content carried here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub feed_id: FeedId,
    pub name: String,
    /// Version this snapshot is meant to be inserted as.
    pub target_version: u64,
    /// Publish time of the previous edition, milliseconds since the epoch.
    pub time: i64,
    pub profile: Profile,
    /// Posts sorted by time, newest first.
    pub posts: Vec<Post>,
    /// Replies sorted by time, newest first.
    pub replies: Vec<Reply>,
    pub liked_post_ids: BTreeSet<PostId>,
    pub liked_reply_ids: BTreeSet<ReplyId>,
    /// The album forest flattened parents-first.
    pub albums: Vec<Album>,
    fingerprint: String,
}

impl FeedSnapshot {
    /// Copies all publishable fields out of the feed. Call with the feed
    /// lock held; performs no I/O.
    pub fn capture(feed: &Feed) -> Self {
        Self {
            feed_id: feed.id().clone(),
            name: feed.name().to_string(),
            target_version: feed.latest_version() + 1,
            time: feed.time(),
            profile: feed.profile(),
            posts: feed.posts_by_time(),
            replies: feed.replies_by_time(),
            liked_post_ids: feed.liked_post_ids().clone(),
            liked_reply_ids: feed.liked_reply_ids().clone(),
            albums: feed.all_albums(),
            fingerprint: feed.fingerprint(),
        }
    }

    /// The feed fingerprint at capture time.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
