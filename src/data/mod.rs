//! The feed aggregate and its value types.
//!
//! A [`Feed`] is everything one user publishes: profile, posts, replies,
//! likes, and albums. It is a long-lived, mutable object owned by the
//! application core; the publish scheduler reads it concurrently through a
//! [`SharedFeed`] handle, so every structural mutation goes through a method
//! here and the shared lock is held only for short, non-I/O critical
//! sections.

pub mod album;
pub mod fingerprint;
pub mod post;
pub mod profile;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

pub use album::{Album, AlbumId, Image, ImageId};
pub use post::{Post, PostId, Reply, ReplyId};
pub use profile::{Profile, ProfileField};

/// Stable opaque identifier of a feed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeedId(String);

impl FeedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedStatus {
    /// Not yet fetched or published; nothing is known about its content.
    Unknown,
    /// Neither a publish nor a fetch is in progress.
    Idle,
    /// A publish is currently in flight.
    Publishing,
    /// A newer remote edition is being fetched.
    Fetching,
}

/// Shared handle to a feed. The scheduler and the rest of the application
/// both go through this lock; hold it only to read or copy fields, never
/// across I/O.
pub type SharedFeed = Arc<RwLock<Feed>>;

/// A user's complete publishable content bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    id: FeedId,
    name: String,
    latest_version: u64,
    /// Time of the last published update, in milliseconds since the epoch.
    time: i64,
    status: FeedStatus,
    profile: Profile,
    posts: BTreeMap<PostId, Post>,
    /// Replies in arrival order. The insertion order is the tie-break when
    /// sorting by time, so this stays a `Vec`.
    replies: Vec<Reply>,
    liked_post_ids: BTreeSet<PostId>,
    liked_reply_ids: BTreeSet<ReplyId>,
    albums: Vec<Album>,
    options: BTreeMap<String, String>,
}

impl Feed {
    pub fn new(id: FeedId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            latest_version: 0,
            time: 0,
            status: FeedStatus::Unknown,
            profile: Profile::default(),
            posts: BTreeMap::new(),
            replies: Vec::new(),
            liked_post_ids: BTreeSet::new(),
            liked_reply_ids: BTreeSet::new(),
            albums: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    /// Wrap this feed in the shared per-feed lock.
    pub fn into_shared(self) -> SharedFeed {
        Arc::new(RwLock::new(self))
    }

    pub fn id(&self) -> &FeedId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latest_version(&self) -> u64 {
        self.latest_version
    }

    /// Advances the latest version. Versions are monotonic; a value that is
    /// not greater than the current one is refused.
    pub fn set_latest_version(&mut self, version: u64) {
        if version <= self.latest_version {
            tracing::debug!(
                feed = %self.id,
                current = self.latest_version,
                refused = version,
                "refusing version regression"
            );
            return;
        }
        self.latest_version = version;
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn set_time(&mut self, time: i64) {
        self.time = time;
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn set_status(&mut self, status: FeedStatus) {
        self.status = status;
    }

    /// Returns a copy of the profile. Mutate the copy and store it back with
    /// [`set_profile`](Self::set_profile).
    pub fn profile(&self) -> Profile {
        self.profile.clone()
    }

    /// Stores a copy of the given profile so later mutation of the argument
    /// is not reflected in this feed.
    pub fn set_profile(&mut self, profile: &Profile) {
        self.profile = profile.clone();
    }

    //
    // Posts
    //

    pub fn add_post(&mut self, post: Post) {
        tracing::trace!(feed = %self.id, post = %post.id, "adding post");
        self.posts.insert(post.id.clone(), post);
    }

    pub fn remove_post(&mut self, post_id: &PostId) -> Option<Post> {
        self.posts.remove(post_id)
    }

    pub fn post(&self, post_id: &PostId) -> Option<&Post> {
        self.posts.get(post_id)
    }

    /// Replaces all posts at once, e.g. after fetching a newer edition.
    pub fn set_posts(&mut self, posts: impl IntoIterator<Item = Post>) {
        self.posts = posts.into_iter().map(|p| (p.id.clone(), p)).collect();
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// All posts sorted by time, newest first. Ties keep ID order (stable
    /// over the ID-ordered map).
    pub fn posts_by_time(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().cloned().collect();
        posts.sort_by_key(|post| std::cmp::Reverse(post.time));
        posts
    }

    //
    // Replies
    //

    pub fn add_reply(&mut self, reply: Reply) {
        if self.replies.iter().any(|r| r.id == reply.id) {
            return;
        }
        self.replies.push(reply);
    }

    pub fn remove_reply(&mut self, reply_id: &ReplyId) -> Option<Reply> {
        let index = self.replies.iter().position(|r| &r.id == reply_id)?;
        Some(self.replies.remove(index))
    }

    pub fn set_replies(&mut self, replies: impl IntoIterator<Item = Reply>) {
        self.replies = replies.into_iter().collect();
    }

    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }

    /// All replies sorted by time, newest first. Equal timestamps keep their
    /// arrival order (stable sort); if the host ever rebuilds the reply list
    /// in a different order, equal-time replies change fingerprint.
    pub fn replies_by_time(&self) -> Vec<Reply> {
        let mut replies = self.replies.clone();
        replies.sort_by_key(|reply| std::cmp::Reverse(reply.time));
        replies
    }

    //
    // Likes
    //

    pub fn add_liked_post_id(&mut self, post_id: PostId) {
        self.liked_post_ids.insert(post_id);
    }

    pub fn remove_liked_post_id(&mut self, post_id: &PostId) {
        self.liked_post_ids.remove(post_id);
    }

    pub fn is_liked_post(&self, post_id: &PostId) -> bool {
        self.liked_post_ids.contains(post_id)
    }

    pub fn liked_post_ids(&self) -> &BTreeSet<PostId> {
        &self.liked_post_ids
    }

    pub fn add_liked_reply_id(&mut self, reply_id: ReplyId) {
        self.liked_reply_ids.insert(reply_id);
    }

    pub fn remove_liked_reply_id(&mut self, reply_id: &ReplyId) {
        self.liked_reply_ids.remove(reply_id);
    }

    pub fn is_liked_reply(&self, reply_id: &ReplyId) -> bool {
        self.liked_reply_ids.contains(reply_id)
    }

    pub fn liked_reply_ids(&self) -> &BTreeSet<ReplyId> {
        &self.liked_reply_ids
    }

    //
    // Albums
    //

    pub fn add_album(&mut self, album: Album) {
        if self.albums.iter().any(|a| a.id == album.id) {
            return;
        }
        self.albums.push(album);
    }

    pub fn remove_album(&mut self, album_id: &AlbumId) -> Option<Album> {
        let index = self.albums.iter().position(|a| &a.id == album_id)?;
        Some(self.albums.remove(index))
    }

    pub fn set_albums(&mut self, albums: impl IntoIterator<Item = Album>) {
        self.albums.clear();
        for album in albums {
            self.add_album(album);
        }
    }

    /// Top-level albums in list order.
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Flattens the album forest so that every parent appears before its
    /// children. The result can be processed in a single pass when
    /// rebuilding the tree.
    pub fn all_albums(&self) -> Vec<Album> {
        let mut flat = self.albums.clone();
        let mut index = 0;
        while index < flat.len() {
            let children = flat[index].albums.clone();
            flat.extend(children);
            index += 1;
        }
        flat
    }

    /// All images, in flattened-album order.
    pub fn all_images(&self) -> Vec<Image> {
        self.all_albums()
            .iter()
            .flat_map(|album| album.images.iter().cloned())
            .collect()
    }

    //
    // Options
    //

    /// Free-form per-feed options. Not part of the publishable content, so
    /// they never affect the fingerprint.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.insert(name.into(), value.into());
    }
}
