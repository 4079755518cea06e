//! Store adapter interface.
//!
//! The actual distributed-store write lives outside this crate (it needs the
//! node transport and the rendering layer). The scheduler only depends on
//! this trait: hand over a snapshot and an insert target, get back the
//! location the store assigned, or an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::data::FeedId;
use crate::error::PublishError;
use crate::snapshot::FeedSnapshot;

/// Where the next edition of a feed should be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertTarget {
    pub feed_id: FeedId,
    /// The version the snapshot expects to become.
    pub version_hint: u64,
}

/// What the store reports back after a successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLocation {
    /// Version the store actually assigned. Usually `version_hint`, but the
    /// store may skip ahead if it already held a newer edition.
    pub version: u64,
    /// Content-addressed URI of the inserted edition.
    pub uri: String,
}

/// Performs the distributed-store write for one snapshot.
///
/// Calls may block for a long, variable time (network operation) and must be
/// abandon-safe: if the scheduler is stopped mid-call it simply stops
/// consuming the result, so an implementation must not depend on its caller
/// for cleanup.
#[async_trait]
pub trait StorePublisher: Send + Sync {
    async fn publish(
        &self,
        target: &InsertTarget,
        snapshot: &FeedSnapshot,
    ) -> Result<StoreLocation, PublishError>;
}
