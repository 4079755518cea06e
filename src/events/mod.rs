//! Publish lifecycle events and their fan-out.
//!
//! The scheduler reports every transition (publish started, finished,
//! aborted; feed locked, unlocked) through a listener registry. Listeners
//! are fire-and-forget: they run on the scheduler's task and must return
//! quickly.

pub mod listeners;
pub mod types;

pub use listeners::{ListenerId, PublishListeners};
pub use types::PublishEvent;
