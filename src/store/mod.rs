//! Entity store abstraction (§4.6, §6 "Store session factory").
//!
//! [`Entity`] is the capability every persisted row implements; [`Table`]
//! is the generic in-memory collection a [`crate::store::memory::InMemoryStore`]
//! keeps per aggregate type, built the same way the reference core keeps
//! every concern in pure Rust rather than delegating to an external binding.

mod memory;
mod sequence_lock;

pub use memory::{InMemoryStore, Table};
pub use sequence_lock::{SequenceKey, SequenceLockStore};

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};

/// Capability every persisted row implements: an opaque id plus audit
/// bookkeeping, and (optionally) soft-delete.
pub trait Entity: Clone {
    /// Human-readable entity kind, used in `NotFound`/`Unsupported` errors
    /// and log tags.
    fn kind() -> &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    fn touch_created(&mut self, now: DateTime<Utc>, by: i64);
    fn touch_updated(&mut self, now: DateTime<Utc>, by: i64);

    /// Soft-delete this row. The default rejects with `Unsupported`;
    /// entities composing [`crate::domain::SoftDelete`] override it.
    fn mark_deleted(&mut self, _now: DateTime<Utc>, _by: i64) -> CoreResult<()> {
        Err(CoreError::unsupported(Self::kind(), "soft_delete"))
    }
}
