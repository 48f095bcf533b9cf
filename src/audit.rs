//! Audit context threaded explicitly through every service call.
//!
//! Replaces the reference system's session-carried ambient user id
//! (`session.info["user_id"] = user_id`) with an explicit value. Services
//! receive `user_id` as a parameter and install it here before any write;
//! nothing in this crate reads a thread-local or other global for identity.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::Clock;

/// Carries the acting principal, a wall clock, and correlation ids through
/// the lifetime of a single unit-of-work.
#[derive(Clone)]
pub struct AuditContext {
    user_id: i64,
    clock: Arc<dyn Clock>,
    correlation: HashMap<String, String>,
}

impl AuditContext {
    pub fn new(user_id: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_id,
            clock,
            correlation: HashMap::new(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn correlation(&self, key: &str) -> Option<&str> {
        self.correlation.get(key).map(String::as_str)
    }

    pub fn with_correlation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.correlation.insert(key.into(), value.into());
        self
    }
}
