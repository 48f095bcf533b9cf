use std::collections::BTreeMap;

use thiserror::Error;

/// The five error kinds named by the core's error handling design.
///
/// Every fallible operation in this crate returns `Result<T, CoreError>`.
/// Validators and repositories produce these at the site of failure;
/// services re-raise without downgrading them; the unit-of-work rolls
/// back on any variant and re-raises unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// Field-level validation failure or structural violation. Never retryable.
    #[error("invalid input: {field}: {message}")]
    InvalidInput {
        field: String,
        message: String,
        details: BTreeMap<String, String>,
    },

    /// The referenced aggregate does not exist.
    #[error("{entity} not found: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Uniqueness violation, invariant breach, or store-level lock contention.
    #[error("conflict: {message}")]
    Conflict {
        message: String,
        retryable: bool,
        details: BTreeMap<String, String>,
    },

    /// Operation requested on an entity that does not declare the capability.
    #[error("{entity} does not support {operation}")]
    Unsupported {
        entity: &'static str,
        operation: &'static str,
    },

    /// Any unexpected store or system failure.
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CoreError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            retryable: false,
            details: BTreeMap::new(),
        }
    }

    pub fn retryable_conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            retryable: true,
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Conflict { details, .. } | Self::InvalidInput { details, .. } => {
                details.insert(key.into(), value.into());
            }
            _ => {}
        }
        self
    }

    pub fn unsupported(entity: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { entity, operation }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Whether a caller may retry the operation as-is (lock-wait timeout,
    /// deadlock). Uniqueness conflicts and invariant breaches are not retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { retryable: true, .. })
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
