//! Event definitions
//!
//! Defines the unit of record for the audit log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single audit event
///
/// Events are immutable once appended; there is no update or delete. The
/// engine stamps `time` itself on append, so a caller-supplied value is only
/// meaningful on events read back from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Caller-supplied identifier; not guaranteed unique (lookup is first-match)
    pub id: String,

    /// Actor who produced the event
    pub issuer: String,

    /// Entity or domain the event applies to
    pub scope: String,

    /// What happened
    pub action: String,

    /// When the event was appended (second precision, UTC on round-trip)
    pub time: DateTime<Utc>,

    /// Free-form payload fields, order-preserving
    pub data: Vec<String>,
}

impl Event {
    /// Create an event with no data fields, stamped with the current time
    pub fn new(
        id: impl Into<String>,
        issuer: impl Into<String>,
        scope: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            issuer: issuer.into(),
            scope: scope.into(),
            action: action.into(),
            time: Utc::now(),
            data: Vec::new(),
        }
    }

    /// Attach free-form data fields
    pub fn with_data(mut self, data: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.data = data.into_iter().map(Into::into).collect();
        self
    }
}
