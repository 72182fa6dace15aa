//! Task provider identity.

use serde::{Deserialize, Serialize};

use crate::ProviderId;

/// An external submitter of tasks. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskProvider {
    /// Unique provider identifier.
    pub id: ProviderId,

    /// Opaque locator of the submitting process, e.g. `name@host:port`.
    pub source: String,
}

impl TaskProvider {
    pub fn new(id: impl Into<ProviderId>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}
