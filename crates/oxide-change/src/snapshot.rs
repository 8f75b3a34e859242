//! Read-only access to the current schema state.
//!
//! The snapshot engine itself lives outside this crate; changes only ask it
//! whether an object exists or what a sequence currently looks like.

use crate::database::{Database, DatabaseObject};
use crate::error::SnapshotError;

/// Observed state of a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceSnapshot {
    /// Sequence name.
    pub name: String,
    /// Current increment.
    pub increment_by: Option<i128>,
    /// Current minimum value.
    pub min_value: Option<i128>,
    /// Current maximum value.
    pub max_value: Option<i128>,
    /// Whether values are generated in request order.
    pub ordered: Option<bool>,
}

impl SequenceSnapshot {
    /// Creates a snapshot with only the name known.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Schema lookups used by [`crate::change::Change::check_status`].
pub trait SnapshotService: Send + Sync {
    /// Returns whether `object` exists.
    fn has(&self, object: &DatabaseObject, database: &dyn Database) -> Result<bool, SnapshotError>;

    /// Returns the current state of a sequence, or `None` if it does not exist.
    fn sequence(
        &self,
        object: &DatabaseObject,
        _database: &dyn Database,
    ) -> Result<Option<SequenceSnapshot>, SnapshotError> {
        Err(SnapshotError::Unsupported(format!(
            "sequence details for {object}"
        )))
    }
}
