//! `dropSequence`.

use crate::change::{Change, ChangeNode, ChangeStatus, DropIfExists, warn_if_exists};
use crate::database::{Database, DatabaseObject, ObjectType};
use crate::error::Result;
use crate::snapshot::SnapshotService;
use crate::statement::{DropSequenceStatement, SqlStatement};
use crate::validation::{ValidationErrors, Warnings};

/// Drops a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropSequenceChange {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// Sequence name.
    pub sequence_name: Option<String>,
    /// Only drop if the sequence exists; `None` means yes where supported.
    pub if_exists: Option<bool>,
}

impl DropSequenceChange {
    /// Creates a change dropping `sequence_name` with every option unset.
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            sequence_name: Some(sequence_name.into()),
            ..Self::default()
        }
    }
}

impl DropIfExists for DropSequenceChange {
    const OBJECT_TYPE: ObjectType = ObjectType::Sequence;

    fn if_exists(&self) -> Option<bool> {
        self.if_exists
    }
}

impl Change for DropSequenceChange {
    fn change_name(&self) -> &'static str {
        "dropSequence"
    }

    fn warn(&self, database: &dyn Database) -> Warnings {
        warn_if_exists(self.change_name(), self.if_exists, database, Self::OBJECT_TYPE)
    }

    fn validate_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", self.sequence_name.as_deref());
        errors
    }

    fn generate_statements(&self, database: &dyn Database) -> Vec<Box<dyn SqlStatement>> {
        vec![Box::new(DropSequenceStatement::new(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.sequence_name.clone().unwrap_or_default(),
            self.resolved_if_exists(database),
        ))]
    }

    fn check_status(
        &self,
        snapshot: &dyn SnapshotService,
        database: &dyn Database,
    ) -> ChangeStatus {
        let sequence = DatabaseObject::sequence(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.sequence_name.clone().unwrap_or_default(),
        );
        match snapshot.has(&sequence, database) {
            Ok(exists) => ChangeStatus::assert_complete([(!exists, "Sequence exists")]),
            Err(e) => ChangeStatus::Unknown(e),
        }
    }

    fn confirmation_message(&self) -> String {
        format!(
            "Sequence {} dropped",
            self.sequence_name.as_deref().unwrap_or_default()
        )
    }

    fn to_node(&self) -> ChangeNode {
        ChangeNode::new(self.change_name())
            .with("catalogName", self.catalog_name.as_deref())
            .with("schemaName", self.schema_name.as_deref())
            .with("sequenceName", self.sequence_name.as_deref())
            .with("ifExists", self.if_exists)
    }

    fn from_node(node: &ChangeNode) -> Result<Self> {
        node.expect_name("dropSequence")?;
        Ok(Self {
            catalog_name: node.string_attribute("catalogName"),
            schema_name: node.string_attribute("schemaName"),
            sequence_name: node.string_attribute("sequenceName"),
            if_exists: node.bool_attribute("ifExists")?,
        })
    }
}
