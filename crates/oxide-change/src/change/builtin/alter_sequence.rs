//! `alterSequence`.

use crate::change::{Change, ChangeNode, ChangeStatus};
use crate::database::{Database, DatabaseObject};
use crate::error::Result;
use crate::snapshot::SnapshotService;
use crate::statement::{AlterSequenceStatement, SqlStatement};
use crate::validation::ValidationErrors;

/// Changes the properties of an existing sequence.
///
/// Every set option ends up in a single `ALTER SEQUENCE` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlterSequenceChange {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// Sequence name.
    pub sequence_name: Option<String>,
    /// New increment.
    pub increment_by: Option<i128>,
    /// New minimum value.
    pub min_value: Option<i128>,
    /// New maximum value.
    pub max_value: Option<i128>,
    /// Whether values must be generated in request order.
    pub ordered: Option<bool>,
}

impl AlterSequenceChange {
    /// Creates a change on `sequence_name` with every option unset.
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self {
            sequence_name: Some(sequence_name.into()),
            ..Self::default()
        }
    }
}

impl Change for AlterSequenceChange {
    fn change_name(&self) -> &'static str {
        "alterSequence"
    }

    fn validate_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", self.sequence_name.as_deref());
        errors
    }

    fn generate_statements(&self, _database: &dyn Database) -> Vec<Box<dyn SqlStatement>> {
        let statement = AlterSequenceStatement {
            increment_by: self.increment_by,
            min_value: self.min_value,
            max_value: self.max_value,
            ordered: self.ordered.unwrap_or(false),
            ..AlterSequenceStatement::new(
                self.catalog_name.as_deref(),
                self.schema_name.as_deref(),
                self.sequence_name.clone().unwrap_or_default(),
            )
        };
        vec![Box::new(statement)]
    }

    fn check_status(
        &self,
        snapshot: &dyn SnapshotService,
        database: &dyn Database,
    ) -> ChangeStatus {
        let object = DatabaseObject::sequence(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.sequence_name.clone().unwrap_or_default(),
        );
        let sequence = match snapshot.sequence(&object, database) {
            Ok(Some(sequence)) => sequence,
            Ok(None) => return ChangeStatus::Incomplete("Sequence does not exist".to_string()),
            Err(e) => return ChangeStatus::Unknown(e),
        };

        let mut checks = Vec::new();
        if let Some(increment_by) = self.increment_by {
            checks.push((
                sequence.increment_by == Some(increment_by),
                "Increment by has a different value",
            ));
        }
        if let Some(min_value) = self.min_value {
            checks.push((
                sequence.min_value == Some(min_value),
                "Min value has a different value",
            ));
        }
        if let Some(max_value) = self.max_value {
            checks.push((
                sequence.max_value == Some(max_value),
                "Max value has a different value",
            ));
        }
        if let Some(ordered) = self.ordered {
            checks.push((
                sequence.ordered == Some(ordered),
                "Ordered has a different value",
            ));
        }
        ChangeStatus::assert_complete(checks)
    }

    fn confirmation_message(&self) -> String {
        format!(
            "Sequence {} altered",
            self.sequence_name.as_deref().unwrap_or_default()
        )
    }

    fn to_node(&self) -> ChangeNode {
        ChangeNode::new(self.change_name())
            .with("catalogName", self.catalog_name.as_deref())
            .with("schemaName", self.schema_name.as_deref())
            .with("sequenceName", self.sequence_name.as_deref())
            .with("incrementBy", self.increment_by)
            .with("minValue", self.min_value)
            .with("maxValue", self.max_value)
            .with("ordered", self.ordered)
    }

    fn from_node(node: &ChangeNode) -> Result<Self> {
        node.expect_name("alterSequence")?;
        Ok(Self {
            catalog_name: node.string_attribute("catalogName"),
            schema_name: node.string_attribute("schemaName"),
            sequence_name: node.string_attribute("sequenceName"),
            increment_by: node.int_attribute("incrementBy")?,
            min_value: node.int_attribute("minValue")?,
            max_value: node.int_attribute("maxValue")?,
            ordered: node.bool_attribute("ordered")?,
        })
    }
}
