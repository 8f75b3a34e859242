//! `dropTable`.

use crate::change::{Change, ChangeNode, ChangeStatus, DropIfExists, warn_if_exists};
use crate::database::{Database, DatabaseObject, ObjectType};
use crate::error::Result;
use crate::snapshot::SnapshotService;
use crate::statement::{DropTableStatement, SqlStatement};
use crate::validation::{ValidationErrors, Warnings};

/// Drops a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTableChange {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// Table name.
    pub table_name: Option<String>,
    /// Drop dependent constraints too; `None` means no.
    pub cascade_constraints: Option<bool>,
    /// Only drop if the table exists; `None` means yes where supported.
    pub if_exists: Option<bool>,
}

impl DropTableChange {
    /// Creates a change dropping `table_name` with every option unset.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..Self::default()
        }
    }

    fn table(&self) -> DatabaseObject {
        DatabaseObject::table(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.table_name.clone().unwrap_or_default(),
        )
    }
}

impl DropIfExists for DropTableChange {
    const OBJECT_TYPE: ObjectType = ObjectType::Table;

    fn if_exists(&self) -> Option<bool> {
        self.if_exists
    }
}

impl Change for DropTableChange {
    fn change_name(&self) -> &'static str {
        "dropTable"
    }

    fn warn(&self, database: &dyn Database) -> Warnings {
        warn_if_exists(self.change_name(), self.if_exists, database, Self::OBJECT_TYPE)
    }

    fn validate_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", self.table_name.as_deref());
        errors
    }

    fn generate_statements(&self, database: &dyn Database) -> Vec<Box<dyn SqlStatement>> {
        let statement = DropTableStatement::new(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.table_name.clone().unwrap_or_default(),
            self.cascade_constraints.unwrap_or(false),
        )
        .if_exists(self.resolved_if_exists(database));
        vec![Box::new(statement)]
    }

    fn check_status(
        &self,
        snapshot: &dyn SnapshotService,
        database: &dyn Database,
    ) -> ChangeStatus {
        match snapshot.has(&self.table(), database) {
            Ok(exists) => ChangeStatus::assert_complete([(!exists, "Table exists")]),
            Err(e) => ChangeStatus::Unknown(e),
        }
    }

    fn confirmation_message(&self) -> String {
        format!("Table {} dropped", self.table_name.as_deref().unwrap_or_default())
    }

    fn to_node(&self) -> ChangeNode {
        ChangeNode::new(self.change_name())
            .with("catalogName", self.catalog_name.as_deref())
            .with("schemaName", self.schema_name.as_deref())
            .with("tableName", self.table_name.as_deref())
            .with("cascadeConstraints", self.cascade_constraints)
            .with("ifExists", self.if_exists)
    }

    fn from_node(node: &ChangeNode) -> Result<Self> {
        node.expect_name("dropTable")?;
        Ok(Self {
            catalog_name: node.string_attribute("catalogName"),
            schema_name: node.string_attribute("schemaName"),
            table_name: node.string_attribute("tableName"),
            cascade_constraints: node.bool_attribute("cascadeConstraints")?,
            if_exists: node.bool_attribute("ifExists")?,
        })
    }
}
