//! `dropView`.

use crate::change::{Change, ChangeNode, ChangeStatus, DropIfExists, warn_if_exists};
use crate::database::{Database, DatabaseObject, ObjectType};
use crate::error::Result;
use crate::snapshot::SnapshotService;
use crate::statement::{DropViewStatement, SqlStatement};
use crate::validation::{ValidationErrors, Warnings};

/// Drops a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropViewChange {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// View name.
    pub view_name: Option<String>,
    /// Only drop if the view exists; `None` means yes where supported.
    pub if_exists: Option<bool>,
}

impl DropViewChange {
    /// Creates a change dropping `view_name` with every option unset.
    #[must_use]
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: Some(view_name.into()),
            ..Self::default()
        }
    }
}

impl DropIfExists for DropViewChange {
    const OBJECT_TYPE: ObjectType = ObjectType::View;

    fn if_exists(&self) -> Option<bool> {
        self.if_exists
    }
}

impl Change for DropViewChange {
    fn change_name(&self) -> &'static str {
        "dropView"
    }

    fn warn(&self, database: &dyn Database) -> Warnings {
        warn_if_exists(self.change_name(), self.if_exists, database, Self::OBJECT_TYPE)
    }

    fn validate_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("viewName", self.view_name.as_deref());
        errors
    }

    fn generate_statements(&self, database: &dyn Database) -> Vec<Box<dyn SqlStatement>> {
        vec![Box::new(DropViewStatement::new(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.view_name.clone().unwrap_or_default(),
            self.resolved_if_exists(database),
        ))]
    }

    fn check_status(
        &self,
        snapshot: &dyn SnapshotService,
        database: &dyn Database,
    ) -> ChangeStatus {
        let view = DatabaseObject::view(
            self.catalog_name.as_deref(),
            self.schema_name.as_deref(),
            self.view_name.clone().unwrap_or_default(),
        );
        match snapshot.has(&view, database) {
            Ok(exists) => ChangeStatus::assert_complete([(!exists, "View exists")]),
            Err(e) => ChangeStatus::Unknown(e),
        }
    }

    fn confirmation_message(&self) -> String {
        format!("View {} dropped", self.view_name.as_deref().unwrap_or_default())
    }

    fn to_node(&self) -> ChangeNode {
        ChangeNode::new(self.change_name())
            .with("catalogName", self.catalog_name.as_deref())
            .with("schemaName", self.schema_name.as_deref())
            .with("viewName", self.view_name.as_deref())
            .with("ifExists", self.if_exists)
    }

    fn from_node(node: &ChangeNode) -> Result<Self> {
        node.expect_name("dropView")?;
        Ok(Self {
            catalog_name: node.string_attribute("catalogName"),
            schema_name: node.string_attribute("schemaName"),
            view_name: node.string_attribute("viewName"),
            if_exists: node.bool_attribute("ifExists")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MySqlDatabase, OracleDatabase};

    fn resolved_if_exists(change: &DropViewChange, database: &dyn Database) -> bool {
        change.generate_statements(database)[0]
            .as_any()
            .downcast_ref::<DropViewStatement>()
            .expect("drop view statement")
            .if_exists
    }

    #[test]
    fn test_if_exists_follows_view_support() {
        let mysql = MySqlDatabase::new();
        let oracle = OracleDatabase::new();
        let change = DropViewChange::new("V");

        assert!(resolved_if_exists(&change, &mysql));
        assert!(!resolved_if_exists(&change, &oracle));
        assert!(!change.warn(&oracle).has_warnings());

        let explicit = DropViewChange {
            if_exists: Some(true),
            ..change
        };
        assert!(explicit.warn(&oracle).has_warnings());
        assert!(!resolved_if_exists(&explicit, &oracle));
    }

    #[test]
    fn test_node_and_message() {
        let change = DropViewChange {
            if_exists: Some(false),
            ..DropViewChange::new("V")
        };
        let node = change.to_node();
        assert_eq!(node.attribute("ifExists"), Some("false"));
        assert_eq!(node.attribute("schemaName"), None);
        assert_eq!(DropViewChange::from_node(&node).expect("valid node"), change);
        assert_eq!(change.confirmation_message(), "View V dropped");
    }
}
