//! `DROP VIEW` generation.

use crate::database::{Database, DatabaseObject, ObjectType};
use crate::generator::SqlGenerator;
use crate::sql::Sql;
use crate::statement::DropViewStatement;
use crate::validation::ValidationErrors;

/// Renders [`DropViewStatement`] on every dialect.
///
/// `IF EXISTS` is gated on the dialect's VIEW capability, not TABLE.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropViewGenerator;

impl SqlGenerator for DropViewGenerator {
    type Statement = DropViewStatement;

    fn name(&self) -> &'static str {
        "dropView"
    }

    fn validate(&self, statement: &DropViewStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("viewName", Some(statement.view_name.as_str()));
        if !database.supports_conditional_existence(ObjectType::View) {
            errors.check_disallowed_field("ifExists", statement.if_exists, database, &[]);
        }
        errors
    }

    fn generate_sql(&self, statement: &DropViewStatement, database: &dyn Database) -> Vec<Sql> {
        let if_exists =
            statement.if_exists && database.supports_conditional_existence(ObjectType::View);
        let sql = format!(
            "DROP VIEW {}{}",
            if if_exists { "IF EXISTS " } else { "" },
            database.escape_object_name(
                statement.catalog_name.as_deref(),
                statement.schema_name.as_deref(),
                &statement.view_name,
                ObjectType::View,
            )
        );

        vec![Sql::new(sql).affecting(DatabaseObject::view(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
            statement.view_name.clone(),
        ))]
    }
}
