//! `DROP SEQUENCE` generation.

use crate::database::{Database, DatabaseObject, ObjectType};
use crate::generator::SqlGenerator;
use crate::sql::Sql;
use crate::statement::DropSequenceStatement;
use crate::validation::ValidationErrors;

/// Renders [`DropSequenceStatement`] on dialects that have sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropSequenceGenerator;

impl SqlGenerator for DropSequenceGenerator {
    type Statement = DropSequenceStatement;

    fn name(&self) -> &'static str {
        "dropSequence"
    }

    fn supports(&self, _statement: &DropSequenceStatement, database: &dyn Database) -> bool {
        database.supports_sequences()
    }

    fn validate(
        &self,
        statement: &DropSequenceStatement,
        database: &dyn Database,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", Some(statement.sequence_name.as_str()));
        if !database.supports_conditional_existence(ObjectType::Sequence) {
            errors.check_disallowed_field("ifExists", statement.if_exists, database, &[]);
        }
        errors
    }

    fn generate_sql(&self, statement: &DropSequenceStatement, database: &dyn Database) -> Vec<Sql> {
        let mut sql = String::from("DROP SEQUENCE ");
        if statement.if_exists && database.supports_conditional_existence(ObjectType::Sequence) {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&database.escape_object_name(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
            &statement.sequence_name,
            ObjectType::Sequence,
        ));

        vec![Sql::new(sql).affecting(DatabaseObject::sequence(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
            statement.sequence_name.clone(),
        ))]
    }
}
