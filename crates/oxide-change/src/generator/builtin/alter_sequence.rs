//! `ALTER SEQUENCE` generation.

use crate::database::{Database, DatabaseObject, ObjectType};
use crate::generator::SqlGenerator;
use crate::sql::Sql;
use crate::statement::AlterSequenceStatement;
use crate::validation::ValidationErrors;

/// Renders [`AlterSequenceStatement`] on dialects that have sequences.
///
/// Clauses always come out as `INCREMENT BY`, `MINVALUE`, `MAXVALUE`,
/// `ORDER`, each present only when its option is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlterSequenceGenerator;

impl SqlGenerator for AlterSequenceGenerator {
    type Statement = AlterSequenceStatement;

    fn name(&self) -> &'static str {
        "alterSequence"
    }

    fn supports(&self, _statement: &AlterSequenceStatement, database: &dyn Database) -> bool {
        database.supports_sequences()
    }

    fn validate(
        &self,
        statement: &AlterSequenceStatement,
        database: &dyn Database,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", Some(statement.sequence_name.as_str()));
        if statement.is_empty() {
            errors.add_error(
                "at least one of incrementBy, minValue, maxValue, ordered is required",
            );
        }
        errors.check_disallowed_field("ordered", statement.ordered, database, &["postgresql"]);
        errors
    }

    fn generate_sql(
        &self,
        statement: &AlterSequenceStatement,
        database: &dyn Database,
    ) -> Vec<Sql> {
        let mut clauses = Vec::new();
        if let Some(increment_by) = statement.increment_by {
            clauses.push(format!("INCREMENT BY {increment_by}"));
        }
        if let Some(min_value) = statement.min_value {
            clauses.push(format!("MINVALUE {min_value}"));
        }
        if let Some(max_value) = statement.max_value {
            clauses.push(format!("MAXVALUE {max_value}"));
        }
        if statement.ordered {
            clauses.push("ORDER".to_string());
        }

        let sql = format!(
            "ALTER SEQUENCE {} {}",
            database.escape_object_name(
                statement.catalog_name.as_deref(),
                statement.schema_name.as_deref(),
                &statement.sequence_name,
                ObjectType::Sequence,
            ),
            clauses.join(" ")
        );

        vec![Sql::new(sql).affecting(DatabaseObject::sequence(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
            statement.sequence_name.clone(),
        ))]
    }
}
