//! Pass-through SQL.

use crate::database::Database;
use crate::generator::SqlGenerator;
use crate::sql::Sql;
use crate::statement::RawSqlStatement;
use crate::validation::ValidationErrors;

/// Emits [`RawSqlStatement`] text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSqlGenerator;

impl SqlGenerator for RawSqlGenerator {
    type Statement = RawSqlStatement;

    fn name(&self) -> &'static str {
        "rawSql"
    }

    fn validate(&self, statement: &RawSqlStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sql", Some(statement.sql.trim()));
        errors
    }

    fn generate_sql(&self, statement: &RawSqlStatement, _database: &dyn Database) -> Vec<Sql> {
        vec![Sql::new(statement.sql.clone()).with_end_delimiter(statement.end_delimiter())]
    }
}
