//! `DROP TABLE` generation.

use crate::database::{Database, DatabaseObject, ObjectType};
use crate::generator::SqlGenerator;
use crate::sql::Sql;
use crate::statement::DropTableStatement;
use crate::validation::ValidationErrors;

/// Renders [`DropTableStatement`] on every dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTableGenerator;

impl SqlGenerator for DropTableGenerator {
    type Statement = DropTableStatement;

    fn name(&self) -> &'static str {
        "dropTable"
    }

    fn validate(
        &self,
        statement: &DropTableStatement,
        database: &dyn Database,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", Some(statement.table_name.as_str()));
        if database.cascade_constraints_clause().is_none() {
            errors.check_disallowed_field(
                "cascadeConstraints",
                statement.cascade_constraints,
                database,
                &[],
            );
        }
        if !database.supports_conditional_existence(ObjectType::Table) {
            errors.check_disallowed_field("ifExists", statement.if_exists, database, &[]);
        }
        errors
    }

    fn generate_sql(&self, statement: &DropTableStatement, database: &dyn Database) -> Vec<Sql> {
        let mut sql = String::from("DROP TABLE ");
        if statement.if_exists && database.supports_conditional_existence(ObjectType::Table) {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&database.escape_object_name(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
            &statement.table_name,
            ObjectType::Table,
        ));
        if statement.cascade_constraints {
            if let Some(clause) = database.cascade_constraints_clause() {
                sql.push(' ');
                sql.push_str(clause);
            }
        }

        vec![Sql::new(sql).affecting(DatabaseObject::table(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
            statement.table_name.clone(),
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{OracleDatabase, PostgresDatabase, SqliteDatabase};

    fn render(statement: &DropTableStatement, database: &dyn Database) -> String {
        DropTableGenerator.generate_sql(statement, database)[0]
            .to_sql()
            .to_string()
    }

    #[test]
    fn test_drop_table_postgres() {
        let db = PostgresDatabase::new();
        let stmt = DropTableStatement::new(None, Some("app"), "users", true).if_exists(true);
        assert!(!DropTableGenerator.validate(&stmt, &db).has_errors());
        assert_eq!(render(&stmt, &db), "DROP TABLE IF EXISTS app.users CASCADE");
    }

    #[test]
    fn test_drop_table_oracle_cascade_constraints() {
        let db = OracleDatabase::new();
        let stmt = DropTableStatement::new(None, None, "ORDERS", true);
        assert!(!DropTableGenerator.validate(&stmt, &db).has_errors());
        assert_eq!(render(&stmt, &db), "DROP TABLE ORDERS CASCADE CONSTRAINTS");
    }

    #[test]
    fn test_drop_table_validation() {
        let db = SqliteDatabase::new();
        let stmt = DropTableStatement::new(None, None, "", true);
        let errors = DropTableGenerator.validate(&stmt, &db);
        assert_eq!(
            errors.errors(),
            [
                "tableName is required",
                "cascadeConstraints is not allowed on sqlite"
            ]
        );

        let oracle = OracleDatabase::new();
        let stmt = DropTableStatement::new(None, None, "T", false).if_exists(true);
        let errors = DropTableGenerator.validate(&stmt, &oracle);
        assert_eq!(errors.errors(), ["ifExists is not allowed on oracle"]);
    }

    #[test]
    fn test_drop_table_tags_affected_table() {
        let db = PostgresDatabase::new();
        let stmt = DropTableStatement::new(None, Some("app"), "users", false);
        let sql = DropTableGenerator.generate_sql(&stmt, &db);
        assert_eq!(
            sql[0].affected_objects(),
            [DatabaseObject::table(None, Some("app"), "users")]
        );
    }
}
