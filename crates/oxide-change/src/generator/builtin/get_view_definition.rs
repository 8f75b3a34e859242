//! View definition lookups through `INFORMATION_SCHEMA.VIEWS`.

use crate::database::{CatalogAndSchema, Database, ObjectType};
use crate::generator::{Applicability, PRIORITY_DATABASE, SqlGenerator};
use crate::sql::Sql;
use crate::statement::GetViewDefinitionStatement;
use crate::validation::ValidationErrors;

/// Quotes `value` as a string literal, doubling embedded quotes.
fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn base_query(statement: &GetViewDefinitionStatement, database: &dyn Database) -> String {
    format!(
        "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS where TABLE_NAME={}",
        literal(&database.correct_object_name(&statement.view_name, ObjectType::View))
    )
}

fn validate_view_name(statement: &GetViewDefinitionStatement) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.check_required_field("viewName", Some(statement.view_name.as_str()));
    errors
}

/// Generic lookup: filters by schema and catalog as far as the dialect
/// supports them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetViewDefinitionGenerator;

impl SqlGenerator for GetViewDefinitionGenerator {
    type Statement = GetViewDefinitionStatement;

    fn name(&self) -> &'static str {
        "getViewDefinition"
    }

    fn validate(
        &self,
        statement: &GetViewDefinitionStatement,
        _database: &dyn Database,
    ) -> ValidationErrors {
        validate_view_name(statement)
    }

    fn generate_sql(
        &self,
        statement: &GetViewDefinitionStatement,
        database: &dyn Database,
    ) -> Vec<Sql> {
        let location = CatalogAndSchema::new(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
        )
        .customize(database);

        let mut sql = base_query(statement, database);
        if database.supports_schemas() {
            if let Some(schema) = &location.schema_name {
                sql.push_str(&format!(" and TABLE_SCHEMA={}", literal(schema)));
            }
        }
        if database.supports_catalogs() {
            if let Some(catalog) = &location.catalog_name {
                sql.push_str(&format!(" and TABLE_CATALOG={}", literal(catalog)));
            }
        }
        vec![Sql::new(sql)]
    }
}

/// MySQL keeps databases in `TABLE_SCHEMA`, so the catalog is matched there.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlGetViewDefinitionGenerator;

impl SqlGenerator for MySqlGetViewDefinitionGenerator {
    type Statement = GetViewDefinitionStatement;

    fn name(&self) -> &'static str {
        "mysqlGetViewDefinition"
    }

    fn applicability(&self) -> Applicability {
        Applicability::Dialects(&["mysql"])
    }

    fn priority(&self) -> i32 {
        PRIORITY_DATABASE
    }

    fn validate(
        &self,
        statement: &GetViewDefinitionStatement,
        _database: &dyn Database,
    ) -> ValidationErrors {
        validate_view_name(statement)
    }

    fn generate_sql(
        &self,
        statement: &GetViewDefinitionStatement,
        database: &dyn Database,
    ) -> Vec<Sql> {
        let location = CatalogAndSchema::new(
            statement.catalog_name.as_deref(),
            statement.schema_name.as_deref(),
        )
        .customize(database);

        let mut sql = base_query(statement, database);
        if let Some(catalog) = &location.catalog_name {
            sql.push_str(&format!(" and TABLE_SCHEMA={}", literal(catalog)));
        }
        vec![Sql::new(sql)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MySqlDatabase, OracleDatabase, PostgresDatabase, SqliteDatabase};

    #[test]
    fn test_generic_filters_by_supported_parts() {
        let stmt = GetViewDefinitionStatement::new(Some("ignored"), Some("app"), "active_users");
        assert_eq!(
            GetViewDefinitionGenerator.generate_sql(&stmt, &OracleDatabase::new())[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS \
             where TABLE_NAME='ACTIVE_USERS' and TABLE_SCHEMA='APP'"
        );
        assert_eq!(
            GetViewDefinitionGenerator.generate_sql(&stmt, &PostgresDatabase::new())[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS \
             where TABLE_NAME='active_users' and TABLE_SCHEMA='app' and TABLE_CATALOG='ignored'"
        );
        assert_eq!(
            GetViewDefinitionGenerator.generate_sql(&stmt, &SqliteDatabase::new())[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS where TABLE_NAME='active_users'"
        );
    }

    #[test]
    fn test_mysql_filters_schema_by_catalog() {
        let db = MySqlDatabase::new().with_default_catalog("shop");
        let stmt = GetViewDefinitionStatement::new(None, None, "recent_orders");
        assert_eq!(
            MySqlGetViewDefinitionGenerator.generate_sql(&stmt, &db)[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS \
             where TABLE_NAME='recent_orders' and TABLE_SCHEMA='shop'"
        );

        let stmt = GetViewDefinitionStatement::new(None, None, "recent_orders");
        assert_eq!(
            MySqlGetViewDefinitionGenerator.generate_sql(&stmt, &MySqlDatabase::new())[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS where TABLE_NAME='recent_orders'"
        );
    }

    #[test]
    fn test_names_are_escaped_as_literals() {
        let stmt = GetViewDefinitionStatement::new(Some("o'cat"), Some("o'app"), "o'view");
        assert_eq!(
            GetViewDefinitionGenerator.generate_sql(&stmt, &PostgresDatabase::new())[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS \
             where TABLE_NAME='o''view' and TABLE_SCHEMA='o''app' and TABLE_CATALOG='o''cat'"
        );

        let db = MySqlDatabase::new().with_default_catalog("o'shop");
        let stmt = GetViewDefinitionStatement::new(None, None, "v");
        assert_eq!(
            MySqlGetViewDefinitionGenerator.generate_sql(&stmt, &db)[0].to_sql(),
            "select VIEW_DEFINITION from INFORMATION_SCHEMA.VIEWS \
             where TABLE_NAME='v' and TABLE_SCHEMA='o''shop'"
        );
    }
}
