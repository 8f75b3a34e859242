//! End-to-end rendering of changes.
//!
//! Runs a change through warn, validate, lower, dispatch and the visitor
//! pipeline, returning the final SQL without executing anything.

use tracing::{debug, warn};

use crate::change::Change;
use crate::database::Database;
use crate::error::{ChangeError, Result};
use crate::generator::SqlGeneratorFactory;
use crate::sql::Sql;
use crate::validation::Warnings;
use crate::visitor::VisitorPipeline;

/// A change turned into final SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChange {
    /// Node name of the change.
    pub change_name: &'static str,
    /// Warnings raised for the target dialect.
    pub warnings: Warnings,
    /// SQL after every visitor ran.
    pub sql: Vec<Sql>,
    /// Message to show once the SQL ran.
    pub confirmation: String,
}

/// Renders changes against one generator registry and visitor pipeline.
pub struct ChangeRenderer<'a> {
    factory: &'a SqlGeneratorFactory,
    visitors: VisitorPipeline,
}

impl<'a> ChangeRenderer<'a> {
    /// Creates a renderer without visitors.
    #[must_use]
    pub fn new(factory: &'a SqlGeneratorFactory) -> Self {
        Self {
            factory,
            visitors: VisitorPipeline::new(),
        }
    }

    /// Sets the visitor pipeline.
    #[must_use]
    pub fn with_visitors(mut self, visitors: VisitorPipeline) -> Self {
        self.visitors = visitors;
        self
    }

    /// Renders one change.
    ///
    /// Validation errors abort with [`ChangeError::Validation`]; warnings are
    /// logged and returned.
    pub fn render(&self, change: &dyn Change, database: &dyn Database) -> Result<RenderedChange> {
        let warnings = change.warn(database);
        for message in warnings.messages() {
            warn!(
                change = change.change_name(),
                database = database.short_name(),
                "{message}"
            );
        }

        let errors = change.validate_with(database, self.factory);
        if errors.has_errors() {
            return Err(ChangeError::Validation(errors));
        }

        let statements = change.generate_statements(database);
        let sql = self.factory.generate_sql_for_all(&statements, database)?;
        let sql = self.visitors.apply_to_sql(sql, database);
        debug!(
            change = change.change_name(),
            statements = statements.len(),
            fragments = sql.len(),
            "Rendered change"
        );

        Ok(RenderedChange {
            change_name: change.change_name(),
            warnings,
            sql,
            confirmation: change.confirmation_message(),
        })
    }

    /// Renders changes in order; stops at the first failure.
    pub fn render_all(
        &self,
        changes: &[Box<dyn Change>],
        database: &dyn Database,
    ) -> Result<Vec<RenderedChange>> {
        changes
            .iter()
            .map(|change| self.render(change.as_ref(), database))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::change::{DropTableChange, DropViewChange, RawSqlChange};
    use crate::database::{OracleDatabase, PostgresDatabase};
    use crate::visitor::{InjectRuntimeVariablesVisitor, MapChangeLogParameters};

    #[test]
    fn test_render_with_parameters() {
        let factory = SqlGeneratorFactory::with_core_generators();
        let params = MapChangeLogParameters::new().with("schema", "app");
        let renderer = ChangeRenderer::new(&factory).with_visitors(
            VisitorPipeline::new().with(InjectRuntimeVariablesVisitor::new(Arc::new(params))),
        );

        let change = RawSqlChange::new("grant select on ${schema}.users to reporting");
        let rendered = renderer
            .render(&change, &PostgresDatabase::new())
            .expect("renders");
        assert_eq!(rendered.change_name, "sql");
        assert_eq!(rendered.sql.len(), 1);
        assert_eq!(
            rendered.sql[0].to_sql(),
            "grant select on app.users to reporting"
        );
        assert!(!rendered.warnings.has_warnings());
        assert_eq!(rendered.confirmation, "Custom SQL executed");
    }

    #[test]
    fn test_render_all_keeps_order() {
        let factory = SqlGeneratorFactory::with_core_generators();
        let renderer = ChangeRenderer::new(&factory);
        let changes: Vec<Box<dyn Change>> = vec![
            Box::new(DropViewChange::new("active_users")),
            Box::new(DropTableChange::new("users")),
        ];
        let rendered = renderer
            .render_all(&changes, &PostgresDatabase::new())
            .expect("renders");
        let sql: Vec<&str> = rendered.iter().map(|r| r.sql[0].to_sql()).collect();
        assert_eq!(
            sql,
            [
                "DROP VIEW IF EXISTS active_users",
                "DROP TABLE IF EXISTS users"
            ]
        );
    }

    #[test]
    fn test_render_returns_warnings() {
        let factory = SqlGeneratorFactory::with_core_generators();
        let renderer = ChangeRenderer::new(&factory);
        let change = DropViewChange {
            if_exists: Some(true),
            ..DropViewChange::new("V")
        };
        let rendered = renderer
            .render(&change, &OracleDatabase::new())
            .expect("renders");
        assert_eq!(rendered.sql[0].to_sql(), "DROP VIEW V");
        assert_eq!(
            rendered.warnings.messages(),
            ["'ifExists' not supported for dropView on Oracle"]
        );
    }

    #[test]
    fn test_render_rejects_invalid_change() {
        let factory = SqlGeneratorFactory::with_core_generators();
        let renderer = ChangeRenderer::new(&factory);
        let err = renderer
            .render(&DropViewChange::default(), &OracleDatabase::new())
            .expect_err("missing view name");
        assert!(matches!(err, ChangeError::Validation(_)));
    }
}
