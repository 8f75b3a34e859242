//! Post-generation SQL rewriting.
//!
//! Visitors run over rendered SQL text in registration order, each seeing
//! the previous one's output. They only rewrite text; they never add or
//! remove fragments.

mod parameters;

pub use parameters::{ChangeLogParameters, MapChangeLogParameters};

use std::sync::Arc;

use regex::Regex;

use crate::database::Database;
use crate::error::Result;
use crate::sql::Sql;

/// A pure text rewrite applied to generated SQL.
pub trait SqlVisitor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Returns whether this visitor runs for `database`.
    fn applies_to(&self, _database: &dyn Database) -> bool {
        true
    }

    /// Rewrites `sql`.
    fn modify_sql(&self, sql: &str, database: &dyn Database) -> String;
}

/// Ordered list of visitors.
#[derive(Default)]
pub struct VisitorPipeline {
    visitors: Vec<Box<dyn SqlVisitor>>,
}

impl VisitorPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a visitor (builder form).
    #[must_use]
    pub fn with(mut self, visitor: impl SqlVisitor + 'static) -> Self {
        self.push(visitor);
        self
    }

    /// Appends a visitor.
    pub fn push(&mut self, visitor: impl SqlVisitor + 'static) {
        self.visitors.push(Box::new(visitor));
    }

    /// Returns the number of visitors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Returns true if the pipeline has no visitors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Runs every applicable visitor over `sql`.
    #[must_use]
    pub fn apply(&self, sql: &str, database: &dyn Database) -> String {
        self.visitors
            .iter()
            .filter(|v| v.applies_to(database))
            .fold(sql.to_string(), |sql, visitor| {
                visitor.modify_sql(&sql, database)
            })
    }

    /// Rewrites the text of every fragment, keeping delimiters and affected objects.
    #[must_use]
    pub fn apply_to_sql(&self, sql: Vec<Sql>, database: &dyn Database) -> Vec<Sql> {
        sql.into_iter()
            .map(|fragment| {
                let text = self.apply(fragment.to_sql(), database);
                fragment.with_sql(text)
            })
            .collect()
    }
}

/// Expands `${name}` runtime parameters.
///
/// Substitution is purely textual: tokens inside string literals are
/// expanded as well.
#[derive(Clone)]
pub struct InjectRuntimeVariablesVisitor {
    parameters: Arc<dyn ChangeLogParameters>,
}

impl InjectRuntimeVariablesVisitor {
    /// Creates a visitor expanding through `parameters`.
    #[must_use]
    pub fn new(parameters: Arc<dyn ChangeLogParameters>) -> Self {
        Self { parameters }
    }
}

impl SqlVisitor for InjectRuntimeVariablesVisitor {
    fn name(&self) -> &'static str {
        "InjectRuntimeVariablesVisitor"
    }

    fn modify_sql(&self, sql: &str, _database: &dyn Database) -> String {
        self.parameters.expand_expressions(sql)
    }
}

/// Replaces text, literally or by regex, optionally on some dialects only.
#[derive(Debug, Clone)]
pub struct ReplaceSqlVisitor {
    pattern: Regex,
    replacement: String,
    dbms: Vec<String>,
}

impl ReplaceSqlVisitor {
    /// Replaces every occurrence of `text`.
    pub fn literal(text: &str, replacement: impl Into<String>) -> Result<Self> {
        let replacement: String = replacement.into();
        Self::regex(&regex::escape(text), replacement.replace('$', "$$"))
    }

    /// Replaces every match of `pattern`; `$1`-style group references work.
    pub fn regex(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            dbms: Vec::new(),
        })
    }

    /// Restricts the visitor to the given dialect short names.
    #[must_use]
    pub fn for_dbms<I, S>(mut self, dbms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dbms = dbms.into_iter().map(Into::into).collect();
        self
    }
}

impl SqlVisitor for ReplaceSqlVisitor {
    fn name(&self) -> &'static str {
        "ReplaceSqlVisitor"
    }

    fn applies_to(&self, database: &dyn Database) -> bool {
        self.dbms.is_empty() || self.dbms.iter().any(|d| d == database.short_name())
    }

    fn modify_sql(&self, sql: &str, _database: &dyn Database) -> String {
        self.pattern
            .replace_all(sql, self.replacement.as_str())
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DatabaseObject, PostgresDatabase, SqliteDatabase};

    struct Upper;

    impl SqlVisitor for Upper {
        fn name(&self) -> &'static str {
            "Upper"
        }

        fn modify_sql(&self, sql: &str, _database: &dyn Database) -> String {
            sql.to_uppercase()
        }
    }

    #[test]
    fn test_visitors_run_in_order() {
        let params = MapChangeLogParameters::new().with("t", "users");
        let db = SqliteDatabase::new();

        let expand_then_upper = VisitorPipeline::new()
            .with(InjectRuntimeVariablesVisitor::new(Arc::new(params.clone())))
            .with(Upper);
        assert_eq!(expand_then_upper.apply("drop table ${t}", &db), "DROP TABLE USERS");

        let upper_then_expand = VisitorPipeline::new()
            .with(Upper)
            .with(InjectRuntimeVariablesVisitor::new(Arc::new(params)));
        assert_eq!(upper_then_expand.apply("drop table ${t}", &db), "DROP TABLE ${T}");
    }

    #[test]
    fn test_apply_to_sql_keeps_metadata() {
        let params = MapChangeLogParameters::new().with("t", "users");
        let pipeline =
            VisitorPipeline::new().with(InjectRuntimeVariablesVisitor::new(Arc::new(params)));
        let sql = vec![
            Sql::new("DROP TABLE ${t}")
                .affecting(DatabaseObject::table(None, None, "${t}"))
                .with_end_delimiter("\nGO"),
        ];
        let visited = pipeline.apply_to_sql(sql, &SqliteDatabase::new());
        assert_eq!(visited[0].to_sql(), "DROP TABLE users");
        assert_eq!(visited[0].end_delimiter(), "\nGO");
        assert_eq!(visited[0].affected_objects()[0].name, "${t}");
    }

    #[test]
    fn test_replace_visitor() {
        let literal = ReplaceSqlVisitor::literal("$x.*", "$1").expect("valid");
        assert_eq!(
            literal.modify_sql("a $x.* b", &SqliteDatabase::new()),
            "a $1 b"
        );

        let regex = ReplaceSqlVisitor::regex(r"CASCADE$", "").expect("valid");
        assert_eq!(
            regex.modify_sql("DROP TABLE t CASCADE", &PostgresDatabase::new()),
            "DROP TABLE t "
        );

        assert!(ReplaceSqlVisitor::regex("(", "").is_err());
    }

    #[test]
    fn test_replace_visitor_dbms_filter() {
        let pipeline = VisitorPipeline::new().with(
            ReplaceSqlVisitor::literal("CASCADE", "")
                .expect("valid")
                .for_dbms(["postgresql"]),
        );
        assert_eq!(
            pipeline.apply("DROP TABLE t CASCADE", &PostgresDatabase::new()),
            "DROP TABLE t "
        );
        assert_eq!(
            pipeline.apply("DROP TABLE t CASCADE", &SqliteDatabase::new()),
            "DROP TABLE t CASCADE"
        );
    }
}
