//! Dialect-agnostic statements.
//!
//! A statement is what a change lowers into: pure intent with every flag
//! already resolved. Generators turn statements into SQL text.

use std::any::Any;
use std::fmt::Debug;

/// A dialect-agnostic operation descriptor.
///
/// Implement this for new statement types, then register a generator for
/// them on a [`crate::generator::SqlGeneratorFactory`].
pub trait SqlStatement: Any + Debug + Send + Sync {
    /// Name used in error messages.
    fn statement_name(&self) -> &'static str;

    /// Returns `self` as [`Any`] so generators can recover the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// `DROP TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropTableStatement {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// Table name.
    pub table_name: String,
    /// Whether dependent constraints are dropped as well.
    pub cascade_constraints: bool,
    /// Whether to emit `IF EXISTS`.
    pub if_exists: bool,
}

impl DropTableStatement {
    /// Creates a drop table statement without `IF EXISTS`.
    ///
    /// Changes decide the flag per dialect and set it with
    /// [`DropTableStatement::if_exists`]; a hand-built statement opts in.
    #[must_use]
    pub fn new(
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        table_name: impl Into<String>,
        cascade_constraints: bool,
    ) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            table_name: table_name.into(),
            cascade_constraints,
            if_exists: false,
        }
    }

    /// Sets the `IF EXISTS` flag.
    #[must_use]
    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }
}

impl SqlStatement for DropTableStatement {
    fn statement_name(&self) -> &'static str {
        "dropTable"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `DROP VIEW`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropViewStatement {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// View name.
    pub view_name: String,
    /// Whether to emit `IF EXISTS`.
    pub if_exists: bool,
}

impl DropViewStatement {
    /// Creates a drop view statement.
    #[must_use]
    pub fn new(
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        view_name: impl Into<String>,
        if_exists: bool,
    ) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            view_name: view_name.into(),
            if_exists,
        }
    }
}

impl SqlStatement for DropViewStatement {
    fn statement_name(&self) -> &'static str {
        "dropView"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `DROP SEQUENCE`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropSequenceStatement {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// Sequence name.
    pub sequence_name: String,
    /// Whether to emit `IF EXISTS`.
    pub if_exists: bool,
}

impl DropSequenceStatement {
    /// Creates a drop sequence statement.
    #[must_use]
    pub fn new(
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        sequence_name: impl Into<String>,
        if_exists: bool,
    ) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            sequence_name: sequence_name.into(),
            if_exists,
        }
    }
}

impl SqlStatement for DropSequenceStatement {
    fn statement_name(&self) -> &'static str {
        "dropSequence"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `ALTER SEQUENCE`.
///
/// Numeric options stay optional: an absent value emits no clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterSequenceStatement {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// Sequence name.
    pub sequence_name: String,
    /// New increment.
    pub increment_by: Option<i128>,
    /// New minimum value.
    pub min_value: Option<i128>,
    /// New maximum value.
    pub max_value: Option<i128>,
    /// Whether to emit `ORDER`.
    pub ordered: bool,
}

impl AlterSequenceStatement {
    /// Creates an alter sequence statement with no options set.
    #[must_use]
    pub fn new(
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        sequence_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            sequence_name: sequence_name.into(),
            ..Self::default()
        }
    }

    /// Returns true if no option would produce a clause.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.increment_by.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && !self.ordered
    }
}

impl SqlStatement for AlterSequenceStatement {
    fn statement_name(&self) -> &'static str {
        "alterSequence"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reads the stored definition of a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetViewDefinitionStatement {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
    /// View name.
    pub view_name: String,
}

impl GetViewDefinitionStatement {
    /// Creates a view definition lookup.
    #[must_use]
    pub fn new(
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        view_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            view_name: view_name.into(),
        }
    }
}

impl SqlStatement for GetViewDefinitionStatement {
    fn statement_name(&self) -> &'static str {
        "getViewDefinition"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Default end delimiter of raw SQL.
pub const DEFAULT_END_DELIMITER: &str = ";";

/// SQL text passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSqlStatement {
    /// The SQL text.
    pub sql: String,
    end_delimiter: String,
    /// Name of the property a returned value is stored in.
    pub result_in: Option<String>,
}

impl RawSqlStatement {
    /// Creates a raw statement with the default `;` delimiter.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: DEFAULT_END_DELIMITER.to_string(),
            result_in: None,
        }
    }

    /// Overrides the end delimiter.
    #[must_use]
    pub fn with_end_delimiter(mut self, end_delimiter: impl Into<String>) -> Self {
        self.end_delimiter = end_delimiter.into();
        self
    }

    /// Stores the single returned value under `property`.
    #[must_use]
    pub fn with_result_in(mut self, property: impl Into<String>) -> Self {
        self.result_in = Some(property.into());
        self
    }

    /// Returns the end delimiter with `\r` and `\n` escapes expanded.
    #[must_use]
    pub fn end_delimiter(&self) -> String {
        self.end_delimiter.replace("\\r", "\r").replace("\\n", "\n")
    }
}

impl SqlStatement for RawSqlStatement {
    fn statement_name(&self) -> &'static str {
        "rawSql"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_table_defaults_to_no_if_exists() {
        let stmt = DropTableStatement::new(None, Some("app"), "users", true);
        assert!(!stmt.if_exists);
        assert!(stmt.cascade_constraints);
        assert!(stmt.if_exists(true).if_exists);
    }

    #[test]
    fn test_alter_sequence_is_empty() {
        let mut stmt = AlterSequenceStatement::new(None, None, "seq");
        assert!(stmt.is_empty());
        stmt.ordered = true;
        assert!(!stmt.is_empty());
    }

    #[test]
    fn test_raw_sql_end_delimiter_escapes() {
        let stmt = RawSqlStatement::new("select 1");
        assert_eq!(stmt.end_delimiter(), ";");

        let stmt = RawSqlStatement::new("select 1").with_end_delimiter("\\ngo");
        assert_eq!(stmt.end_delimiter(), "\ngo");
    }

    #[test]
    fn test_downcast_through_trait_object() {
        let boxed: Box<dyn SqlStatement> = Box::new(DropViewStatement::new(None, None, "v", true));
        let view = boxed
            .as_any()
            .downcast_ref::<DropViewStatement>()
            .expect("concrete type");
        assert_eq!(view.view_name, "v");
        assert!(boxed.as_any().downcast_ref::<DropTableStatement>().is_none());
    }
}
