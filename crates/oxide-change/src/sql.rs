//! Rendered SQL fragments.

use std::fmt;

use crate::database::DatabaseObject;
use crate::statement::DEFAULT_END_DELIMITER;

/// One unit of dialect-specific SQL plus the objects it touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql {
    sql: String,
    end_delimiter: String,
    affected: Vec<DatabaseObject>,
}

impl Sql {
    /// Creates a fragment ending with `;`.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: DEFAULT_END_DELIMITER.to_string(),
            affected: Vec::new(),
        }
    }

    /// Tags the fragment with an affected object.
    #[must_use]
    pub fn affecting(mut self, object: DatabaseObject) -> Self {
        self.affected.push(object);
        self
    }

    /// Overrides the end delimiter.
    #[must_use]
    pub fn with_end_delimiter(mut self, end_delimiter: impl Into<String>) -> Self {
        self.end_delimiter = end_delimiter.into();
        self
    }

    /// Replaces the text, keeping delimiter and affected objects.
    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = sql.into();
        self
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn to_sql(&self) -> &str {
        &self.sql
    }

    /// Returns the end delimiter.
    #[must_use]
    pub fn end_delimiter(&self) -> &str {
        &self.end_delimiter
    }

    /// Returns the objects this fragment touches.
    #[must_use]
    pub fn affected_objects(&self) -> &[DatabaseObject] {
        &self.affected
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sql, self.end_delimiter)
    }
}
