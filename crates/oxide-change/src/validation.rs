//! Validation errors and warnings.
//!
//! Both are plain message lists meant for display as-is. Errors block
//! generation, warnings never do.

use std::fmt;

use crate::database::Database;

/// Aggregated hard validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    /// Creates an empty error list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error message unless the same message is already recorded.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }

    /// Records an error when a required field is absent or empty.
    pub fn check_required_field(&mut self, field: &str, value: Option<&str>) {
        if value.is_none_or(str::is_empty) {
            self.add_error(format!("{field} is required"));
        }
    }

    /// Records an error when a field is set but not allowed on the target dialect.
    ///
    /// An empty `disallowed_on` list means the field is disallowed on every
    /// dialect; otherwise only on the listed short names.
    pub fn check_disallowed_field(
        &mut self,
        field: &str,
        is_set: bool,
        database: &dyn Database,
        disallowed_on: &[&str],
    ) {
        let disallowed =
            disallowed_on.is_empty() || disallowed_on.contains(&database.short_name());
        if is_set && disallowed {
            self.add_error(format!(
                "{field} is not allowed on {}",
                database.short_name()
            ));
        }
    }

    /// Appends every error of `other` not already recorded.
    pub fn extend(&mut self, other: Self) {
        for message in other.errors {
            self.add_error(message);
        }
    }

    /// Returns true if at least one error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the error messages in the order they were recorded.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(|e| format!("  - {e}")).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Non-fatal advisory messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    /// Creates an empty warning list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Appends every warning of `other`.
    pub fn extend(&mut self, other: Self) {
        self.messages.extend(other.messages);
    }

    /// Returns true if at least one warning was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Returns the warning messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{OracleDatabase, PostgresDatabase};

    #[test]
    fn test_duplicate_errors_are_recorded_once() {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", None);
        let mut more = ValidationErrors::new();
        more.check_required_field("tableName", Some(""));
        more.add_error("cascadeConstraints is not allowed on sqlite");
        errors.extend(more);
        assert_eq!(
            errors.errors(),
            [
                "tableName is required",
                "cascadeConstraints is not allowed on sqlite"
            ]
        );
    }

    #[test]
    fn test_required_field() {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", Some("users"));
        assert!(!errors.has_errors());

        errors.check_required_field("tableName", None);
        errors.check_required_field("viewName", Some(""));
        assert_eq!(
            errors.errors(),
            ["tableName is required", "viewName is required"]
        );
    }

    #[test]
    fn test_disallowed_field() {
        let postgres = PostgresDatabase::new();
        let oracle = OracleDatabase::new();

        let mut errors = ValidationErrors::new();
        errors.check_disallowed_field("ordered", true, &oracle, &["postgresql"]);
        assert!(!errors.has_errors());

        errors.check_disallowed_field("ordered", false, &postgres, &["postgresql"]);
        assert!(!errors.has_errors());

        errors.check_disallowed_field("ordered", true, &postgres, &["postgresql"]);
        errors.check_disallowed_field("ifExists", true, &oracle, &[]);
        assert_eq!(
            errors.errors(),
            [
                "ordered is not allowed on postgresql",
                "ifExists is not allowed on oracle"
            ]
        );
    }

    #[test]
    fn test_display_lists_every_error() {
        let mut errors = ValidationErrors::new();
        errors.add_error("first");
        errors.add_error("second");
        assert_eq!(errors.to_string(), "  - first\n  - second");
    }
}
