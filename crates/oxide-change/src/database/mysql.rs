//! MySQL capabilities.

use super::{Database, ObjectType};

/// MySQL dialect.
///
/// MySQL has no separate schema level: a "database" is a catalog, and
/// identifiers are quoted with backticks.
#[derive(Debug, Clone, Default)]
pub struct MySqlDatabase {
    default_catalog: Option<String>,
}

impl MySqlDatabase {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_catalog: None,
        }
    }

    /// Sets the database (catalog) assumed for unqualified objects.
    #[must_use]
    pub fn with_default_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.default_catalog = Some(catalog.into());
        self
    }
}

impl Database for MySqlDatabase {
    fn short_name(&self) -> &'static str {
        "mysql"
    }

    fn full_name(&self) -> &'static str {
        "MySQL"
    }

    fn supports_drop_if_exists(&self) -> &'static [ObjectType] {
        &[ObjectType::Table, ObjectType::View]
    }

    fn supports_schemas(&self) -> bool {
        false
    }

    fn supports_catalogs(&self) -> bool {
        true
    }

    fn supports_sequences(&self) -> bool {
        false
    }

    fn default_catalog_name(&self) -> Option<&str> {
        self.default_catalog.as_deref()
    }

    // Accepted and ignored by MySQL.
    fn cascade_constraints_clause(&self) -> Option<&'static str> {
        Some("CASCADE")
    }

    fn quote_chars(&self) -> (char, char) {
        ('`', '`')
    }

    fn is_unquoted_identifier_char(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '$'
    }
}
