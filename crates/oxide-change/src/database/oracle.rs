//! Oracle capabilities.

use super::{Database, ObjectType};

/// Oracle dialect.
///
/// Targets releases before 23c, which have no `IF EXISTS` on any `DROP`.
/// Unquoted identifiers fold to upper case.
#[derive(Debug, Clone, Default)]
pub struct OracleDatabase {
    default_schema: Option<String>,
}

impl OracleDatabase {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_schema: None,
        }
    }

    /// Sets the schema assumed for unqualified objects.
    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }
}

impl Database for OracleDatabase {
    fn short_name(&self) -> &'static str {
        "oracle"
    }

    fn full_name(&self) -> &'static str {
        "Oracle"
    }

    fn supports_drop_if_exists(&self) -> &'static [ObjectType] {
        &[]
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn supports_catalogs(&self) -> bool {
        false
    }

    fn supports_sequences(&self) -> bool {
        true
    }

    fn default_schema_name(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    fn cascade_constraints_clause(&self) -> Option<&'static str> {
        Some("CASCADE CONSTRAINTS")
    }

    fn is_unquoted_identifier_char(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#')
    }

    fn correct_object_name(&self, name: &str, _object_type: ObjectType) -> String {
        name.to_uppercase()
    }
}
