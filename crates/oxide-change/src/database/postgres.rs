//! PostgreSQL capabilities.

use super::{Database, ObjectType};

/// PostgreSQL dialect.
///
/// Unquoted identifiers fold to lower case. Mixed-case names are quoted to
/// keep their case; all-upper-case names fold like the lookups in
/// [`Database::correct_object_name`] do.
#[derive(Debug, Clone, Default)]
pub struct PostgresDatabase {
    default_schema: Option<String>,
}

impl PostgresDatabase {
    /// Creates a new PostgreSQL dialect.
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

impl Database for PostgresDatabase {
    fn short_name(&self) -> &'static str {
        "postgresql"
    }

    fn full_name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn supports_drop_if_exists(&self) -> &'static [ObjectType] {
        &[
            ObjectType::Table,
            ObjectType::View,
            ObjectType::Sequence,
            ObjectType::Index,
            ObjectType::Schema,
        ]
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn supports_catalogs(&self) -> bool {
        true
    }

    fn supports_sequences(&self) -> bool {
        true
    }

    fn default_schema_name(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    fn cascade_constraints_clause(&self) -> Option<&'static str> {
        Some("CASCADE")
    }

    fn needs_quoting(&self, name: &str) -> bool {
        name.is_empty()
            || name.starts_with(|c: char| c.is_ascii_digit())
            || !name.chars().all(|c| self.is_unquoted_identifier_char(c))
            || is_mixed_case(name)
            || self.is_reserved_word(name)
    }

    fn correct_object_name(&self, name: &str, _object_type: ObjectType) -> String {
        if is_mixed_case(name) {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }
}

fn is_mixed_case(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase()) && name.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_quotes_mixed_case_only() {
        let db = PostgresDatabase::new();
        assert_eq!(db.escape_name("users"), "users");
        assert_eq!(db.escape_name("Users"), "\"Users\"");
        assert_eq!(db.escape_name("USERS"), "USERS");
        assert_eq!(
            db.escape_object_name(None, Some("app"), "orders", ObjectType::Table),
            "app.orders"
        );
    }

    #[test]
    fn test_postgres_correct_object_name() {
        let db = PostgresDatabase::new();
        assert_eq!(db.correct_object_name("ORDERS", ObjectType::Table), "orders");
        assert_eq!(db.correct_object_name("OrderLines", ObjectType::Table), "OrderLines");
    }

    #[test]
    fn test_postgres_capabilities() {
        let db = PostgresDatabase::new().with_default_schema("public");
        assert_eq!(db.default_schema_name(), Some("public"));
        assert!(db.supports_conditional_existence(ObjectType::View));
        assert!(db.supports_conditional_existence(ObjectType::Sequence));
        assert_eq!(db.cascade_constraints_clause(), Some("CASCADE"));
    }
}
