//! SQLite capabilities.

use super::{Database, ObjectType};

/// SQLite dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDatabase;

impl SqliteDatabase {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Database for SqliteDatabase {
    fn short_name(&self) -> &'static str {
        "sqlite"
    }

    fn full_name(&self) -> &'static str {
        "SQLite"
    }

    fn supports_drop_if_exists(&self) -> &'static [ObjectType] {
        &[ObjectType::Table, ObjectType::View, ObjectType::Index]
    }

    fn supports_schemas(&self) -> bool {
        false
    }

    fn supports_catalogs(&self) -> bool {
        false
    }

    fn supports_sequences(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_capabilities() {
        let db = SqliteDatabase::new();
        assert_eq!(db.short_name(), "sqlite");
        assert!(!db.supports_sequences());
        assert_eq!(db.cascade_constraints_clause(), None);
        assert_eq!(db.correct_object_name("Users", ObjectType::Table), "Users");
    }
}
