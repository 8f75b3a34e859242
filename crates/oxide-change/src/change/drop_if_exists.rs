//! Shared handling of the tri-state `ifExists` option of drop changes.

use crate::database::{Database, ObjectType};
use crate::validation::Warnings;

/// A drop change carrying an optional `ifExists` flag.
pub trait DropIfExists {
    /// Object type the `IF EXISTS` clause would apply to.
    const OBJECT_TYPE: ObjectType;

    /// The flag as written: `None` means unspecified.
    fn if_exists(&self) -> Option<bool>;

    /// Effective flag for `database`.
    fn resolved_if_exists(&self, database: &dyn Database) -> bool {
        resolve_if_exists(self.if_exists(), database, Self::OBJECT_TYPE)
    }
}

/// Warns when `ifExists` is requested but cannot be honored on `database`.
#[must_use]
pub fn warn_if_exists(
    change_name: &str,
    if_exists: Option<bool>,
    database: &dyn Database,
    object_type: ObjectType,
) -> Warnings {
    let mut warnings = Warnings::new();
    if if_exists == Some(true) && !database.supports_conditional_existence(object_type) {
        warnings.add_warning(format!(
            "'ifExists' not supported for {change_name} on {}",
            database.full_name()
        ));
    }
    warnings
}

/// Resolves the flag: unspecified means `true`, and the clause is only kept
/// where the dialect supports it for `object_type`.
#[must_use]
pub fn resolve_if_exists(
    if_exists: Option<bool>,
    database: &dyn Database,
    object_type: ObjectType,
) -> bool {
    if_exists.unwrap_or(true) && database.supports_conditional_existence(object_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{OracleDatabase, PostgresDatabase, SqliteDatabase};

    #[test]
    fn test_resolve_if_exists() {
        let postgres = PostgresDatabase::new();
        let oracle = OracleDatabase::new();

        assert!(resolve_if_exists(None, &postgres, ObjectType::Table));
        assert!(resolve_if_exists(Some(true), &postgres, ObjectType::Table));
        assert!(!resolve_if_exists(Some(false), &postgres, ObjectType::Table));
        assert!(!resolve_if_exists(None, &oracle, ObjectType::Table));
        assert!(!resolve_if_exists(Some(true), &oracle, ObjectType::Table));
    }

    #[test]
    fn test_warn_only_when_requested_and_unsupported() {
        let oracle = OracleDatabase::new();
        assert!(!warn_if_exists("dropTable", None, &oracle, ObjectType::Table).has_warnings());
        assert_eq!(
            warn_if_exists("dropTable", Some(true), &oracle, ObjectType::Table).messages(),
            ["'ifExists' not supported for dropTable on Oracle"]
        );

        let sqlite = SqliteDatabase::new();
        assert!(!warn_if_exists("dropView", Some(true), &sqlite, ObjectType::View).has_warnings());
        assert!(
            !warn_if_exists("dropSequence", Some(false), &sqlite, ObjectType::Sequence)
                .has_warnings()
        );
        assert!(
            warn_if_exists("dropSequence", Some(true), &sqlite, ObjectType::Sequence)
                .has_warnings()
        );
    }
}
