//! Per-dialect capability model.
//!
//! A [`Database`] describes what a target backend can do: which object
//! types accept `IF EXISTS`, how identifiers are quoted and case-folded,
//! and whether catalogs, schemas and sequences exist at all. Every layer
//! above consults it; nothing here talks to a live connection.

mod mysql;
mod oracle;
mod postgres;
mod sqlite;

pub use mysql::MySqlDatabase;
pub use oracle::OracleDatabase;
pub use postgres::PostgresDatabase;
pub use sqlite::SqliteDatabase;

use std::fmt;

/// Kinds of schema objects that capability queries are asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    /// A table.
    Table,
    /// A view.
    View,
    /// A sequence.
    Sequence,
    /// An index.
    Index,
    /// A column.
    Column,
    /// A schema.
    Schema,
}

impl ObjectType {
    /// Returns the lower-case name of the object type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
            Self::Sequence => "sequence",
            Self::Index => "index",
            Self::Column => "column",
            Self::Schema => "schema",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a single schema object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseObject {
    /// Object type.
    pub object_type: ObjectType,
    /// Catalog name, if qualified.
    pub catalog_name: Option<String>,
    /// Schema name, if qualified.
    pub schema_name: Option<String>,
    /// Object name.
    pub name: String,
}

impl DatabaseObject {
    /// Creates an object descriptor.
    #[must_use]
    pub fn new(
        object_type: ObjectType,
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            object_type,
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            name: name.into(),
        }
    }

    /// Describes a table.
    #[must_use]
    pub fn table(catalog: Option<&str>, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self::new(ObjectType::Table, catalog, schema, name)
    }

    /// Describes a view.
    #[must_use]
    pub fn view(catalog: Option<&str>, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self::new(ObjectType::View, catalog, schema, name)
    }

    /// Describes a sequence.
    #[must_use]
    pub fn sequence(catalog: Option<&str>, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self::new(ObjectType::Sequence, catalog, schema, name)
    }
}

impl fmt::Display for DatabaseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.object_type)?;
        for part in [&self.catalog_name, &self.schema_name].into_iter().flatten() {
            write!(f, "{part}.")?;
        }
        f.write_str(&self.name)
    }
}

/// A catalog/schema pair, as written by the user or filled from dialect defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogAndSchema {
    /// Catalog name.
    pub catalog_name: Option<String>,
    /// Schema name.
    pub schema_name: Option<String>,
}

impl CatalogAndSchema {
    /// Creates a pair from optional names.
    #[must_use]
    pub fn new(catalog_name: Option<&str>, schema_name: Option<&str>) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
        }
    }

    /// Adapts the pair to the conventions of `database`.
    ///
    /// Missing parts are filled from the dialect defaults and names are
    /// case-corrected. On catalog-only dialects the schema slot mirrors the
    /// catalog; parts a dialect does not support are dropped.
    #[must_use]
    pub fn customize(&self, database: &dyn Database) -> Self {
        let catalog = self
            .catalog_name
            .clone()
            .or_else(|| database.default_catalog_name().map(str::to_string));
        let schema = self
            .schema_name
            .clone()
            .or_else(|| database.default_schema_name().map(str::to_string));

        let (catalog, schema) = match (database.supports_catalogs(), database.supports_schemas()) {
            (false, false) => (None, None),
            (true, false) => {
                let catalog = catalog.or(schema);
                (catalog.clone(), catalog)
            }
            (false, true) => (None, schema),
            (true, true) => (catalog, schema),
        };

        Self {
            catalog_name: catalog.map(|c| database.correct_object_name(&c, ObjectType::Schema)),
            schema_name: schema.map(|s| database.correct_object_name(&s, ObjectType::Schema)),
        }
    }
}

/// Words that force quoting on every built-in dialect.
pub const SQL_RESERVED_WORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "AS", "BY", "CASE", "CHECK", "COLUMN", "CONSTRAINT", "CREATE",
    "DEFAULT", "DELETE", "DISTINCT", "DROP", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX",
    "INSERT", "INTO", "IS", "JOIN", "KEY", "NOT", "NULL", "ON", "OR", "ORDER", "PRIMARY",
    "REFERENCES", "SELECT", "SET", "TABLE", "TO", "UNION", "UNIQUE", "UPDATE", "USER", "VALUES",
    "VIEW", "WHERE",
];

/// Capability model of a target dialect.
pub trait Database: Send + Sync {
    /// Returns the short dialect name (e.g. `postgresql`).
    fn short_name(&self) -> &'static str;

    /// Returns the human-readable dialect name used in messages.
    fn full_name(&self) -> &'static str;

    /// Returns the object types that accept a `DROP ... IF EXISTS` clause.
    fn supports_drop_if_exists(&self) -> &'static [ObjectType];

    /// Returns whether `IF EXISTS` is available for the given object type.
    fn supports_conditional_existence(&self, object_type: ObjectType) -> bool {
        self.supports_drop_if_exists().contains(&object_type)
    }

    /// Returns whether objects can be qualified by schema.
    fn supports_schemas(&self) -> bool;

    /// Returns whether objects can be qualified by catalog.
    fn supports_catalogs(&self) -> bool;

    /// Returns whether the dialect has sequences.
    fn supports_sequences(&self) -> bool;

    /// Catalog assumed when a change leaves it unspecified.
    fn default_catalog_name(&self) -> Option<&str> {
        None
    }

    /// Schema assumed when a change leaves it unspecified.
    fn default_schema_name(&self) -> Option<&str> {
        None
    }

    /// Clause appended to `DROP TABLE` for cascading constraints, if any.
    fn cascade_constraints_clause(&self) -> Option<&'static str> {
        None
    }

    /// Returns the opening and closing identifier quote characters.
    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    /// Returns whether `c` may appear in an unquoted identifier.
    fn is_unquoted_identifier_char(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Returns whether `name` is a reserved word.
    fn is_reserved_word(&self, name: &str) -> bool {
        SQL_RESERVED_WORDS
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    /// Returns whether `name` must be quoted to be used as an identifier.
    fn needs_quoting(&self, name: &str) -> bool {
        name.is_empty()
            || name.starts_with(|c: char| c.is_ascii_digit())
            || !name.chars().all(|c| self.is_unquoted_identifier_char(c))
            || self.is_reserved_word(name)
    }

    /// Quotes an identifier, doubling embedded closing quotes.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.quote_chars();
        let escaped = name.replace(close, &format!("{close}{close}"));
        format!("{open}{escaped}{close}")
    }

    /// Quotes an identifier only when needed.
    fn escape_name(&self, name: &str) -> String {
        if self.needs_quoting(name) {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Escapes a possibly qualified object name.
    ///
    /// Schema-capable dialects qualify with the schema, catalog-only
    /// dialects with the catalog. Columns and schemas are never qualified.
    fn escape_object_name(
        &self,
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        name: &str,
        object_type: ObjectType,
    ) -> String {
        let qualifier = match object_type {
            ObjectType::Column | ObjectType::Schema => None,
            _ if self.supports_schemas() => schema_name,
            _ if self.supports_catalogs() => catalog_name,
            _ => None,
        };
        match qualifier.filter(|q| !q.is_empty()) {
            Some(q) => format!("{}.{}", self.escape_name(q), self.escape_name(name)),
            None => self.escape_name(name),
        }
    }

    /// Normalizes the case of an object name to the dialect's convention.
    fn correct_object_name(&self, name: &str, _object_type: ObjectType) -> String {
        name.to_string()
    }
}

/// Returns the built-in dialect for a short name.
#[must_use]
pub fn database_for_name(name: &str) -> Option<Box<dyn Database>> {
    match name.to_ascii_lowercase().as_str() {
        "postgresql" | "postgres" => Some(Box::new(PostgresDatabase::new())),
        "mysql" | "mariadb" => Some(Box::new(MySqlDatabase::new())),
        "sqlite" => Some(Box::new(SqliteDatabase::new())),
        "oracle" => Some(Box::new(OracleDatabase::new())),
        _ => None,
    }
}

/// Short names of every built-in dialect.
pub const BUILTIN_DATABASES: &[&str] = &["postgresql", "mysql", "sqlite", "oracle"];
