//! Declarative changes.
//!
//! A [`Change`] is what a user writes: "drop table X", "alter sequence Y".
//! Every option is an `Option`, where `None` means "use the dialect
//! default". A change validates itself, reports dialect warnings, lowers
//! itself into [`SqlStatement`]s and round-trips through a [`ChangeNode`].

mod builtin;
mod drop_if_exists;

pub use builtin::{
    AlterSequenceChange, DropSequenceChange, DropTableChange, DropViewChange, RawSqlChange,
};
pub use drop_if_exists::{DropIfExists, resolve_if_exists, warn_if_exists};

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::{ChangeError, Result, SnapshotError};
use crate::generator::SqlGeneratorFactory;
use crate::snapshot::SnapshotService;
use crate::statement::SqlStatement;
use crate::validation::{ValidationErrors, Warnings};

/// A declarative, dialect-agnostic schema operation.
pub trait Change: Debug + Send + Sync {
    /// Node name this change is registered under (e.g. `dropTable`).
    fn change_name(&self) -> &'static str;

    /// Non-fatal problems with this change on `database`.
    fn warn(&self, _database: &dyn Database) -> Warnings {
        Warnings::new()
    }

    /// Checks required fields; independent of the dialect.
    fn validate_fields(&self) -> ValidationErrors;

    /// Full validation against the process-wide generator registry.
    fn validate(&self, database: &dyn Database) -> ValidationErrors {
        self.validate_with(database, SqlGeneratorFactory::global())
    }

    /// Full validation: field checks plus every lowered statement validated
    /// by the generator that would render it. All errors are collected.
    fn validate_with(
        &self,
        database: &dyn Database,
        factory: &SqlGeneratorFactory,
    ) -> ValidationErrors {
        let mut errors = self.validate_fields();
        for statement in self.generate_statements(database) {
            match factory.validate(statement.as_ref(), database) {
                Ok(statement_errors) => errors.extend(statement_errors),
                Err(_) => errors.add_error(format!(
                    "{} is not supported on {}",
                    self.change_name(),
                    database.short_name()
                )),
            }
        }
        errors
    }

    /// Lowers the change into statements with every option resolved.
    fn generate_statements(&self, database: &dyn Database) -> Vec<Box<dyn SqlStatement>>;

    /// Checks whether the change is already reflected in the schema.
    fn check_status(&self, snapshot: &dyn SnapshotService, database: &dyn Database)
    -> ChangeStatus;

    /// Message shown once the change ran.
    fn confirmation_message(&self) -> String;

    /// Serializes the change; unset options are omitted.
    fn to_node(&self) -> ChangeNode;

    /// Reads a change back from its node.
    fn from_node(node: &ChangeNode) -> Result<Self>
    where
        Self: Sized;
}

/// Outcome of [`Change::check_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
    /// The schema already reflects the change.
    Complete,
    /// The schema does not reflect the change; the message says why.
    Incomplete(String),
    /// The status could not be determined.
    Unknown(SnapshotError),
}

impl ChangeStatus {
    /// Complete if every check holds, otherwise incomplete with the
    /// messages of the failed checks.
    #[must_use]
    pub fn assert_complete<I, S>(checks: I) -> Self
    where
        I: IntoIterator<Item = (bool, S)>,
        S: Into<String>,
    {
        let failed: Vec<String> = checks
            .into_iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, message)| message.into())
            .collect();
        if failed.is_empty() {
            Self::Complete
        } else {
            Self::Incomplete(failed.join("; "))
        }
    }

    /// Returns true for [`ChangeStatus::Complete`].
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl From<SnapshotError> for ChangeStatus {
    fn from(error: SnapshotError) -> Self {
        Self::Unknown(error)
    }
}

/// Structured, format-neutral representation of a change.
///
/// Attributes are lower-camel field names mapped to their literal string
/// form; unset fields have no attribute at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNode {
    /// Registered change name.
    pub name: String,
    /// Set fields.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ChangeNode {
    /// Creates a node without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets `attribute` when `value` is present.
    #[must_use]
    pub fn with<T: Display>(mut self, attribute: &str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.attributes
                .insert(attribute.to_string(), value.to_string());
        }
        self
    }

    /// Returns the raw attribute value.
    #[must_use]
    pub fn attribute(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    /// Returns the attribute as an owned string.
    #[must_use]
    pub fn string_attribute(&self, attribute: &str) -> Option<String> {
        self.attribute(attribute).map(str::to_string)
    }

    /// Parses a `true`/`false` attribute.
    pub fn bool_attribute(&self, attribute: &str) -> Result<Option<bool>> {
        self.parse_attribute(attribute)
    }

    /// Parses an integer attribute.
    pub fn int_attribute(&self, attribute: &str) -> Result<Option<i128>> {
        self.parse_attribute(attribute)
    }

    /// Fails unless the node carries the expected change name.
    pub fn expect_name(&self, expected: &str) -> Result<()> {
        if self.name == expected {
            Ok(())
        } else {
            Err(ChangeError::UnexpectedNode {
                expected: expected.to_string(),
                found: self.name.clone(),
            })
        }
    }

    fn parse_attribute<T: std::str::FromStr>(&self, attribute: &str) -> Result<Option<T>> {
        self.attribute(attribute)
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ChangeError::InvalidAttribute {
                        change: self.name.clone(),
                        attribute: attribute.to_string(),
                        value: value.to_string(),
                    })
            })
            .transpose()
    }
}

type ChangeConstructor = fn(&ChangeNode) -> Result<Box<dyn Change>>;

fn construct<C: Change + 'static>(node: &ChangeNode) -> Result<Box<dyn Change>> {
    Ok(Box::new(C::from_node(node)?))
}

/// Registry of change types, keyed by node name.
#[derive(Default)]
pub struct ChangeFactory {
    constructors: BTreeMap<String, ChangeConstructor>,
}

impl ChangeFactory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in change.
    #[must_use]
    pub fn with_core_changes() -> Self {
        let mut factory = Self::new();
        factory
            .register::<DropTableChange>("dropTable")
            .register::<DropViewChange>("dropView")
            .register::<DropSequenceChange>("dropSequence")
            .register::<AlterSequenceChange>("alterSequence")
            .register::<RawSqlChange>("sql");
        factory
    }

    /// Registers a change type under `name`, replacing any previous one.
    pub fn register<C: Change + 'static>(&mut self, name: &str) -> &mut Self {
        self.constructors
            .insert(name.to_string(), construct::<C> as ChangeConstructor);
        self
    }

    /// Builds the change a node describes.
    pub fn create(&self, node: &ChangeNode) -> Result<Box<dyn Change>> {
        let constructor = self
            .constructors
            .get(&node.name)
            .ok_or_else(|| ChangeError::UnknownChange(node.name.clone()))?;
        constructor(node)
    }

    /// Reads a JSON array of nodes.
    pub fn load_json(&self, json: &str) -> Result<Vec<Box<dyn Change>>> {
        let nodes: Vec<ChangeNode> = serde_json::from_str(json)?;
        nodes.iter().map(|node| self.create(node)).collect()
    }

    /// Reads a JSON array of nodes from a file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<Box<dyn Change>>> {
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json)
    }

    /// Registered change names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}
