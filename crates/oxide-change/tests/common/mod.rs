#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use oxide_change::prelude::*;

/// Renders a change with the core generators, failing the test on error.
pub fn render_sql(change: &dyn Change, database: &dyn Database) -> Vec<String> {
    let factory = SqlGeneratorFactory::with_core_generators();
    change
        .generate_statements(database)
        .iter()
        .flat_map(|statement| {
            factory
                .generate_sql(statement.as_ref(), database)
                .unwrap_or_else(|e| panic!("Failed to render {change:?}: {e}"))
        })
        .map(|sql| sql.to_sql().to_string())
        .collect()
}

/// Downcasts the single statement a change lowers into.
pub fn single_statement<S: SqlStatement + Clone>(
    change: &dyn Change,
    database: &dyn Database,
) -> S {
    let statements = change.generate_statements(database);
    assert_eq!(statements.len(), 1, "Expected one statement for {change:?}");
    statements[0]
        .as_any()
        .downcast_ref::<S>()
        .unwrap_or_else(|| panic!("Unexpected statement type for {change:?}"))
        .clone()
}

/// In-memory snapshot keyed by object name.
#[derive(Default)]
pub struct FakeSnapshot {
    pub objects: BTreeSet<(ObjectType, String)>,
    pub sequences: BTreeMap<String, SequenceSnapshot>,
    pub failure: Option<String>,
}

impl FakeSnapshot {
    pub fn with_object(mut self, object_type: ObjectType, name: &str) -> Self {
        self.objects.insert((object_type, name.to_string()));
        self
    }

    pub fn with_sequence(mut self, sequence: SequenceSnapshot) -> Self {
        self.objects
            .insert((ObjectType::Sequence, sequence.name.clone()));
        self.sequences.insert(sequence.name.clone(), sequence);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn check(&self, object: &DatabaseObject) -> std::result::Result<(), SnapshotError> {
        match &self.failure {
            Some(message) => Err(SnapshotError::Lookup {
                object: object.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl SnapshotService for FakeSnapshot {
    fn has(
        &self,
        object: &DatabaseObject,
        _database: &dyn Database,
    ) -> std::result::Result<bool, SnapshotError> {
        self.check(object)?;
        Ok(self
            .objects
            .contains(&(object.object_type, object.name.clone())))
    }

    fn sequence(
        &self,
        object: &DatabaseObject,
        _database: &dyn Database,
    ) -> std::result::Result<Option<SequenceSnapshot>, SnapshotError> {
        self.check(object)?;
        Ok(self.sequences.get(&object.name).cloned())
    }
}

/// A dialect with `IF EXISTS` for tables but not for views.
pub struct TablesOnlyDatabase;

impl Database for TablesOnlyDatabase {
    fn short_name(&self) -> &'static str {
        "tablesonly"
    }

    fn full_name(&self) -> &'static str {
        "Tables Only"
    }

    fn supports_drop_if_exists(&self) -> &'static [ObjectType] {
        &[ObjectType::Table]
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn supports_catalogs(&self) -> bool {
        false
    }

    fn supports_sequences(&self) -> bool {
        false
    }
}
