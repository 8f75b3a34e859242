mod common;

use std::io::Write;
use std::sync::Arc;

use oxide_change::prelude::*;
use tempfile::NamedTempFile;

fn write_changes(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn renderer(factory: &SqlGeneratorFactory, params: MapChangeLogParameters) -> ChangeRenderer<'_> {
    ChangeRenderer::new(factory).with_visitors(
        VisitorPipeline::new().with(InjectRuntimeVariablesVisitor::new(Arc::new(params))),
    )
}

#[test]
fn test_render_changes_from_file() {
    let file = write_changes(
        r#"[
            {"name": "dropView", "attributes": {"viewName": "active_users", "schemaName": "app"}},
            {"name": "dropTable",
             "attributes": {"tableName": "users", "schemaName": "app", "cascadeConstraints": "true"}},
            {"name": "alterSequence",
             "attributes": {"sequenceName": "user_seq", "schemaName": "app", "incrementBy": "10"}},
            {"name": "sql", "attributes": {"sql": "insert into audit values ('${env}')"}}
        ]"#,
    );

    let changes = ChangeFactory::with_core_changes()
        .load_file(file.path())
        .unwrap();
    let factory = SqlGeneratorFactory::with_core_generators();
    let params = MapChangeLogParameters::new().with("env", "staging");
    let rendered = renderer(&factory, params)
        .render_all(&changes, &PostgresDatabase::new())
        .unwrap();

    let sql: Vec<String> = rendered
        .iter()
        .flat_map(|r| r.sql.iter().map(ToString::to_string))
        .collect();
    assert_eq!(
        sql,
        [
            "DROP VIEW IF EXISTS app.active_users;",
            "DROP TABLE IF EXISTS app.users CASCADE;",
            "ALTER SEQUENCE app.user_seq INCREMENT BY 10;",
            "insert into audit values ('staging');",
        ]
    );
    let confirmations: Vec<&str> = rendered.iter().map(|r| r.confirmation.as_str()).collect();
    assert_eq!(
        confirmations,
        [
            "View active_users dropped",
            "Table users dropped",
            "Sequence user_seq altered",
            "Custom SQL executed",
        ]
    );
}

#[test]
fn test_same_changes_diverge_by_dialect() {
    let file = write_changes(
        r#"[{"name": "dropTable", "attributes": {"tableName": "users", "ifExists": "true"}}]"#,
    );
    let changes = ChangeFactory::with_core_changes()
        .load_file(file.path())
        .unwrap();
    let factory = SqlGeneratorFactory::with_core_generators();
    let renderer = ChangeRenderer::new(&factory);

    let postgres = renderer.render_all(&changes, &PostgresDatabase::new()).unwrap();
    assert_eq!(postgres[0].sql[0].to_sql(), "DROP TABLE IF EXISTS users");
    assert!(!postgres[0].warnings.has_warnings());

    let oracle = renderer.render_all(&changes, &OracleDatabase::new()).unwrap();
    assert_eq!(oracle[0].sql[0].to_sql(), "DROP TABLE users");
    assert_eq!(
        oracle[0].warnings.messages(),
        ["'ifExists' not supported for dropTable on Oracle"]
    );
}

#[test]
fn test_load_errors() {
    let factory = ChangeFactory::with_core_changes();

    let unknown = write_changes(r#"[{"name": "createTable"}]"#);
    assert!(matches!(
        factory.load_file(unknown.path()),
        Err(ChangeError::UnknownChange(name)) if name == "createTable"
    ));

    let invalid = write_changes(
        r#"[{"name": "dropTable", "attributes": {"tableName": "t", "ifExists": "maybe"}}]"#,
    );
    assert!(matches!(
        factory.load_file(invalid.path()),
        Err(ChangeError::InvalidAttribute { .. })
    ));

    let malformed = write_changes("not json");
    assert!(matches!(
        factory.load_file(malformed.path()),
        Err(ChangeError::Serialization(_))
    ));

    assert!(matches!(
        factory.load_file("/nonexistent/changes.json"),
        Err(ChangeError::Io(_))
    ));
}

#[test]
fn test_unsupported_change_is_reported_by_validation() {
    let factory = SqlGeneratorFactory::with_core_generators();
    let change = DropSequenceChange::new("user_seq");
    let err = ChangeRenderer::new(&factory)
        .render(&change, &MySqlDatabase::new())
        .unwrap_err();
    match err {
        ChangeError::Validation(errors) => {
            assert_eq!(errors.errors(), ["dropSequence is not supported on mysql"]);
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}
