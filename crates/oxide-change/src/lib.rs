//! Dialect-aware SQL generation for declarative schema changes.
//!
//! `oxide-change` turns database-agnostic change descriptions ("drop table
//! X", "alter sequence Y") into SQL for a specific backend:
//! - Changes validate themselves and warn about options a dialect ignores
//! - Each change lowers into dialect-agnostic statements
//! - A registry picks the best generator per statement and dialect
//! - Visitors rewrite the generated text (e.g. `${name}` parameters)
//!
//! # Architecture
//!
//! - **Database** - Per-dialect capabilities: `IF EXISTS`, quoting, schemas
//! - **Change** - Declarative operations like `DropTableChange`
//! - **Statement** - Resolved, dialect-agnostic operations
//! - **Generator** - Registry of per-dialect SQL generators
//! - **Visitor** - Post-generation text rewriting
//! - **Render** - The whole pipeline in one call
//!
//! # Example
//!
//! ```rust
//! use oxide_change::prelude::*;
//!
//! let change = AlterSequenceChange {
//!     increment_by: Some(3),
//!     ordered: Some(true),
//!     ..AlterSequenceChange::new("SEQ_NAME")
//! };
//!
//! let factory = SqlGeneratorFactory::with_core_generators();
//! let rendered = ChangeRenderer::new(&factory)
//!     .render(&change, &OracleDatabase::new())
//!     .unwrap();
//!
//! assert_eq!(
//!     rendered.sql[0].to_sql(),
//!     "ALTER SEQUENCE SEQ_NAME INCREMENT BY 3 ORDER"
//! );
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Render a JSON list of change nodes for PostgreSQL
//! oxide-change sql --dialect postgresql -D schema=app changes.json
//!
//! # List built-in dialects and change types
//! oxide-change dialects
//! oxide-change changes
//! ```

pub mod change;
pub mod database;
pub mod error;
pub mod generator;
pub mod render;
pub mod snapshot;
pub mod sql;
pub mod statement;
pub mod validation;
pub mod visitor;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::change::{
        AlterSequenceChange, Change, ChangeFactory, ChangeNode, ChangeStatus, DropSequenceChange,
        DropTableChange, DropViewChange, RawSqlChange,
    };
    pub use crate::database::{
        CatalogAndSchema, Database, DatabaseObject, MySqlDatabase, ObjectType, OracleDatabase,
        PostgresDatabase, SqliteDatabase, database_for_name,
    };
    pub use crate::error::{ChangeError, Result, SnapshotError};
    pub use crate::generator::{Applicability, SqlGenerator, SqlGeneratorFactory};
    pub use crate::render::{ChangeRenderer, RenderedChange};
    pub use crate::snapshot::{SequenceSnapshot, SnapshotService};
    pub use crate::sql::Sql;
    pub use crate::statement::{
        AlterSequenceStatement, DropSequenceStatement, DropTableStatement, DropViewStatement,
        GetViewDefinitionStatement, RawSqlStatement, SqlStatement,
    };
    pub use crate::validation::{ValidationErrors, Warnings};
    pub use crate::visitor::{
        ChangeLogParameters, InjectRuntimeVariablesVisitor, MapChangeLogParameters,
        ReplaceSqlVisitor, SqlVisitor, VisitorPipeline,
    };
}
