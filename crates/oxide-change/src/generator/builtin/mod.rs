//! Built-in SQL generators.

mod alter_sequence;
mod drop_sequence;
mod drop_table;
mod drop_view;
mod get_view_definition;
mod raw_sql;

pub use alter_sequence::AlterSequenceGenerator;
pub use drop_sequence::DropSequenceGenerator;
pub use drop_table::DropTableGenerator;
pub use drop_view::DropViewGenerator;
pub use get_view_definition::{GetViewDefinitionGenerator, MySqlGetViewDefinitionGenerator};
pub use raw_sql::RawSqlGenerator;
