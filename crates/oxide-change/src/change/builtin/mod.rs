//! Built-in changes.

mod alter_sequence;
mod drop_sequence;
mod drop_table;
mod drop_view;
mod raw_sql;

pub use alter_sequence::AlterSequenceChange;
pub use drop_sequence::DropSequenceChange;
pub use drop_table::DropTableChange;
pub use drop_view::DropViewChange;
pub use raw_sql::RawSqlChange;
