//! `sql`: hand-written SQL.

use crate::change::{Change, ChangeNode, ChangeStatus};
use crate::database::Database;
use crate::error::{Result, SnapshotError};
use crate::snapshot::SnapshotService;
use crate::statement::{DEFAULT_END_DELIMITER, RawSqlStatement, SqlStatement};
use crate::validation::ValidationErrors;

/// Runs SQL as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSqlChange {
    /// The SQL text.
    pub sql: Option<String>,
    /// Delimiter between statements; `None` means `;`.
    pub end_delimiter: Option<String>,
    /// Split the text into one statement per delimiter; `None` means yes.
    pub split_statements: Option<bool>,
    /// Remove `--` and `/* */` comments first; `None` means no.
    pub strip_comments: Option<bool>,
    /// Property receiving the single value the SQL returns.
    pub result_in: Option<String>,
}

impl RawSqlChange {
    /// Creates a change running `sql`.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: Some(sql.into()),
            ..Self::default()
        }
    }

    /// The statements this change runs, after comment stripping and splitting.
    ///
    /// Quoted strings and comments are never split, and only real comments
    /// are stripped.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        let sql = self.sql.as_deref().unwrap_or_default();
        let delimiter = self
            .end_delimiter
            .as_deref()
            .unwrap_or(DEFAULT_END_DELIMITER)
            .replace("\\r", "\r")
            .replace("\\n", "\n");
        let split_on = self.split_statements.unwrap_or(true).then_some(delimiter.as_str());
        split_sql(sql, split_on, self.strip_comments.unwrap_or(false))
    }
}

/// Length of the quoted string, comment, or single character `rest` starts with.
fn token_len(rest: &str) -> usize {
    if rest.starts_with("--") {
        return rest.find('\n').unwrap_or(rest.len());
    }
    if let Some(body) = rest.strip_prefix("/*") {
        return body.find("*/").map_or(rest.len(), |end| end + 4);
    }
    match rest.chars().next() {
        Some(quote @ ('\'' | '"')) => rest[1..].find(quote).map_or(rest.len(), |end| end + 2),
        Some(c) => c.len_utf8(),
        None => 0,
    }
}

fn split_sql(sql: &str, delimiter: Option<&str>, strip_comments: bool) -> Vec<String> {
    let delimiter = delimiter.filter(|d| !d.is_empty());
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut rest = sql;
    while !rest.is_empty() {
        if let Some(delimiter) = delimiter.filter(|d| rest.starts_with(*d)) {
            statements.push(std::mem::take(&mut current));
            rest = &rest[delimiter.len()..];
            continue;
        }
        let len = token_len(rest);
        let is_comment = rest.starts_with("--") || rest.starts_with("/*");
        if !(strip_comments && is_comment) {
            current.push_str(&rest[..len]);
        }
        rest = &rest[len..];
    }
    statements.push(current);

    statements
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Change for RawSqlChange {
    fn change_name(&self) -> &'static str {
        "sql"
    }

    fn validate_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sql", self.sql.as_deref().map(str::trim));
        errors
    }

    fn generate_statements(&self, _database: &dyn Database) -> Vec<Box<dyn SqlStatement>> {
        self.statements()
            .into_iter()
            .map(|sql| {
                let mut statement = RawSqlStatement::new(sql);
                if let Some(end_delimiter) = &self.end_delimiter {
                    statement = statement.with_end_delimiter(end_delimiter.clone());
                }
                if let Some(result_in) = &self.result_in {
                    statement = statement.with_result_in(result_in.clone());
                }
                Box::new(statement) as Box<dyn SqlStatement>
            })
            .collect()
    }

    fn check_status(
        &self,
        _snapshot: &dyn SnapshotService,
        _database: &dyn Database,
    ) -> ChangeStatus {
        ChangeStatus::Unknown(SnapshotError::Unsupported(
            "the effect of custom SQL".to_string(),
        ))
    }

    fn confirmation_message(&self) -> String {
        "Custom SQL executed".to_string()
    }

    fn to_node(&self) -> ChangeNode {
        ChangeNode::new(self.change_name())
            .with("sql", self.sql.as_deref())
            .with("endDelimiter", self.end_delimiter.as_deref())
            .with("splitStatements", self.split_statements)
            .with("stripComments", self.strip_comments)
            .with("resultIn", self.result_in.as_deref())
    }

    fn from_node(node: &ChangeNode) -> Result<Self> {
        node.expect_name("sql")?;
        Ok(Self {
            sql: node.string_attribute("sql"),
            end_delimiter: node.string_attribute("endDelimiter"),
            split_statements: node.bool_attribute("splitStatements")?,
            strip_comments: node.bool_attribute("stripComments")?,
            result_in: node.string_attribute("resultIn"),
        })
    }
}
