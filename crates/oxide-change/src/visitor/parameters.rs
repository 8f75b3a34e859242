//! Changelog-scoped runtime parameters.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("compile regex"));

/// Expands `${name}` expressions in SQL text.
pub trait ChangeLogParameters: Send + Sync {
    /// Replaces every known `${name}` token; unknown tokens stay as written.
    fn expand_expressions(&self, text: &str) -> String;
}

/// In-memory parameter set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapChangeLogParameters {
    values: BTreeMap<String, String>,
}

impl MapChangeLogParameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses a `name=value` definition. The value may itself contain `=`.
    #[must_use]
    pub fn parse_definition(definition: &str) -> Option<(String, String)> {
        let (name, value) = definition.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), value.to_string()))
    }
}

impl ChangeLogParameters for MapChangeLogParameters {
    fn expand_expressions(&self, text: &str) -> String {
        EXPRESSION
            .replace_all(text, |caps: &Captures<'_>| match self.get(caps[1].trim()) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
