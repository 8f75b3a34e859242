//! SQL generator dispatch.
//!
//! Generators are registered per statement type on a
//! [`SqlGeneratorFactory`]. For each statement the factory picks the single
//! best candidate: a generator restricted to specific dialects beats a
//! generic one, then the higher priority wins, then the earlier
//! registration. The winner validates the statement and, if validation is
//! clean, renders it.

mod builtin;

pub use builtin::{
    AlterSequenceGenerator, DropSequenceGenerator, DropTableGenerator, DropViewGenerator,
    GetViewDefinitionGenerator, MySqlGetViewDefinitionGenerator, RawSqlGenerator,
};

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::database::Database;
use crate::error::{ChangeError, Result};
use crate::sql::Sql;
use crate::statement::SqlStatement;
use crate::validation::ValidationErrors;

/// Priority of a generator that applies everywhere.
pub const PRIORITY_DEFAULT: i32 = 1;

/// Priority of a generator tailored to one dialect.
pub const PRIORITY_DATABASE: i32 = 5;

/// Dialects a generator is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Every dialect.
    AllDialects,
    /// Only the listed short names.
    Dialects(&'static [&'static str]),
}

impl Applicability {
    /// Returns whether the target dialect is covered.
    #[must_use]
    pub fn matches(&self, database: &dyn Database) -> bool {
        match self {
            Self::AllDialects => true,
            Self::Dialects(names) => names.contains(&database.short_name()),
        }
    }

    /// Returns whether this is restricted to specific dialects.
    #[must_use]
    pub const fn is_specific(&self) -> bool {
        matches!(self, Self::Dialects(_))
    }
}

/// Dialect-specific logic for one statement type.
pub trait SqlGenerator: Send + Sync {
    /// Statement type handled by this generator.
    type Statement: SqlStatement;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Dialects this generator is registered for.
    fn applicability(&self) -> Applicability {
        Applicability::AllDialects
    }

    /// Tie-breaker between candidates of equal specificity.
    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    /// Runtime check beyond [`Self::applicability`].
    fn supports(&self, _statement: &Self::Statement, _database: &dyn Database) -> bool {
        true
    }

    /// Checks the statement against the dialect; every problem is reported.
    fn validate(&self, statement: &Self::Statement, database: &dyn Database) -> ValidationErrors;

    /// Renders the statement. Only called after a clean validation.
    fn generate_sql(&self, statement: &Self::Statement, database: &dyn Database) -> Vec<Sql>;
}

/// Type-erased view of a [`SqlGenerator`], as stored in the registry.
///
/// Every method returns `None` when handed a statement of the wrong type.
pub trait DynSqlGenerator: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Dialects this generator is registered for.
    fn applicability(&self) -> Applicability;

    /// Tie-breaker between candidates of equal specificity.
    fn priority(&self) -> i32;

    /// Returns whether this generator handles `statement` on `database`.
    fn supports_dyn(&self, statement: &dyn SqlStatement, database: &dyn Database) -> bool;

    /// Type-erased [`SqlGenerator::validate`].
    fn validate_dyn(
        &self,
        statement: &dyn SqlStatement,
        database: &dyn Database,
    ) -> Option<ValidationErrors>;

    /// Type-erased [`SqlGenerator::generate_sql`].
    fn generate_sql_dyn(&self, statement: &dyn SqlStatement, database: &dyn Database)
    -> Option<Vec<Sql>>;
}

impl<G: SqlGenerator> DynSqlGenerator for G {
    fn name(&self) -> &'static str {
        SqlGenerator::name(self)
    }

    fn applicability(&self) -> Applicability {
        SqlGenerator::applicability(self)
    }

    fn priority(&self) -> i32 {
        SqlGenerator::priority(self)
    }

    fn supports_dyn(&self, statement: &dyn SqlStatement, database: &dyn Database) -> bool {
        statement
            .as_any()
            .downcast_ref::<G::Statement>()
            .is_some_and(|s| self.supports(s, database))
    }

    fn validate_dyn(
        &self,
        statement: &dyn SqlStatement,
        database: &dyn Database,
    ) -> Option<ValidationErrors> {
        let statement = statement.as_any().downcast_ref::<G::Statement>()?;
        Some(self.validate(statement, database))
    }

    fn generate_sql_dyn(
        &self,
        statement: &dyn SqlStatement,
        database: &dyn Database,
    ) -> Option<Vec<Sql>> {
        let statement = statement.as_any().downcast_ref::<G::Statement>()?;
        Some(self.generate_sql(statement, database))
    }
}

/// Picks the best generator among `candidates`.
///
/// Candidates that do not cover the dialect or decline the statement are
/// skipped. Among the rest, dialect-specific beats generic, then higher
/// priority wins, then list order.
#[must_use]
pub fn select_generator<'a>(
    candidates: &'a [Box<dyn DynSqlGenerator>],
    statement: &dyn SqlStatement,
    database: &dyn Database,
) -> Option<&'a dyn DynSqlGenerator> {
    candidates
        .iter()
        .filter(|g| g.applicability().matches(database) && g.supports_dyn(statement, database))
        .min_by_key(|g| std::cmp::Reverse((g.applicability().is_specific(), g.priority())))
        .map(Box::as_ref)
}

static GLOBAL_FACTORY: OnceLock<SqlGeneratorFactory> = OnceLock::new();

/// Registry of SQL generators, keyed by statement type.
#[derive(Default)]
pub struct SqlGeneratorFactory {
    generators: HashMap<TypeId, Vec<Box<dyn DynSqlGenerator>>>,
}

impl SqlGeneratorFactory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in generator.
    #[must_use]
    pub fn with_core_generators() -> Self {
        let mut factory = Self::new();
        factory
            .register(DropTableGenerator)
            .register(DropViewGenerator)
            .register(DropSequenceGenerator)
            .register(AlterSequenceGenerator)
            .register(GetViewDefinitionGenerator)
            .register(MySqlGetViewDefinitionGenerator)
            .register(RawSqlGenerator);
        factory
    }

    /// Returns the process-wide registry, building it with the core
    /// generators on first use.
    pub fn global() -> &'static Self {
        GLOBAL_FACTORY.get_or_init(Self::with_core_generators)
    }

    /// Installs `factory` as the process-wide registry.
    ///
    /// Must run before the first call to [`Self::global`].
    pub fn install_global(factory: Self) -> Result<()> {
        GLOBAL_FACTORY
            .set(factory)
            .map_err(|_| ChangeError::RegistryInitialized)
    }

    /// Registers a generator for its statement type.
    pub fn register<G: SqlGenerator + 'static>(&mut self, generator: G) -> &mut Self {
        debug!(
            generator = SqlGenerator::name(&generator),
            "Registering SQL generator"
        );
        self.generators
            .entry(TypeId::of::<G::Statement>())
            .or_default()
            .push(Box::new(generator));
        self
    }

    /// Returns the generators registered for the statement's concrete type.
    #[must_use]
    pub fn candidates(&self, statement: &dyn SqlStatement) -> &[Box<dyn DynSqlGenerator>] {
        self.generators
            .get(&statement.as_any().type_id())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Returns the generator that would handle `statement` on `database`.
    #[must_use]
    pub fn generator_for(
        &self,
        statement: &dyn SqlStatement,
        database: &dyn Database,
    ) -> Option<&dyn DynSqlGenerator> {
        select_generator(self.candidates(statement), statement, database)
    }

    /// Returns whether some generator handles `statement` on `database`.
    #[must_use]
    pub fn supports(&self, statement: &dyn SqlStatement, database: &dyn Database) -> bool {
        self.generator_for(statement, database).is_some()
    }

    /// Validates `statement` with its selected generator.
    pub fn validate(
        &self,
        statement: &dyn SqlStatement,
        database: &dyn Database,
    ) -> Result<ValidationErrors> {
        self.generator_for(statement, database)
            .and_then(|g| g.validate_dyn(statement, database))
            .ok_or_else(|| unsupported(statement, database))
    }

    /// Validates and renders a single statement.
    pub fn generate_sql(
        &self,
        statement: &dyn SqlStatement,
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        let generator = self
            .generator_for(statement, database)
            .ok_or_else(|| unsupported(statement, database))?;
        debug!(
            statement = statement.statement_name(),
            database = database.short_name(),
            generator = generator.name(),
            "Selected SQL generator"
        );

        let errors = generator
            .validate_dyn(statement, database)
            .ok_or_else(|| unsupported(statement, database))?;
        if errors.has_errors() {
            return Err(ChangeError::Validation(errors));
        }

        let sql = generator
            .generate_sql_dyn(statement, database)
            .ok_or_else(|| unsupported(statement, database))?;
        for fragment in &sql {
            debug!(sql = %fragment.to_sql(), "Generated SQL");
        }
        Ok(sql)
    }

    /// Renders several statements; fails as a whole if any one fails.
    pub fn generate_sql_for_all(
        &self,
        statements: &[Box<dyn SqlStatement>],
        database: &dyn Database,
    ) -> Result<Vec<Sql>> {
        let mut all = Vec::new();
        for statement in statements {
            all.extend(self.generate_sql(statement.as_ref(), database)?);
        }
        Ok(all)
    }
}

fn unsupported(statement: &dyn SqlStatement, database: &dyn Database) -> ChangeError {
    ChangeError::UnsupportedStatement {
        statement: statement.statement_name().to_string(),
        database: database.short_name().to_string(),
    }
}
