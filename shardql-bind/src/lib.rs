#![deny(rust_2018_idioms)]

//! Semantic resolution of parsed statements.
//!
//! The binder walks an expression tree, resolves every column reference
//! against the tables visible to it, and rebuilds the tree with resolution
//! metadata attached. The output has the same shape as the input; a failed
//! resolution aborts the whole statement so nothing partially bound ever
//! reaches the rewrite and routing stages.

mod expr;
mod scope;
mod select;
mod subquery;

use shardql_ast as ast;
use shardql_catalog::Catalog;
use shardql_core::Name;
use thiserror::Error;

pub use self::scope::{Scope, TableScope};

#[derive(Debug, Error)]
pub enum Error {
    #[error("unbound table `{ident}`")]
    UnknownTable { ident: Name },

    #[error("unbound column `{ident}`")]
    UnknownColumn { ident: String },

    #[error("column `{ident}` is ambiguous, it could refer to any one of {}", .candidates.join(", "))]
    AmbiguousColumn { ident: Name, candidates: Vec<String> },

    #[error("table name `{ident}` specified more than once")]
    AmbiguousTable { ident: Name },

    #[error("subquery nesting exceeds the limit of {limit}")]
    SubqueryNestingTooDeep { limit: usize },

    #[error(transparent)]
    Catalog(#[from] shardql_catalog::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default bound on subquery nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// The per-statement binding context: catalog access plus the statement and
/// expression entry points. Holds no mutable state; concurrent binds against
/// the same catalog need no coordination.
pub struct Binder<'env> {
    catalog: &'env Catalog,
    max_depth: usize,
}

impl<'env> Binder<'env> {
    pub fn new(catalog: &'env Catalog) -> Self {
        Self { catalog, max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Override the subquery nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Bind a top-level statement. Nested statements are bound recursively
    /// through the subquery binder with their enclosing tables promoted into
    /// the outer scope.
    pub fn bind(&self, stmt: &ast::SelectStatement) -> Result<ast::SelectStatement> {
        let (_scope, stmt) = self.bind_select(Scope::default(), stmt)?;
        Ok(stmt)
    }
}
