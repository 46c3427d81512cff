#![deny(rust_2018_idioms)]

//! Semantic binding for a sharded SQL compiler.
//!
//! Feed a parsed [`ast::SelectStatement`] and a [`Catalog`] to a [`Binder`]
//! and get back a statement of identical shape in which every column
//! reference carries its resolved table, column metadata, and
//! local-vs-correlated origin.

pub use shardql_ast as ast;
pub use shardql_bind::{Binder, Error, Result, Scope, TableScope, DEFAULT_MAX_DEPTH};
pub use shardql_catalog as catalog;
pub use shardql_catalog::{
    Catalog, Column, ColumnIndex, CreateColumnInfo, CreateTableInfo, Distribution, Table,
};
pub use shardql_core::{LogicalType, Name};
