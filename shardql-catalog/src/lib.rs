#![deny(rust_2018_idioms)]

mod column;
mod table;

use std::sync::Arc;

use indexmap::IndexMap;
use shardql_core::Name;
use thiserror::Error;

pub use self::column::{Column, ColumnIndex, CreateColumnInfo};
pub use self::table::{CreateTableInfo, Distribution, Table};

#[derive(Debug, Error)]
pub enum Error {
    #[error("table already exists: `{ident}`")]
    AlreadyExists { ident: Name },

    #[error("duplicate column `{column}` in table `{table}`")]
    DuplicateColumn { table: Name, column: Name },

    #[error("table `{ident}` exceeds the column limit of {limit}")]
    TooManyColumns { ident: Name, limit: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Immutable table metadata the binder resolves names against.
///
/// Built once upstream (DDL, metadata refresh) and then shared read-only with
/// any number of concurrent binding passes.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: IndexMap<Name, Arc<Table>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&mut self, info: CreateTableInfo) -> Result<Arc<Table>> {
        let table = Arc::new(Table::new(info)?);
        if self.tables.contains_key(table.name()) {
            return Err(Error::AlreadyExists { ident: table.name().clone() });
        }

        tracing::debug!(table = %table.name(), "created table");
        self.tables.insert(table.name().clone(), Arc::clone(&table));
        Ok(table)
    }

    #[inline]
    pub fn table(&self, name: &Name) -> Option<&Arc<Table>> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Arc<Table>> + '_ {
        self.tables.values()
    }
}
