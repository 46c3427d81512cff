use indexmap::IndexMap;
use shardql_core::Name;

use crate::{Column, ColumnIndex, CreateColumnInfo, Error, Result};

/// Placement of a table's rows across storage units.
///
/// The binder only carries this metadata through to bound column references;
/// routing on it happens downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distribution {
    /// The whole table lives on a single storage unit.
    Single { unit: Name },
    /// Rows are fragmented across several storage units.
    Sharded { units: Vec<Name> },
    /// A relation with no physical placement, e.g. a derived table.
    Virtual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: Name,
    columns: IndexMap<Name, Column>,
    distribution: Distribution,
}

impl Table {
    pub fn new(info: CreateTableInfo) -> Result<Self> {
        let mut columns = IndexMap::with_capacity(info.columns.len());
        for (i, column) in info.columns.into_iter().enumerate() {
            let index = u8::try_from(i).map_err(|_| Error::TooManyColumns {
                ident: info.name.clone(),
                limit: u8::MAX as usize + 1,
            })?;

            let column = Column {
                name: column.name,
                index: ColumnIndex::new(index),
                ty: column.ty,
                nullable: column.nullable,
            };

            if let Some(existing) = columns.insert(column.name.clone(), column) {
                return Err(Error::DuplicateColumn { table: info.name, column: existing.name });
            }
        }

        Ok(Self { name: info.name, columns, distribution: info.distribution })
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn column(&self, name: &Name) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Columns in definition order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.values()
    }

    #[inline]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }
}

#[derive(Debug, Clone)]
pub struct CreateTableInfo {
    pub name: Name,
    pub columns: Vec<CreateColumnInfo>,
    pub distribution: Distribution,
}
