use std::sync::Arc;

use shardql_ast::{ColumnBinding, ColumnOrigin};
use shardql_catalog::{Column, Table};
use shardql_core::Name;

use crate::{Error, Result};


/// A table visible to name resolution, keyed by its alias if one was given
/// and its table name otherwise.
#[derive(Debug, Clone)]
pub struct TableScope {
    ident: Name,
    table: Arc<Table>,
}

impl TableScope {
    pub(crate) fn new(ident: Name, table: Arc<Table>) -> Self {
        Self { ident, table }
    }

    #[inline]
    pub fn ident(&self) -> &Name {
        &self.ident
    }

    #[inline]
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    fn column(&self, name: &Name) -> Option<&Column> {
        self.table.column(name)
    }

    fn binding(&self, column: &Column, origin: ColumnOrigin) -> ColumnBinding {
        ColumnBinding {
            table: self.ident.clone(),
            table_name: self.table.name().clone(),
            column: column.clone(),
            origin,
        }
    }
}

/// The tables a name may resolve against while binding one statement.
///
/// `local` is the statement's own FROM list in FROM order; `outer` holds
/// enclosing statements' tables and is only populated while binding inside a
/// subquery. The scope is a persistent value: growing it returns a new scope,
/// so every recursive call sees exactly the chain its nesting level implies
/// and the caller's scope is untouched on the way back up.
#[derive(Debug, Clone)]
pub struct Scope {
    local: rpds::Vector<TableScope>,
    outer: rpds::Vector<TableScope>,
    depth: usize,
}

impl Default for Scope {
    fn default() -> Self {
        Self { local: rpds::Vector::new(), outer: rpds::Vector::new(), depth: 0 }
    }
}

impl Scope {
    /// Statement nesting depth, zero at the top level.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn local_tables(&self) -> impl Iterator<Item = &TableScope> + '_ {
        self.local.iter()
    }

    /// Add a table to the local scope. FROM-list identities must be unique;
    /// a self-join without aliases has no way to qualify either side.
    pub(crate) fn push_table(&self, table: TableScope) -> Result<Scope> {
        if self.local.iter().any(|t| t.ident() == table.ident()) {
            return Err(Error::AmbiguousTable { ident: table.ident().clone() });
        }

        tracing::debug!(ident = %table.ident(), "scoping table");
        Ok(Self {
            local: self.local.push_back(table),
            outer: self.outer.clone(),
            depth: self.depth,
        })
    }

    /// The scope a nested statement in an expression position starts from:
    /// no local tables yet, and everything visible here flattened into
    /// `outer` so a reference several levels deep can still reach the
    /// outermost statement's tables. Nearer tables shadow farther ones with
    /// the same identity.
    pub(crate) fn subscope(&self) -> Scope {
        let mut outer = rpds::Vector::new();
        for table in self.local.iter().chain(self.outer.iter()) {
            if !outer.iter().any(|t: &TableScope| t.ident() == table.ident()) {
                outer = outer.push_back(table.clone());
            }
        }

        Scope { local: rpds::Vector::new(), outer, depth: self.depth + 1 }
    }

    /// The scope a derived table starts from. Unlike expression subqueries, a
    /// derived table sees neither its FROM-list siblings nor the enclosing
    /// statement's tables.
    pub(crate) fn detached_subscope(&self) -> Scope {
        Scope { local: rpds::Vector::new(), outer: rpds::Vector::new(), depth: self.depth + 1 }
    }

    /// Resolve a column reference to the single scope entry that owns it.
    pub fn resolve_column(&self, qualifier: Option<&Name>, name: &Name) -> Result<ColumnBinding> {
        match qualifier {
            Some(owner) => self.resolve_qualified(owner, name),
            None => self.resolve_unqualified(name),
        }
    }

    fn resolve_qualified(&self, owner: &Name, name: &Name) -> Result<ColumnBinding> {
        let (table, origin) = match self.local.iter().find(|t| t.ident() == owner) {
            Some(table) => (table, ColumnOrigin::Local),
            None => match self.outer.iter().find(|t| t.ident() == owner) {
                Some(table) => (table, ColumnOrigin::Correlated),
                None => return Err(Error::UnknownTable { ident: owner.clone() }),
            },
        };

        let column = table
            .column(name)
            .ok_or_else(|| Error::UnknownColumn { ident: format!("{owner}.{name}") })?;
        Ok(table.binding(column, origin))
    }

    fn resolve_unqualified(&self, name: &Name) -> Result<ColumnBinding> {
        for (chain, origin) in
            [(&self.local, ColumnOrigin::Local), (&self.outer, ColumnOrigin::Correlated)]
        {
            let matches = chain
                .iter()
                .filter_map(|t| t.column(name).map(|column| (t, column)))
                .collect::<Vec<_>>();

            match matches[..] {
                [] => continue,
                [(table, column)] => return Ok(table.binding(column, origin)),
                _ => {
                    return Err(Error::AmbiguousColumn {
                        ident: name.clone(),
                        candidates: matches
                            .iter()
                            .map(|(t, _)| format!("`{}.{name}`", t.ident()))
                            .collect(),
                    });
                }
            }
        }

        Err(Error::UnknownColumn { ident: name.to_string() })
    }
}
