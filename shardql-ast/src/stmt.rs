use std::fmt;

use shardql_core::Name;

use crate::Expr;

/// A SELECT statement, possibly nested inside another as a subquery.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub projection: Vec<SelectItem>,
    pub from: Vec<TableFactor>,
    pub filter: Option<Expr>,
    pub order_by: Vec<OrderExpr>,
    pub limit: Option<u64>,
}

impl SelectStatement {
    /// `SELECT <projection> FROM <from>` with no filter, ordering, or limit.
    pub fn new(projection: Vec<SelectItem>, from: Vec<TableFactor>) -> Self {
        Self { projection, from, filter: None, order_by: vec![], limit: None }
    }

    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Expr(Expr),
    ExprWithAlias { expr: Expr, alias: Name },
    Wildcard,
    QualifiedWildcard(Name),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableFactor {
    Table { name: Name, alias: Option<Name> },
    Derived { subquery: Box<SelectStatement>, alias: Name },
}

impl TableFactor {
    #[inline]
    pub fn table(name: impl Into<Name>) -> Self {
        TableFactor::Table { name: name.into(), alias: None }
    }

    #[inline]
    pub fn aliased(name: impl Into<Name>, alias: impl Into<Name>) -> Self {
        TableFactor::Table { name: name.into(), alias: Some(alias.into()) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderExpr {
    pub expr: Expr,
    pub asc: bool,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        for (i, item) in self.projection.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }

        if !self.from.is_empty() {
            write!(f, " FROM ")?;
            for (i, factor) in self.from.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{factor}")?;
            }
        }

        if let Some(filter) = &self.filter {
            write!(f, " WHERE {filter}")?;
        }

        if !self.order_by.is_empty() {
            write!(f, " ORDER BY ")?;
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}{}", order.expr, if order.asc { "" } else { " DESC" })?;
            }
        }

        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }

        Ok(())
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Expr(expr) => write!(f, "{expr}"),
            SelectItem::ExprWithAlias { expr, alias } => write!(f, "{expr} AS {alias}"),
            SelectItem::Wildcard => write!(f, "*"),
            SelectItem::QualifiedWildcard(table) => write!(f, "{table}.*"),
        }
    }
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFactor::Table { name, alias: None } => write!(f, "{name}"),
            TableFactor::Table { name, alias: Some(alias) } => write!(f, "{name} AS {alias}"),
            TableFactor::Derived { subquery, alias } => write!(f, "({subquery}) AS {alias}"),
        }
    }
}
