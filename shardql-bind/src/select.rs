use std::sync::Arc;

use shardql_ast::{
    Expr, Literal, OrderExpr, SelectItem, SelectStatement, TableFactor,
};
use shardql_catalog::{CreateColumnInfo, CreateTableInfo, Distribution, Table};
use shardql_core::{LogicalType, Name};

use crate::{Binder, Error, Result, Scope, TableScope};

impl<'env> Binder<'env> {
    /// Statement-level bind entry point. `scope` carries the outer tables
    /// (empty for a top-level statement); the statement's own FROM list is
    /// folded into it before any expression is bound.
    #[tracing::instrument(skip(self, stmt))]
    pub(crate) fn bind_select(
        &self,
        scope: Scope,
        stmt: &SelectStatement,
    ) -> Result<(Scope, SelectStatement)> {
        let (scope, from) = self.bind_from(scope, &stmt.from)?;

        let projection = stmt
            .projection
            .iter()
            .map(|item| self.bind_select_item(&scope, item))
            .collect::<Result<Vec<_>>>()?;

        let filter = stmt.filter.as_ref().map(|expr| self.bind_expr(&scope, expr)).transpose()?;

        let order_by = stmt
            .order_by
            .iter()
            .map(|order| {
                Ok(OrderExpr { expr: self.bind_expr(&scope, &order.expr)?, asc: order.asc })
            })
            .collect::<Result<Vec<_>>>()?;

        let stmt = SelectStatement { projection, from, filter, order_by, limit: stmt.limit };
        Ok((scope, stmt))
    }

    fn bind_from(&self, scope: Scope, from: &[TableFactor]) -> Result<(Scope, Vec<TableFactor>)> {
        let mut scope = scope;
        let mut bound = Vec::with_capacity(from.len());
        for factor in from {
            let (next, factor) = self.bind_table_factor(scope, factor)?;
            scope = next;
            bound.push(factor);
        }

        Ok((scope, bound))
    }

    fn bind_table_factor(
        &self,
        scope: Scope,
        factor: &TableFactor,
    ) -> Result<(Scope, TableFactor)> {
        match factor {
            TableFactor::Table { name, alias } => {
                let table = self
                    .catalog
                    .table(name)
                    .ok_or_else(|| Error::UnknownTable { ident: name.clone() })?;
                let ident = alias.clone().unwrap_or_else(|| name.clone());
                let scope = scope.push_table(TableScope::new(ident, Arc::clone(table)))?;
                Ok((scope, factor.clone()))
            }
            TableFactor::Derived { subquery, alias } => {
                let (sub_scope, bound) = self.bind_derived(&scope, subquery)?;
                let table = Arc::new(Table::new(derived_table_info(alias, &sub_scope, &bound))?);
                let scope = scope.push_table(TableScope::new(alias.clone(), table))?;
                Ok((scope, TableFactor::Derived { subquery: Box::new(bound), alias: alias.clone() }))
            }
        }
    }

    fn bind_select_item(&self, scope: &Scope, item: &SelectItem) -> Result<SelectItem> {
        let item = match item {
            SelectItem::Expr(expr) => SelectItem::Expr(self.bind_expr(scope, expr)?),
            SelectItem::ExprWithAlias { expr, alias } => SelectItem::ExprWithAlias {
                expr: self.bind_expr(scope, expr)?,
                alias: alias.clone(),
            },
            // wildcards are validated against the local scope but not
            // expanded; binding never changes a statement's arity
            SelectItem::Wildcard => {
                if scope.local_tables().next().is_none() {
                    return Err(Error::UnknownColumn { ident: "*".into() });
                }
                SelectItem::Wildcard
            }
            SelectItem::QualifiedWildcard(ident) => {
                if scope.local_tables().all(|t| t.ident() != ident) {
                    return Err(Error::UnknownTable { ident: ident.clone() });
                }
                SelectItem::QualifiedWildcard(ident.clone())
            }
        };

        Ok(item)
    }
}

/// Synthesize the column set a derived table exposes to its enclosing
/// statement, from the bound projection of the nested statement. Duplicate
/// column names surface as a catalog error when the table is constructed.
fn derived_table_info(alias: &Name, scope: &Scope, stmt: &SelectStatement) -> CreateTableInfo {
    let mut columns = Vec::with_capacity(stmt.projection.len());
    for (i, item) in stmt.projection.iter().enumerate() {
        match item {
            SelectItem::Expr(expr) => columns.push(CreateColumnInfo {
                name: projection_name(expr, i),
                ty: projection_type(expr),
                nullable: true,
            }),
            SelectItem::ExprWithAlias { expr, alias } => columns.push(CreateColumnInfo {
                name: alias.clone(),
                ty: projection_type(expr),
                nullable: true,
            }),
            SelectItem::Wildcard => {
                for table in scope.local_tables() {
                    columns.extend(table.table().columns().map(column_info));
                }
            }
            SelectItem::QualifiedWildcard(ident) => {
                // the nested statement already validated the qualifier
                for table in scope.local_tables().filter(|t| t.ident() == ident) {
                    columns.extend(table.table().columns().map(column_info));
                }
            }
        }
    }

    CreateTableInfo { name: alias.clone(), columns, distribution: Distribution::Virtual }
}

fn column_info(column: &shardql_catalog::Column) -> CreateColumnInfo {
    CreateColumnInfo {
        name: column.name().clone(),
        ty: column.logical_type(),
        nullable: column.is_nullable(),
    }
}

fn projection_name(expr: &Expr, index: usize) -> Name {
    match expr {
        Expr::Column(column) => column.name.clone(),
        // default column names are col1, col2, etc.
        _ => Name::from(format!("col{}", index + 1)),
    }
}

/// Best-effort type of a projection item, for the scope a derived table
/// exposes. Full type checking of bound projections happens downstream.
fn projection_type(expr: &Expr) -> LogicalType {
    match expr {
        Expr::Literal(literal) => match literal {
            Literal::Null => LogicalType::Null,
            Literal::Bool(_) => LogicalType::Bool,
            Literal::Decimal(_) => LogicalType::Decimal,
            Literal::String(_) => LogicalType::Text,
        },
        Expr::Column(column) => column
            .binding
            .as_ref()
            .map(|binding| binding.column.logical_type())
            .unwrap_or(LogicalType::Null),
        Expr::BinaryOp { op, lhs, .. } => {
            if op.is_predicate() {
                LogicalType::Bool
            } else {
                projection_type(lhs)
            }
        }
        Expr::Not(_) | Expr::Between { .. } | Expr::In { .. } | Expr::Exists { .. } => {
            LogicalType::Bool
        }
        Expr::Subquery(_) | Expr::FunctionCall { .. } => LogicalType::Null,
    }
}
