use shardql_ast::{ColumnRef, Expr, InList};

use crate::{Binder, Result, Scope};

impl<'env> Binder<'env> {
    /// Dispatch an expression to the binder for its variant.
    ///
    /// Variants with no binder registered are returned unchanged rather than
    /// rejected: support for an expression kind is deferred, not denied, and
    /// downstream stages treat the untouched node as opaque. Operands never
    /// introduce scope, so every delegation passes the scope through as is.
    pub fn bind_expr(&self, scope: &Scope, expr: &Expr) -> Result<Expr> {
        match expr {
            Expr::Column(column) => Ok(Expr::Column(self.bind_column(scope, column)?)),
            Expr::BinaryOp { op, lhs, rhs } => Ok(Expr::BinaryOp {
                op: *op,
                lhs: Box::new(self.bind_expr(scope, lhs)?),
                rhs: Box::new(self.bind_expr(scope, rhs)?),
            }),
            Expr::Not(inner) => Ok(Expr::Not(Box::new(self.bind_expr(scope, inner)?))),
            Expr::Between { expr, low, high, negated } => Ok(Expr::Between {
                expr: Box::new(self.bind_expr(scope, expr)?),
                low: Box::new(self.bind_expr(scope, low)?),
                high: Box::new(self.bind_expr(scope, high)?),
                negated: *negated,
            }),
            Expr::In { expr, list, negated } => self.bind_in(scope, expr, list, *negated),
            Expr::Exists { subquery, negated } => Ok(Expr::Exists {
                subquery: Box::new(self.bind_subquery(scope, subquery)?),
                negated: *negated,
            }),
            Expr::Subquery(subquery) => {
                Ok(Expr::Subquery(Box::new(self.bind_subquery(scope, subquery)?)))
            }
            // no binder registered for these variants yet
            Expr::Literal(_) | Expr::FunctionCall { .. } => Ok(expr.clone()),
        }
    }

    fn bind_in(&self, scope: &Scope, target: &Expr, list: &InList, negated: bool) -> Result<Expr> {
        let target = self.bind_expr(scope, target)?;
        let list = match list {
            InList::Values(values) => InList::Values(
                values.iter().map(|value| self.bind_expr(scope, value)).collect::<Result<_>>()?,
            ),
            InList::Subquery(subquery) => {
                InList::Subquery(Box::new(self.bind_subquery(scope, subquery)?))
            }
        };

        Ok(Expr::In { expr: Box::new(target), list, negated })
    }

    fn bind_column(&self, scope: &Scope, column: &ColumnRef) -> Result<ColumnRef> {
        let binding = scope.resolve_column(column.qualifier.as_ref(), &column.name)?;
        tracing::debug!(column = %column, table = %binding.table, origin = ?binding.origin, "bound column");
        Ok(ColumnRef { binding: Some(binding), ..column.clone() })
    }
}
