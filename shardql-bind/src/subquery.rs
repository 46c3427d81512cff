use shardql_ast::SelectStatement;

use crate::{Binder, Error, Result, Scope};

impl<'env> Binder<'env> {
    /// Bind a nested statement in an expression position (`EXISTS (..)`,
    /// scalar subqueries, `IN (SELECT ..)`).
    ///
    /// The nested statement's own FROM list becomes its local scope; the
    /// union of the current statement's local and outer tables becomes its
    /// outer scope, which is how a reference three levels deep still reaches
    /// its grandparent's tables.
    pub(crate) fn bind_subquery(
        &self,
        scope: &Scope,
        stmt: &SelectStatement,
    ) -> Result<SelectStatement> {
        let subscope = scope.subscope();
        self.check_depth(&subscope)?;
        let (_scope, stmt) = self.bind_select(subscope, stmt)?;
        Ok(stmt)
    }

    /// Bind a derived table in a FROM position. The nested statement is
    /// bound with a detached scope: a derived table is not a correlation
    /// position, so the enclosing tables stay invisible to it.
    ///
    /// Returns the subquery's own final scope alongside the bound statement
    /// so the caller can synthesize the derived table's columns from it.
    pub(crate) fn bind_derived(
        &self,
        scope: &Scope,
        stmt: &SelectStatement,
    ) -> Result<(Scope, SelectStatement)> {
        let subscope = scope.detached_subscope();
        self.check_depth(&subscope)?;
        self.bind_select(subscope, stmt)
    }

    fn check_depth(&self, scope: &Scope) -> Result<()> {
        if scope.depth() > self.max_depth {
            return Err(Error::SubqueryNestingTooDeep { limit: self.max_depth });
        }

        Ok(())
    }
}
