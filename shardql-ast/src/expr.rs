use std::fmt;

use rust_decimal::Decimal;
use shardql_catalog::Column;
use shardql_core::Name;

use crate::SelectStatement;

/// An expression as produced by the parser.
///
/// Binding is shape preserving: a bound tree has the same variant and child
/// arity everywhere, with column references enriched in place. Variants the
/// binder has no handler for pass through binding untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    BinaryOp { op: BinaryOperator, lhs: Box<Expr>, rhs: Box<Expr> },
    Not(Box<Expr>),
    Between { expr: Box<Expr>, low: Box<Expr>, high: Box<Expr>, negated: bool },
    In { expr: Box<Expr>, list: InList, negated: bool },
    Exists { subquery: Box<SelectStatement>, negated: bool },
    Subquery(Box<SelectStatement>),
    FunctionCall { name: Name, args: Vec<Expr> },
}

impl Expr {
    #[inline]
    pub fn column(name: impl Into<Name>) -> Self {
        Expr::Column(ColumnRef::unqualified(name))
    }

    #[inline]
    pub fn qualified_column(qualifier: impl Into<Name>, name: impl Into<Name>) -> Self {
        Expr::Column(ColumnRef::qualified(qualifier, name))
    }

    #[inline]
    pub fn binop(op: BinaryOperator, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinaryOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }
}

/// The right-hand side of an `IN` expression.
#[derive(Debug, Clone, PartialEq)]
pub enum InList {
    Values(Vec<Expr>),
    Subquery(Box<SelectStatement>),
}

/// A column reference.
///
/// `qualifier` and `name` are what the parser saw; `binding` is `None` until
/// the binder resolves the reference. The parsed fields survive binding,
/// which is what makes re-binding a bound tree a no-op equivalent transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub qualifier: Option<Name>,
    pub name: Name,
    pub binding: Option<ColumnBinding>,
}

impl ColumnRef {
    #[inline]
    pub fn unqualified(name: impl Into<Name>) -> Self {
        Self { qualifier: None, name: name.into(), binding: None }
    }

    #[inline]
    pub fn qualified(qualifier: impl Into<Name>, name: impl Into<Name>) -> Self {
        Self { qualifier: Some(qualifier.into()), name: name.into(), binding: None }
    }
}

/// Resolution metadata attached to a column reference by the binder.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    /// The scope identity the reference resolved against (alias if the table
    /// was aliased, the table name otherwise).
    pub table: Name,
    /// The catalog name of the owning table.
    pub table_name: Name,
    pub column: Column,
    pub origin: ColumnOrigin,
}

/// Whether a reference resolved in the binding statement's own FROM list or
/// in an enclosing statement's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnOrigin {
    Local,
    Correlated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Decimal(Decimal),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
}

impl BinaryOperator {
    /// Whether the operator yields a boolean regardless of operand types.
    pub fn is_predicate(self) -> bool {
        use BinaryOperator::*;
        matches!(self, Eq | NotEq | Lt | LtEq | Gt | GtEq | And | Or)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{literal}"),
            Expr::Column(column) => write!(f, "{column}"),
            Expr::BinaryOp { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Expr::Not(inner) => write!(f, "NOT {inner}"),
            Expr::Between { expr, low, high, negated } => {
                write!(f, "{expr} {}BETWEEN {low} AND {high}", if *negated { "NOT " } else { "" })
            }
            Expr::In { expr, list, negated } => {
                write!(f, "{expr} {}IN ", if *negated { "NOT " } else { "" })?;
                match list {
                    InList::Values(values) => {
                        write!(f, "(")?;
                        for (i, value) in values.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{value}")?;
                        }
                        write!(f, ")")
                    }
                    InList::Subquery(subquery) => write!(f, "({subquery})"),
                }
            }
            Expr::Exists { subquery, negated } => {
                write!(f, "{}EXISTS ({subquery})", if *negated { "NOT " } else { "" })
            }
            Expr::Subquery(subquery) => write!(f, "({subquery})"),
            Expr::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Decimal(n) => write!(f, "{n}"),
            Literal::String(s) => write!(f, "'{s}'"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        };
        f.write_str(op)
    }
}
