#![deny(rust_2018_idioms)]

//! The parsed, variant-tagged statement tree consumed and enriched by the
//! binder. Trees are produced once by parsing, bound once, and immutable
//! afterwards; binding replaces nodes rather than mutating them.

mod expr;
mod stmt;

pub use rust_decimal::Decimal;

pub use self::expr::{
    BinaryOperator, ColumnBinding, ColumnOrigin, ColumnRef, Expr, InList, Literal,
};
pub use self::stmt::{OrderExpr, SelectItem, SelectStatement, TableFactor};
