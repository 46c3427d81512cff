use std::fmt;
use std::str::FromStr;

use anyhow::bail;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub enum LogicalType {
    Null,
    Bool,
    Int64,
    Float64,
    Decimal,
    Text,
    Bytea,
}

impl FromStr for LogicalType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "bigint" => Ok(Self::Int64),
            "float" | "double" => Ok(Self::Float64),
            "decimal" => Ok(Self::Decimal),
            "text" | "varchar" => Ok(Self::Text),
            "bytea" => Ok(Self::Bytea),
            _ => bail!("unhandled value `{s}` in LogicalType::from_str"),
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Null => write!(f, "null"),
            LogicalType::Bool => write!(f, "boolean"),
            LogicalType::Int64 => write!(f, "int"),
            LogicalType::Float64 => write!(f, "float"),
            LogicalType::Decimal => write!(f, "decimal"),
            LogicalType::Text => write!(f, "text"),
            LogicalType::Bytea => write!(f, "bytea"),
        }
    }
}
