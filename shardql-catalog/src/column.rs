use shardql_core::{LogicalType, Name};

/// Column metadata as recorded in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub(crate) name: Name,
    pub(crate) index: ColumnIndex,
    pub(crate) ty: LogicalType,
    pub(crate) nullable: bool,
}

impl Column {
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn index(&self) -> ColumnIndex {
        self.index
    }

    #[inline]
    pub fn logical_type(&self) -> LogicalType {
        self.ty.clone()
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// The position of a column within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex {
    index: u8,
}

impl ColumnIndex {
    #[inline]
    pub(crate) fn new(index: u8) -> Self {
        Self { index }
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
pub struct CreateColumnInfo {
    pub name: Name,
    pub ty: LogicalType,
    pub nullable: bool,
}
