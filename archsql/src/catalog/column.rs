use crate::catalog::types::DataType;

/// Non-owning link from a foreign-key column to the column it references.
/// Both halves are keys into the owning [`crate::catalog::Database`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    table: String,
    column: String,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    key: String,
    name: String,
    datatype: DataType,
    primary_key: bool,
    not_null: bool,
    autoincrement: bool,
    references: Option<ForeignKey>,
}

impl Column {
    pub fn new(key: impl Into<String>, name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            datatype,
            primary_key: false,
            not_null: false,
            autoincrement: false,
            references: None,
        }
    }

    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary_key = primary;
        self
    }

    pub fn with_not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    pub fn with_autoincrement(mut self, autoincrement: bool) -> Self {
        self.autoincrement = autoincrement;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_autoincrement(&self) -> bool {
        self.autoincrement
    }

    pub fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }

    pub fn foreign_key(&self) -> Option<&ForeignKey> {
        self.references.as_ref()
    }

    pub(crate) fn set_foreign_key(&mut self, foreign_key: ForeignKey) {
        self.references = Some(foreign_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column() {
        let column = Column::new("COL_1", "id", DataType::Integer)
            .with_primary(true)
            .with_autoincrement(true);
        assert_eq!(column.key(), "COL_1");
        assert_eq!(column.name(), "id");
        assert_eq!(column.datatype(), DataType::Integer);
        assert!(column.is_primary_key());
        assert!(column.is_autoincrement());
        assert!(!column.is_not_null());
        assert!(!column.is_foreign_key());
        assert_eq!(column.foreign_key(), None);
    }

    #[test]
    fn foreign_key() {
        let mut column = Column::new("COL_9", "author_id", DataType::Integer).with_not_null(true);
        column.set_foreign_key(ForeignKey::new("TAB_1", "COL_1"));
        assert!(column.is_foreign_key());
        let fk = column.foreign_key().unwrap();
        assert_eq!(fk.table(), "TAB_1");
        assert_eq!(fk.column(), "COL_1");
    }
}
