use crate::catalog::column::Column;
use crate::catalog::error::{CatalogResult, Error};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    key: String,
    name: String,
    /// Columns by key, in insertion order
    columns: IndexMap<String, Column>,
    /// Key of the single primary-key column
    primary_key: Option<String>,
}

impl Table {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            columns: IndexMap::new(),
            primary_key: None,
        }
    }

    pub fn with_columns(
        key: impl Into<String>,
        name: impl Into<String>,
        columns: Vec<Column>,
    ) -> CatalogResult<Self> {
        let mut table = Self::new(key, name);
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.get(key)
    }

    pub(crate) fn column_mut(&mut self, key: &str) -> Option<&mut Column> {
        self.columns.get_mut(key)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.primary_key
            .as_deref()
            .and_then(|key| self.columns.get(key))
    }

    /// Keys of the tables referenced by this table's foreign keys, in column
    /// order. A target referenced by several columns is yielded once per column.
    pub fn foreign_tables(&self) -> impl Iterator<Item = &str> + Clone {
        self.columns
            .values()
            .filter_map(|column| column.foreign_key())
            .map(|fk| fk.table())
    }

    pub fn add_column(&mut self, column: Column) -> CatalogResult<()> {
        if self.columns.contains_key(column.key()) {
            return Err(Error::Duplicated("column", column.key().to_string()));
        }
        if column.is_primary_key() {
            if let Some(existing) = self.primary_key() {
                return Err(Error::CompositePrimaryKey {
                    table: self.name.clone(),
                    existing: existing.name().to_string(),
                    column: column.name().to_string(),
                });
            }
            self.primary_key = Some(column.key().to_string());
        }
        self.columns.insert(column.key().to_string(), column);
        Ok(())
    }

    pub fn drop_column(&mut self, key: &str) -> Option<Column> {
        let column = self.columns.shift_remove(key)?;
        if column.is_primary_key() {
            self.primary_key = None;
        }
        Some(column)
    }
}
