use crate::catalog::error::{CatalogResult, Error};
use indexmap::IndexMap;
use std::fmt::Formatter;

mod column;
pub mod error;
mod table;
mod types;

pub use column::{Column, ForeignKey};
pub use table::Table;
pub use types::DataType;

/// Every table of a schema, keyed by table key in insertion order.
///
/// The database owns its tables and, through them, their columns. Foreign
/// keys only hold keys back into this map and are resolved on demand with
/// [`Database::resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    tables: IndexMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, key: &str) -> Option<&Table> {
        self.tables.get(key)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn add_table(&mut self, table: Table) -> CatalogResult<()> {
        if self.tables.contains_key(table.key()) {
            return Err(Error::Duplicated("table", table.key().to_string()));
        }
        self.tables.insert(table.key().to_string(), table);
        Ok(())
    }

    pub fn drop_table(&mut self, key: &str) -> Option<Table> {
        self.tables.shift_remove(key)
    }

    /// Marks column `fk_column_key` of table `fk_table_key` as referencing
    /// column `pk_column_key` of table `pk_table_key`.
    pub fn add_relation(
        &mut self,
        pk_table_key: &str,
        fk_table_key: &str,
        pk_column_key: &str,
        fk_column_key: &str,
    ) -> CatalogResult<()> {
        let pk_table = self
            .table(pk_table_key)
            .ok_or_else(|| Error::NotFound("table", pk_table_key.to_string()))?;
        if pk_table.column(pk_column_key).is_none() {
            return Err(Error::NotFound(
                "column",
                format!("{pk_table_key}.{pk_column_key}"),
            ));
        }

        let fk_table = self
            .tables
            .get_mut(fk_table_key)
            .ok_or_else(|| Error::NotFound("table", fk_table_key.to_string()))?;
        let fk_column = fk_table.column_mut(fk_column_key).ok_or_else(|| {
            Error::NotFound("column", format!("{fk_table_key}.{fk_column_key}"))
        })?;
        if let Some(existing) = fk_column.foreign_key() {
            return Err(Error::ForeignKeyExists {
                table: fk_table_key.to_string(),
                column: fk_column_key.to_string(),
                target: format!("{}.{}", existing.table(), existing.column()),
            });
        }
        fk_column.set_foreign_key(ForeignKey::new(pk_table_key, pk_column_key));
        Ok(())
    }

    /// Looks up the table and column a foreign key points at.
    pub fn resolve(&self, foreign_key: &ForeignKey) -> Option<(&Table, &Column)> {
        let table = self.table(foreign_key.table())?;
        let column = table.column(foreign_key.column())?;
        Some((table, column))
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "tables:")?;
        for table in self.tables() {
            writeln!(f, "    - {} ({})", table.name(), table.key())?;
            for column in table.columns() {
                write!(f, "        > {} ({}) {}", column.name(), column.key(), column.datatype())?;
                if column.is_primary_key() {
                    write!(f, " PK")?;
                }
                if let Some(fk) = column.foreign_key() {
                    match self.resolve(fk) {
                        Some((target, target_column)) => {
                            write!(f, " FK {}.{}", target.name(), target_column.name())?
                        }
                        None => write!(f, " FK {}.{} (unresolved)", fk.table(), fk.column())?,
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
