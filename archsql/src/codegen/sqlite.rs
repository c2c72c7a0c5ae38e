use crate::catalog::{Column, Database, Table};
use crate::codegen::{resolve, sql_identifier, Codegen, CodegenResult};

const INDENT: &str = "    ";

/// SQLite DDL script, one `CREATE TABLE` block per table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteScript;

impl Codegen for SqliteScript {
    fn comment(&self) -> &'static str {
        "--"
    }

    fn generate(&self, database: &Database, tables: &[&Table]) -> CodegenResult<String> {
        let blocks = tables
            .iter()
            .map(|table| create_table(database, table))
            .collect::<CodegenResult<Vec<_>>>()?;

        let mut script = self.header();
        script.push('\n');
        script.push_str(&blocks.join("\n\n"));
        script.push('\n');
        Ok(script)
    }
}

fn create_table(database: &Database, table: &Table) -> CodegenResult<String> {
    let columns = table
        .columns()
        .map(|column| column_definition(database, table, column))
        .collect::<CodegenResult<Vec<_>>>()?;
    Ok(format!(
        "CREATE TABLE {} (\n{}\n);",
        sql_identifier(table.name()),
        columns.join(",\n")
    ))
}

fn column_definition(database: &Database, table: &Table, column: &Column) -> CodegenResult<String> {
    let mut line = format!(
        "{INDENT}{} {}",
        sql_identifier(column.name()),
        column.datatype()
    );
    // a primary key is implicitly NOT NULL
    if column.is_not_null() && !column.is_primary_key() {
        line.push_str(" NOT NULL");
    }
    if column.is_primary_key() {
        line.push_str(" PRIMARY KEY");
    }
    if let Some(fk) = column.foreign_key() {
        let (target, target_column) = resolve(database, table, column, fk)?;
        line.push_str(&format!(
            " REFERENCES {}({})",
            sql_identifier(target.name()),
            sql_identifier(target_column.name())
        ));
    }
    Ok(line)
}
