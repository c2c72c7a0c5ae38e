//! Text generators driven by a loaded [`Database`] and its dependency order.
//!
//! Generators are pure: they never touch the file system and never mutate the
//! schema. Output carries no timestamp, so the same schema always renders to
//! the same bytes.

use crate::catalog::{Column, Database, ForeignKey, Table};
use std::fmt::Formatter;
use thiserror::Error;

mod python;
mod sqlite;

pub use python::PythonAccessors;
pub use sqlite::SqliteScript;

pub const TOOL_NAME: &str = "archsql";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type CodegenResult<T> = Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("column {table}.{column} references missing {target}")]
    DanglingReference {
        table: String,
        column: String,
        target: String,
    },
}

pub trait Codegen {
    /// Line comment marker of the target language.
    fn comment(&self) -> &'static str;

    /// Renders `tables`, already in dependency order, into a complete file.
    fn generate(&self, database: &Database, tables: &[&Table]) -> CodegenResult<String>;

    fn header(&self) -> String {
        format!("{} Generated by {} v{}", self.comment(), TOOL_NAME, VERSION)
    }
}

/// Action taken by `INSERT OR <policy>` when a constraint would be violated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    Rollback,
    Abort,
    #[default]
    Fail,
    Ignore,
    Replace,
}

impl ConflictPolicy {
    pub const ALL: [ConflictPolicy; 5] = [
        ConflictPolicy::Rollback,
        ConflictPolicy::Abort,
        ConflictPolicy::Fail,
        ConflictPolicy::Ignore,
        ConflictPolicy::Replace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Rollback => "ROLLBACK",
            ConflictPolicy::Abort => "ABORT",
            ConflictPolicy::Fail => "FAIL",
            ConflictPolicy::Ignore => "IGNORE",
            ConflictPolicy::Replace => "REPLACE",
        }
    }
}

impl std::fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column order of generated insert statements: primary key first, then the
/// other columns in table order.
pub(crate) fn insert_columns(table: &Table) -> Vec<&Column> {
    let primary = table.primary_key();
    primary
        .into_iter()
        .chain(table.columns().filter(|column| !column.is_primary_key()))
        .collect()
}

/// SQLite keywords, upper-cased and sorted.
const SQL_KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Table or column name as written in SQL: plain names stay bare, anything
/// else (spaces, keywords, leading digit) is double-quoted.
pub(crate) fn sql_identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && SQL_KEYWORDS
            .binary_search(&name.to_ascii_uppercase().as_str())
            .is_err();
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

pub(crate) fn resolve<'a>(
    database: &'a Database,
    table: &Table,
    column: &Column,
    foreign_key: &ForeignKey,
) -> CodegenResult<(&'a Table, &'a Column)> {
    database
        .resolve(foreign_key)
        .ok_or_else(|| Error::DanglingReference {
            table: table.name().to_string(),
            column: column.name().to_string(),
            target: format!("{}.{}", foreign_key.table(), foreign_key.column()),
        })
}
