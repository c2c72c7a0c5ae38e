use thiserror::Error;

pub type CatalogResult<T> = Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("{0}: {1} duplicated")]
    Duplicated(&'static str, String),
    #[error("{0}: {1} not found")]
    NotFound(&'static str, String),
    #[error("table {table}: primary key already held by column {existing}, can't add {column}")]
    CompositePrimaryKey {
        table: String,
        existing: String,
        column: String,
    },
    #[error("column {table}.{column} already references {target}")]
    ForeignKeyExists {
        table: String,
        column: String,
        target: String,
    },
}
