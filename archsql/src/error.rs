use crate::{catalog, codegen, loader, order};
use std::path::PathBuf;
use thiserror::Error;

pub type ArchSqlResult<T> = Result<T, ArchSqlError>;

#[derive(Error, Debug)]
pub enum ArchSqlError {
    #[error("[Load]: {0}")]
    Load(#[from] loader::Error),
    #[error("[Catalog]: {0}")]
    Catalog(#[from] catalog::error::Error),
    #[error("[Order]: {0}")]
    Order(#[from] order::Error),
    #[error("[Codegen]: {0}")]
    Codegen(#[from] codegen::Error),
    #[error("[IO]: can't write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
