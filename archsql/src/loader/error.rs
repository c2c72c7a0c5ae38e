use crate::catalog;
use std::path::PathBuf;
use thiserror::Error;

pub type LoaderResult<T> = Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("can't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("xml error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("no nodes found at '{0}'")]
    NodeNotFound(String),
    #[error("attribute '{attribute}' not found in <{node}>")]
    AttributeNotFound { attribute: &'static str, node: String },
    #[error("attribute '{attribute}' of <{node}> must be {expected}, got '{value}'")]
    AttributeWrongFormat {
        attribute: &'static str,
        node: String,
        expected: &'static str,
        value: String,
    },
    #[error("catalog error: {0}")]
    Catalog(#[from] catalog::error::Error),
}
