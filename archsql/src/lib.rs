pub mod catalog;
pub mod codegen;
pub mod config;
pub mod error;
pub mod loader;
pub mod order;
mod pipeline;

pub use config::Config;
pub use error::{ArchSqlError, ArchSqlResult};
pub use pipeline::{generate, run, Artifacts};
