use crate::catalog::Database;
use crate::codegen::{Codegen, PythonAccessors, SqliteScript};
use crate::config::Config;
use crate::error::{ArchSqlError, ArchSqlResult};
use crate::{loader, order};
use std::path::Path;
use tracing::{debug, info};

/// Rendered output of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub sql: String,
    pub accessors: String,
}

/// Orders the tables of `database` once and renders both files from that
/// order. `sql_script_reference` is the path the accessor module opens to
/// create the schema.
pub fn generate(database: &Database, sql_script_reference: &str) -> ArchSqlResult<Artifacts> {
    let tables = order::dependency_order(database)?;
    let names: Vec<&str> = tables.iter().map(|table| table.name()).collect();
    debug!(order = ?names, "dependency order");
    Ok(Artifacts {
        sql: SqliteScript.generate(database, &tables)?,
        accessors: PythonAccessors::new(sql_script_reference).generate(database, &tables)?,
    })
}

/// Loads `config.input`, renders both artifacts, then writes them. Nothing
/// is written unless loading and rendering both succeed.
pub fn run(config: &Config) -> ArchSqlResult<Artifacts> {
    let database = loader::load_file(&config.input)?;
    debug!("loaded schema\n{database}");

    let artifacts = generate(&database, &config.sql_script_reference)?;
    write(&config.sql_output, &artifacts.sql)?;
    write(&config.accessor_output, &artifacts.accessors)?;
    info!(
        sql = %config.sql_output.display(),
        accessors = %config.accessor_output.display(),
        tables = database.len(),
        "generated"
    );
    Ok(artifacts)
}

fn write(path: &Path, contents: &str) -> ArchSqlResult<()> {
    std::fs::write(path, contents).map_err(|source| ArchSqlError::Write {
        path: path.to_path_buf(),
        source,
    })
}
