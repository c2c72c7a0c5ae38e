use std::path::PathBuf;

pub const DEFAULT_SQL_PATH: &str = "script.sqlite";
pub const DEFAULT_ACCESSOR_PATH: &str = "architect.py";

/// Paths of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Power Architect project (`*.architect` / `*.xml`) to read.
    pub input: PathBuf,
    /// Where the SQL script is written.
    pub sql_output: PathBuf,
    /// Where the Python accessor module is written.
    pub accessor_output: PathBuf,
    /// Path of the SQL script as the accessor module should open it.
    /// Defaults to `sql_output`.
    pub sql_script_reference: String,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::with_outputs(input, DEFAULT_SQL_PATH, DEFAULT_ACCESSOR_PATH)
    }

    pub fn with_outputs(
        input: impl Into<PathBuf>,
        sql_output: impl Into<PathBuf>,
        accessor_output: impl Into<PathBuf>,
    ) -> Self {
        let sql_output = sql_output.into();
        Self {
            input: input.into(),
            sql_script_reference: sql_output.display().to_string(),
            sql_output,
            accessor_output: accessor_output.into(),
        }
    }

    pub fn with_sql_script_reference(mut self, reference: impl Into<String>) -> Self {
        self.sql_script_reference = reference.into();
        self
    }
}
