use crate::catalog::{Database, Table};
use crate::codegen::{insert_columns, sql_identifier, Codegen, CodegenResult, ConflictPolicy};
use crate::config::DEFAULT_SQL_PATH;
use std::collections::HashSet;

const REQUEST_BUILDER: &str = r#"

logger = logging.getLogger(__name__)


def insert_or_request(table: str, columns: List[str], policy: str = DEFAULT_POLICY) -> str:
    """Build an "INSERT OR <policy>" request with one placeholder per column."""
    if policy not in CONFLICT_POLICIES:
        raise ValueError(f"unknown conflict policy {policy!r}, expected one of {CONFLICT_POLICIES}")
    placeholders = ", ".join("?" * len(columns))
    return f"INSERT OR {policy} INTO {table} ({', '.join(columns)}) VALUES ({placeholders})"


class SchemaConnector:

    def __init__(self, filepath: str, erase_if_exists: bool = False, create: bool = True, **kwargs):
        if filepath != ":memory:" and erase_if_exists and os.path.isfile(filepath):
            os.remove(filepath)

        self.conn = sqlite3.connect(filepath, **kwargs)

        if create or erase_if_exists:
            with open(SQLITE_CREATION_SCRIPT, "r", encoding="utf-8") as fp:
                self.conn.executescript(fp.read())
        self.conn.execute("PRAGMA foreign_keys = ON;")
"#;

/// Python module with a `SchemaConnector` class holding two insert helpers
/// per table.
#[derive(Debug, Clone)]
pub struct PythonAccessors {
    /// Path of the SQL script the connector runs to create the schema.
    sql_script_path: String,
}

impl PythonAccessors {
    pub fn new(sql_script_path: impl Into<String>) -> Self {
        Self {
            sql_script_path: sql_script_path.into(),
        }
    }
}

impl Default for PythonAccessors {
    fn default() -> Self {
        Self::new(DEFAULT_SQL_PATH)
    }
}

/// Python keywords, plus the names the generated helper bodies rely on.
const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield", "self", "request", "logger", "insert_or_request", "DEFAULT_POLICY",
];

impl Codegen for PythonAccessors {
    fn comment(&self) -> &'static str {
        "#"
    }

    fn generate(&self, _database: &Database, tables: &[&Table]) -> CodegenResult<String> {
        let mut module = self.header();
        module.push_str("\nimport logging\nimport os\nimport sqlite3\n");
        module.push_str("from typing import Iterable, List, Sequence\n\n");

        let policies: Vec<_> = ConflictPolicy::ALL
            .iter()
            .map(|policy| string_literal(policy.as_str()))
            .collect();
        module.push_str(&format!(
            "SQLITE_CREATION_SCRIPT = {}\n",
            string_literal(&self.sql_script_path)
        ));
        module.push_str(&format!("CONFLICT_POLICIES = {}\n", tuple(&policies)));
        module.push_str(&format!(
            "DEFAULT_POLICY = {}",
            string_literal(ConflictPolicy::default().as_str())
        ));
        module.push_str(REQUEST_BUILDER);

        let mut methods = HashSet::new();
        for table in tables {
            let suffix = method_suffix(table.name(), &mut methods);
            module.push_str(&table_methods(table, &suffix));
        }
        Ok(module)
    }
}

/// Lower-cased identifier of `table_name`, numbered when `insert_<suffix>` or
/// `insert_many_<suffix>` is already taken by another table.
fn method_suffix(table_name: &str, methods: &mut HashSet<String>) -> String {
    let base = identifier(table_name).to_lowercase();
    let mut suffix = base.clone();
    let mut n = 1;
    while methods.contains(&format!("insert_{suffix}"))
        || methods.contains(&format!("insert_many_{suffix}"))
    {
        n += 1;
        suffix = format!("{base}_{n}");
    }
    methods.insert(format!("insert_{suffix}"));
    methods.insert(format!("insert_many_{suffix}"));
    suffix
}

fn table_methods(table: &Table, suffix: &str) -> String {
    let table_name = string_literal(&sql_identifier(table.name()));
    let columns = insert_columns(table);
    let column_list = format!(
        "[{}]",
        columns
            .iter()
            .map(|column| string_literal(&sql_identifier(column.name())))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let params = parameters(
        table
            .columns()
            .filter(|column| !column.is_primary_key())
            .map(|column| column.name()),
    );
    let mut values = params.clone();
    if table.primary_key().is_some() {
        values.insert(0, "None".to_string());
    }
    let row = docstring(&tuple(
        &columns
            .iter()
            .map(|column| column.name().to_string())
            .collect::<Vec<_>>(),
    ));
    let primary_key_note = match table.primary_key() {
        Some(pk) => format!(" Pass None as {} to get a new identity.", docstring(pk.name())),
        None => String::new(),
    };
    let signature = std::iter::once("self".to_string())
        .chain(params.iter().cloned())
        .collect::<Vec<_>>()
        .join(", ");
    let name = docstring(table.name());

    format!(
        r#"
    def insert_{suffix}({signature}):
        """Insert one row into {name}."""
        logger.debug("insert_{suffix}%r", {args})
        request = insert_or_request({table_name}, {column_list}, DEFAULT_POLICY)
        return self.conn.execute(request, {values})

    def insert_many_{suffix}(self, rows: Iterable[Sequence], policy: str = DEFAULT_POLICY):
        """Insert rows into {name}.

        Each row holds the values of {row}, in that order.{primary_key_note}
        """
        request = insert_or_request({table_name}, {column_list}, policy)
        return self.conn.executemany(request, rows)
"#,
        args = tuple(&params),
        values = tuple(&values),
    )
}

/// Parameter names for `columns`: valid, never reserved, and distinct.
fn parameters<'a>(columns: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    columns
        .map(|name| {
            let mut base = identifier(name);
            if RESERVED.contains(&base.as_str()) {
                base.push('_');
            }
            let mut param = base.clone();
            let mut n = 1;
            while !taken.insert(param.clone()) {
                n += 1;
                param = format!("{base}_{n}");
            }
            param
        })
        .collect()
}

/// Python tuple display; a single element keeps its trailing comma.
fn tuple(items: &[String]) -> String {
    match items {
        [single] => format!("({single},)"),
        _ => format!("({})", items.join(", ")),
    }
}

fn string_literal(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Text safe inside a `"""` docstring.
fn docstring(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Replaces every character Python does not accept in an identifier with `_`.
fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.chars().next().map_or(true, |c| c.is_numeric()) {
        ident.insert(0, '_');
    }
    ident
}
