//! Reads the XML project files written by SQL Power Architect.
//!
//! Only the target database is read:
//!
//! ```text
//! architect-project/target-database/table[@id, @name]
//!     folder/column[@id, @name, @type, @nullable, @autoIncrement, @primaryKeySeq?]
//! architect-project/target-database/relationships/relationship[@pk-table-ref, @fk-table-ref]
//!     column-mapping[@pk-column-ref, @fk-column-ref]
//! ```

use crate::catalog::{Column, DataType, Database, Table};
use roxmltree::{Document, Node};
use std::path::Path;
use tracing::{debug, info};

mod error;

pub use error::{Error, LoaderResult};

const TABLE_PATH: &[&str] = &["target-database", "table"];
const COLUMN_PATH: &[&str] = &["folder", "column"];
const RELATIONSHIP_PATH: &[&str] = &["target-database", "relationships", "relationship"];
const COLUMN_MAPPING_PATH: &[&str] = &["column-mapping"];

pub fn load_file(path: impl AsRef<Path>) -> LoaderResult<Database> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading schema");
    let xml = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&xml)
}

pub fn load_str(xml: &str) -> LoaderResult<Database> {
    let document = Document::parse(xml)?;
    let root = document.root_element();
    let mut database = Database::new();

    for table_node in required(root, TABLE_PATH)? {
        let table = table(table_node)?;
        debug!(key = table.key(), name = table.name(), columns = table.len(), "table");
        database.add_table(table)?;
    }

    // a schema without any relationship is valid
    let relationships = select(root, RELATIONSHIP_PATH);
    for relationship in &relationships {
        relation(&mut database, *relationship)?;
    }

    info!(
        tables = database.len(),
        relationships = relationships.len(),
        "schema loaded"
    );
    Ok(database)
}

fn table(node: Node) -> LoaderResult<Table> {
    let mut table = Table::new(attribute(node, "id")?, attribute(node, "name")?);
    for column_node in required(node, COLUMN_PATH)? {
        table.add_column(column(column_node)?)?;
    }
    Ok(table)
}

fn column(node: Node) -> LoaderResult<Column> {
    let code = attribute(node, "type")?;
    let code = code
        .trim()
        .parse::<i32>()
        .map_err(|_| Error::AttributeWrongFormat {
            attribute: "type",
            node: describe(node),
            expected: "an integer type code",
            value: code.to_string(),
        })?;

    Ok(
        Column::new(attribute(node, "id")?, attribute(node, "name")?, DataType::from_code(code))
            .with_primary(node.has_attribute("primaryKeySeq"))
            .with_not_null(attribute(node, "nullable")? == "0")
            .with_autoincrement(attribute(node, "autoIncrement")? == "true"),
    )
}

fn relation(database: &mut Database, node: Node) -> LoaderResult<()> {
    let pk_table = attribute(node, "pk-table-ref")?;
    let fk_table = attribute(node, "fk-table-ref")?;
    for mapping in required(node, COLUMN_MAPPING_PATH)? {
        let pk_column = attribute(mapping, "pk-column-ref")?;
        let fk_column = attribute(mapping, "fk-column-ref")?;
        database.add_relation(pk_table, fk_table, pk_column, fk_column)?;
    }
    Ok(())
}

/// Element nodes reached from `node` by following `path`, in document order.
fn select<'a, 'input>(node: Node<'a, 'input>, path: &[&str]) -> Vec<Node<'a, 'input>> {
    let mut nodes = vec![node];
    for &name in path {
        nodes = nodes
            .into_iter()
            .flat_map(move |node| node.children().filter(move |child| child.has_tag_name(name)))
            .collect();
    }
    nodes
}

fn required<'a, 'input>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> LoaderResult<Vec<Node<'a, 'input>>> {
    let nodes = select(node, path);
    if nodes.is_empty() {
        return Err(Error::NodeNotFound(format!(
            "{}/{}",
            describe(node),
            path.join("/")
        )));
    }
    Ok(nodes)
}

fn attribute<'a>(node: Node<'a, '_>, name: &'static str) -> LoaderResult<&'a str> {
    node.attribute(name).ok_or_else(|| Error::AttributeNotFound {
        attribute: name,
        node: describe(node),
    })
}

fn describe(node: Node) -> String {
    let tag = node.tag_name().name();
    match node.attribute("id") {
        Some(id) => format!("{tag} id=\"{id}\""),
        None => tag.to_string(),
    }
}
