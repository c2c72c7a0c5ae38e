use crate::catalog::{Database, Table};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

pub type OrderResult<T> = Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no dependency order for tables {}", stuck.join(", "))]
    Unsatisfiable { stuck: Vec<String> },
}

/// Orders the tables of `database` so that every table comes after the
/// tables its foreign keys reference.
///
/// Tables are placed in passes over the remaining tables, in database order.
/// A table is placed as soon as every table it references is placed; a
/// reference to the table itself never blocks it. A pass that places nothing
/// means a cycle or a reference to a missing table.
pub fn dependency_order(database: &Database) -> OrderResult<Vec<&Table>> {
    let mut placed: HashSet<&str> = HashSet::with_capacity(database.len());
    let mut ordered: Vec<&Table> = Vec::with_capacity(database.len());
    let mut remaining: Vec<&Table> = database.tables().collect();

    let mut pass = 0;
    while !remaining.is_empty() {
        pass += 1;
        let before = remaining.len();
        let mut blocked = Vec::with_capacity(before);
        for table in remaining {
            if is_eligible(table, &placed) {
                placed.insert(table.key());
                ordered.push(table);
            } else {
                blocked.push(table);
            }
        }
        debug!(
            pass,
            placed = before - blocked.len(),
            remaining = blocked.len(),
            "ordering pass"
        );

        if blocked.len() == before {
            return Err(Error::Unsatisfiable {
                stuck: blocked.iter().map(|table| table.key().to_string()).collect(),
            });
        }
        remaining = blocked;
    }
    Ok(ordered)
}

fn is_eligible(table: &Table, placed: &HashSet<&str>) -> bool {
    table
        .foreign_tables()
        .all(|key| key == table.key() || placed.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Column, DataType};

    /// Builds a database of `(key, references)` tables, each with an `id`
    /// primary key and one foreign-key column per reference.
    fn database(tables: &[(&str, &[&str])]) -> Database {
        let mut database = Database::new();
        for (key, references) in tables {
            let mut columns = vec![Column::new("id", "id", DataType::Integer).with_primary(true)];
            columns.extend(
                references
                    .iter()
                    .enumerate()
                    .map(|(i, _)| Column::new(format!("fk{i}"), format!("fk{i}"), DataType::Integer)),
            );
            database
                .add_table(Table::with_columns(*key, *key, columns).unwrap())
                .unwrap();
        }
        for (key, references) in tables {
            for (i, target) in references.iter().enumerate() {
                database
                    .add_relation(target, key, "id", &format!("fk{i}"))
                    .unwrap();
            }
        }
        database
    }

    fn keys<'a>(tables: &[&'a Table]) -> Vec<&'a str> {
        tables.iter().map(|table| table.key()).collect()
    }

    fn assert_dependencies_first(database: &Database, order: &[&Table]) {
        assert_eq!(order.len(), database.len());
        let position = |key: &str| order.iter().position(|table| table.key() == key);
        for table in database.tables() {
            let at = position(table.key()).unwrap();
            assert_eq!(
                order.iter().filter(|other| other.key() == table.key()).count(),
                1
            );
            for target in table.foreign_tables().filter(|key| *key != table.key()) {
                assert!(position(target).unwrap() < at, "{target} after {}", table.key());
            }
        }
    }

    #[test]
    fn empty() {
        assert_eq!(dependency_order(&Database::new()), Ok(vec![]));
    }

    #[test]
    fn author_book() {
        let database = database(&[("Book", &["Author"]), ("Author", &[])]);
        let order = dependency_order(&database).unwrap();
        assert_eq!(keys(&order), vec!["Author", "Book"]);
    }

    #[test]
    fn independent_tables_keep_database_order() {
        let database = database(&[("c", &[]), ("a", &[]), ("b", &[])]);
        let order = dependency_order(&database).unwrap();
        assert_eq!(keys(&order), vec!["c", "a", "b"]);
    }

    #[test]
    fn placed_within_same_pass() {
        // b sees a placed earlier in the first scan; c needs a second pass
        let database = database(&[("c", &["b"]), ("a", &[]), ("b", &["a"])]);
        let order = dependency_order(&database).unwrap();
        assert_eq!(keys(&order), vec!["a", "b", "c"]);
    }

    #[test]
    fn diamond() {
        let database = database(&[
            ("order_line", &["order", "product"]),
            ("order", &["customer"]),
            ("product", &["supplier", "category"]),
            ("customer", &["country"]),
            ("supplier", &["country"]),
            ("category", &[]),
            ("country", &[]),
            ("review", &["product", "customer", "product"]),
        ]);
        let order = dependency_order(&database).unwrap();
        assert_dependencies_first(&database, &order);
    }

    #[test]
    fn deterministic() {
        let database = database(&[
            ("d", &["b", "c"]),
            ("c", &["a"]),
            ("b", &["a"]),
            ("a", &[]),
        ]);
        let first = keys(&dependency_order(&database).unwrap());
        let second = keys(&dependency_order(&database).unwrap());
        assert_eq!(first, vec!["a", "c", "b", "d"]);
        assert_eq!(first, second);
    }

    #[test]
    fn self_reference_is_satisfied() {
        let database = database(&[("employee", &["employee", "department"]), ("department", &[])]);
        let order = dependency_order(&database).unwrap();
        assert_eq!(keys(&order), vec!["department", "employee"]);
    }

    #[test]
    fn cycle() {
        let database = database(&[("a", &["b"]), ("b", &["a"]), ("c", &[])]);
        assert_eq!(
            dependency_order(&database),
            Err(Error::Unsatisfiable {
                stuck: vec!["a".to_string(), "b".to_string()]
            })
        );
    }

    #[test]
    fn cycle_message() {
        let database = database(&[("a", &["b"]), ("b", &["a"])]);
        let err = dependency_order(&database).unwrap_err();
        assert_eq!(err.to_string(), "no dependency order for tables a, b");
    }

    #[test]
    fn missing_target() {
        let mut database = database(&[("book", &["author"]), ("author", &[]), ("shelf", &[])]);
        database.drop_table("author");
        assert_eq!(
            dependency_order(&database),
            Err(Error::Unsatisfiable {
                stuck: vec!["book".to_string()]
            })
        );
    }
}
