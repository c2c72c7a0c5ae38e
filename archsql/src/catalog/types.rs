use std::fmt::Formatter;

/// Column storage class understood by the generated SQLite script.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Text,
    Integer,
    Blob,
    Real,
    Null,
}

impl DataType {
    /// Maps a `java.sql.Types` code, as written by the modeling tool, onto a
    /// storage class. Unknown codes fall back to [`DataType::Integer`].
    pub fn from_code(code: i32) -> Self {
        match code {
            // CHAR, VARCHAR, LONGVARCHAR, NVARCHAR, NCHAR, LONGNVARCHAR, CLOB, NCLOB
            1 | 12 | -1 | -9 | -15 | -16 | 2005 | 2011 => DataType::Text,
            // BINARY, VARBINARY, LONGVARBINARY, BLOB
            -2 | -3 | -4 | 2004 => DataType::Blob,
            // FLOAT, REAL, DOUBLE
            6 | 7 | 8 => DataType::Real,
            0 => DataType::Null,
            _ => DataType::Integer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "TEXT",
            DataType::Integer => "INTEGER",
            DataType::Blob => "BLOB",
            DataType::Real => "REAL",
            DataType::Null => "NULL",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
