use std::fmt;
use std::io;
use std::path::PathBuf;

use serde_json::error::Category;
use thiserror::Error;

/// Position of a validation failure inside a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The schema root.
    Schema,
    /// A table, by declaration index and name.
    Table { index: usize, name: String },
    /// A column, by table and column declaration index and name.
    Column {
        table_index: usize,
        table: String,
        index: usize,
        name: String,
    },
}

impl Location {
    pub(crate) fn table(index: usize, name: &str) -> Self {
        Location::Table {
            index,
            name: name.to_string(),
        }
    }

    pub(crate) fn column(table_index: usize, table: &str, index: usize, name: &str) -> Self {
        Location::Column {
            table_index,
            table: table.to_string(),
            index,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Schema => write!(f, "schema"),
            Location::Table { index, name } => write_indexed(f, "table", *index, name),
            Location::Column {
                table_index,
                table,
                index,
                name,
            } => {
                write_indexed(f, "table", *table_index, table)?;
                write!(f, " ")?;
                write_indexed(f, "column", *index, name)
            }
        }
    }
}

fn write_indexed(f: &mut fmt::Formatter<'_>, label: &str, index: usize, name: &str) -> fmt::Result {
    if name.is_empty() {
        write!(f, "{label}[{index}]")
    } else {
        write!(f, "{label}[{index}] '{name}'")
    }
}

/// Failure class reported for undecodable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeClass {
    /// The underlying reader failed.
    Io,
    /// The input is not well-formed JSON.
    Syntax,
    /// Well-formed JSON that does not match the schema shape (wrong type, unknown field).
    Data,
    /// The input ended early, including empty input.
    Eof,
}

impl From<Category> for DecodeClass {
    fn from(value: Category) -> Self {
        match value {
            Category::Io => DecodeClass::Io,
            Category::Syntax => DecodeClass::Syntax,
            Category::Data => DecodeClass::Data,
            Category::Eof => DecodeClass::Eof,
        }
    }
}

impl fmt::Display for DecodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecodeClass::Io => "io",
            DecodeClass::Syntax => "syntax",
            DecodeClass::Data => "data",
            DecodeClass::Eof => "eof",
        };
        f.write_str(label)
    }
}

/// Entity whose name collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Table,
    Column,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Table => f.write_str("table"),
            NameKind::Column => f.write_str("column"),
        }
    }
}

/// Which referential action of a foreign key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OnDelete,
    OnUpdate,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::OnDelete => f.write_str("on_delete"),
            ActionKind::OnUpdate => f.write_str("on_update"),
        }
    }
}

/// Type registry rejection for a single column type string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataTypeError {
    #[error("type is required")]
    Required,
    #[error("unsupported data type '{0}'")]
    Unsupported(String),
}

/// Error kinds, for matching without destructuring a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Decode,
    MissingField,
    InvalidValue,
    InvalidDataType,
    DuplicateName,
    MissingPrimaryKey,
    MultiplePrimaryKeys,
    DanglingForeignKey,
    InvalidReferentialAction,
    DuplicateInOrder,
    DanglingOrderReference,
    IncompleteGenerationOrder,
    ForeignKeyCycle,
    OrderViolation,
}

/// Errors returned while loading, decoding or validating a schema description.
///
/// Every variant renders as `"<context>: <problem>"`.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{}: failed to read schema file: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("decode error ({class}): {source}")]
    Decode {
        class: DecodeClass,
        #[source]
        source: serde_json::Error,
    },
    #[error("{location}: missing required field '{field}'")]
    MissingField {
        location: Location,
        field: &'static str,
    },
    #[error("{location}: invalid value for '{field}': {value}")]
    InvalidValue {
        location: Location,
        field: &'static str,
        value: String,
    },
    #[error("{location}: invalid data type: {source}")]
    InvalidDataType {
        location: Location,
        #[source]
        source: DataTypeError,
    },
    #[error("{location}: duplicate {kind} name '{name}'")]
    DuplicateName {
        location: Location,
        kind: NameKind,
        name: String,
    },
    #[error("{location}: missing primary key, exactly one column must set primary_key")]
    MissingPrimaryKey { location: Location },
    #[error("{location}: multiple primary keys, expected 1 but found {found}")]
    MultiplePrimaryKeys { location: Location, found: usize },
    #[error("{location}: foreign key references unknown table '{target}'")]
    DanglingForeignKey { location: Location, target: String },
    #[error(
        "{location}: invalid {kind} action '{value}', expected one of CASCADE, SET NULL, RESTRICT"
    )]
    InvalidReferentialAction {
        location: Location,
        kind: ActionKind,
        value: String,
    },
    #[error("generation_order[{index}]: table '{name}' is listed more than once")]
    DuplicateInOrder { index: usize, name: String },
    #[error("generation_order[{index}]: unknown table '{name}'")]
    DanglingOrderReference { index: usize, name: String },
    #[error("generation_order: table '{name}' is missing")]
    IncompleteGenerationOrder { name: String },
    #[error("generation_order: foreign keys form a cycle between {}", .tables.join(", "))]
    ForeignKeyCycle { tables: Vec<String> },
    #[error(
        "generation_order: table '{table}' is generated before '{depends_on}', which it references through column '{column}'"
    )]
    OrderViolation {
        table: String,
        column: String,
        depends_on: String,
    },
}

impl SchemaError {
    pub(crate) fn decode(source: serde_json::Error) -> Self {
        SchemaError::Decode {
            class: source.classify().into(),
            source,
        }
    }

    /// Kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchemaError::Io { .. } => ErrorKind::Io,
            SchemaError::Decode { .. } => ErrorKind::Decode,
            SchemaError::MissingField { .. } => ErrorKind::MissingField,
            SchemaError::InvalidValue { .. } => ErrorKind::InvalidValue,
            SchemaError::InvalidDataType { .. } => ErrorKind::InvalidDataType,
            SchemaError::DuplicateName { .. } => ErrorKind::DuplicateName,
            SchemaError::MissingPrimaryKey { .. } => ErrorKind::MissingPrimaryKey,
            SchemaError::MultiplePrimaryKeys { .. } => ErrorKind::MultiplePrimaryKeys,
            SchemaError::DanglingForeignKey { .. } => ErrorKind::DanglingForeignKey,
            SchemaError::InvalidReferentialAction { .. } => ErrorKind::InvalidReferentialAction,
            SchemaError::DuplicateInOrder { .. } => ErrorKind::DuplicateInOrder,
            SchemaError::DanglingOrderReference { .. } => ErrorKind::DanglingOrderReference,
            SchemaError::IncompleteGenerationOrder { .. } => ErrorKind::IncompleteGenerationOrder,
            SchemaError::ForeignKeyCycle { .. } => ErrorKind::ForeignKeyCycle,
            SchemaError::OrderViolation { .. } => ErrorKind::OrderViolation,
        }
    }
}

/// Convenience alias for results returned by Seedling crates.
pub type Result<T> = std::result::Result<T, SchemaError>;
