//! Column data-type registry and supported database engines.
//!
//! Types are matched by case-insensitive prefix, so parameterized forms such
//! as `varchar(255)`, `decimal(10,2)` or `enum('a','b')` validate without a
//! type grammar. Anything starting with a known prefix is accepted, including
//! strings like `integer` or `interval` that happen to start with `int`.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::DataTypeError;

/// Recognized column type prefixes.
pub const TYPE_PREFIXES: &[&str] = &[
    "int",
    "bigint",
    "smallint",
    "tinyint",
    "decimal",
    "float",
    "double",
    "varchar",
    "text",
    "char",
    "date",
    "datetime",
    "timestamp",
    "boolean",
    "bit",
    "json",
    "jsonb",
    "enum",
];

/// Broad value category of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFamily {
    Integer,
    Decimal,
    String,
    Temporal,
    Boolean,
    Json,
    Enum,
}

impl TypeFamily {
    fn of_prefix(prefix: &str) -> Self {
        match prefix {
            "int" | "bigint" | "smallint" | "tinyint" => TypeFamily::Integer,
            "decimal" | "float" | "double" => TypeFamily::Decimal,
            "varchar" | "text" | "char" => TypeFamily::String,
            "date" | "datetime" | "timestamp" => TypeFamily::Temporal,
            "boolean" | "bit" => TypeFamily::Boolean,
            "json" | "jsonb" => TypeFamily::Json,
            _ => TypeFamily::Enum,
        }
    }
}

/// Check a column type against the registry.
///
/// Returns the longest matching registry prefix.
pub fn validate_data_type(data_type: &str) -> Result<&'static str, DataTypeError> {
    if data_type.is_empty() {
        return Err(DataTypeError::Required);
    }

    let lowered = data_type.to_lowercase();
    TYPE_PREFIXES
        .iter()
        .copied()
        .filter(|prefix| lowered.starts_with(prefix))
        .max_by_key(|prefix| prefix.len())
        .ok_or_else(|| DataTypeError::Unsupported(data_type.to_string()))
}

/// Classify a column type, or `None` when the registry does not know it.
pub fn type_family(data_type: &str) -> Option<TypeFamily> {
    validate_data_type(data_type)
        .ok()
        .map(TypeFamily::of_prefix)
}

/// Database engines a schema may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Mysql,
    Postgres,
}

impl DatabaseType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mysql" => Some(DatabaseType::Mysql),
            "postgres" => Some(DatabaseType::Postgres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::Mysql => "mysql",
            DatabaseType::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
