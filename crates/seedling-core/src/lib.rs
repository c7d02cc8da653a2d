//! Core contracts and validation for Seedling schema descriptions.
//!
//! A schema description is a JSON document declaring tables, columns,
//! generators, foreign keys and the order in which tables are populated.
//! [`parse_schema`] and [`load_schema`] decode such a document and run the
//! full validation pipeline; a [`Schema`] is only ever returned once every
//! check has passed.

pub mod constraints;
pub mod error;
pub mod graph;
pub mod options;
pub mod parse;
pub mod schema;
pub mod summary;
pub mod types;
mod validation;

pub use constraints::{ForeignKey, ReferentialAction};
pub use error::{
    ActionKind, DataTypeError, DecodeClass, ErrorKind, Location, NameKind, Result, SchemaError,
};
pub use graph::{DependencyReport, DependencySummary, build_dependency_report};
pub use options::{OrderCheck, ParseOptions};
pub use parse::{
    load_schema, load_schema_with, parse_schema, parse_schema_str, parse_schema_with,
    schema_json_schema,
};
pub use schema::{Column, Index, Metadata, Relationship, Schema, Table, ValidationRule};
pub use summary::{SchemaSummary, summarize};
pub use types::{DatabaseType, TypeFamily, type_family};

/// Current schema description format version.
pub const SCHEMA_VERSION: &str = "1.0";
