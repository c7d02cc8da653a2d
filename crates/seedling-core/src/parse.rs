use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use schemars::schema::{RootSchema, Schema as SchemaNode, SchemaObject};
use schemars::schema_for;

use crate::error::{Result, SchemaError};
use crate::options::ParseOptions;
use crate::schema::Schema;
use crate::validation::validate_schema;

/// Decode and validate a schema description from a JSON stream.
pub fn parse_schema<R: Read>(reader: R) -> Result<Schema> {
    parse_schema_with(reader, &ParseOptions::default())
}

/// Decode and validate a schema description held in memory.
pub fn parse_schema_str(input: &str) -> Result<Schema> {
    parse_schema(input.as_bytes())
}

/// Decode a schema description from a JSON stream and validate it with `options`.
///
/// Unknown fields are rejected. The schema is returned only when every
/// validation gate passes.
pub fn parse_schema_with<R: Read>(reader: R, options: &ParseOptions) -> Result<Schema> {
    let schema: Schema = serde_json::from_reader(reader).map_err(SchemaError::decode)?;
    tracing::debug!(
        event = "schema_decoded",
        schema = %schema.name,
        tables = schema.tables().len()
    );

    validate_schema(&schema, options)?;

    if !schema.validation_rules.is_empty() {
        tracing::warn!(
            event = "validation_rules_skipped",
            schema = %schema.name,
            rules = schema.validation_rules.len()
        );
    }
    tracing::debug!(
        event = "schema_validated",
        schema = %schema.name,
        order_check = ?options.order_check
    );

    Ok(schema)
}

/// Load and validate a schema description file.
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Schema> {
    load_schema_with(path, &ParseOptions::default())
}

/// Load a schema description file and validate it with `options`.
pub fn load_schema_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Schema> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(event = "schema_file_opened", path = %path.display());

    parse_schema_with(BufReader::new(file), options)
}

/// Fields the validator requires even though they decode to defaults.
const ROOT_REQUIRED: &[&str] = &["name", "database_type", "tables", "generation_order"];
const DEFINITION_REQUIRED: &[(&str, &[&str])] = &[
    ("Table", &["name", "record_count", "columns"]),
    ("Column", &["name", "type"]),
    ("ForeignKey", &["table", "on_delete", "on_update"]),
];

/// Emit the JSON Schema for schema description documents.
pub fn schema_json_schema() -> RootSchema {
    let mut root = schema_for!(Schema);
    require_properties(&mut root.schema, ROOT_REQUIRED);
    for (definition, fields) in DEFINITION_REQUIRED {
        if let Some(SchemaNode::Object(object)) = root.definitions.get_mut(*definition) {
            require_properties(object, fields);
        }
    }
    root
}

fn require_properties(schema: &mut SchemaObject, fields: &[&str]) {
    let object = schema.object();
    for field in fields {
        object.required.insert((*field).to_string());
        if let Some(SchemaNode::Object(property)) = object.properties.get_mut(*field)
            && let Some(metadata) = property.metadata.as_mut()
        {
            metadata.default = None;
        }
    }
}
