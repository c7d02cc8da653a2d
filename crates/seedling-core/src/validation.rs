use std::collections::{HashMap, HashSet};

use crate::SCHEMA_VERSION;
use crate::constraints::ReferentialAction;
use crate::error::{ActionKind, Location, NameKind, Result, SchemaError};
use crate::graph::build_dependency_report;
use crate::options::{OrderCheck, ParseOptions};
use crate::schema::{Column, Schema, Table};
use crate::types::{DatabaseType, validate_data_type};

/// Names of the declared tables, in declaration order.
struct TableNames<'a> {
    ordered: Vec<&'a str>,
    set: HashSet<&'a str>,
}

impl<'a> TableNames<'a> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            ordered: Vec::with_capacity(capacity),
            set: HashSet::with_capacity(capacity),
        }
    }

    /// Returns false when the name was already present.
    fn insert(&mut self, name: &'a str) -> bool {
        if !self.set.insert(name) {
            return false;
        }
        self.ordered.push(name);
        true
    }

    fn contains(&self, name: &str) -> bool {
        self.set.contains(name)
    }
}

/// Validate a decoded schema, stopping at the first violation.
///
/// Gates run in order: schema fields, each table (with its columns and
/// name uniqueness), foreign keys, then generation order.
pub(crate) fn validate_schema(schema: &Schema, options: &ParseOptions) -> Result<()> {
    if schema.name.is_empty() {
        return Err(SchemaError::MissingField {
            location: Location::Schema,
            field: "name",
        });
    }

    if schema.database_type.is_empty() {
        return Err(SchemaError::InvalidValue {
            location: Location::Schema,
            field: "database_type",
            value: "[]".to_string(),
        });
    }
    if let Some(value) = schema
        .database_type
        .iter()
        .find(|value| DatabaseType::parse(value).is_none())
    {
        return Err(SchemaError::InvalidValue {
            location: Location::Schema,
            field: "database_type",
            value: value.clone(),
        });
    }

    let Some(tables) = schema.tables.as_deref() else {
        return Err(SchemaError::MissingField {
            location: Location::Schema,
            field: "tables",
        });
    };
    let Some(order) = schema.generation_order.as_deref() else {
        return Err(SchemaError::MissingField {
            location: Location::Schema,
            field: "generation_order",
        });
    };

    if let Some(version) = schema.schema_version.as_deref()
        && version != SCHEMA_VERSION
    {
        tracing::warn!(
            event = "schema_version_mismatch",
            schema = %schema.name,
            declared = %version,
            supported = SCHEMA_VERSION
        );
    }

    let mut table_names = TableNames::with_capacity(tables.len());
    for (index, table) in tables.iter().enumerate() {
        validate_table(table, index)?;
        if !table_names.insert(&table.name) {
            return Err(SchemaError::DuplicateName {
                location: Location::table(index, &table.name),
                kind: NameKind::Table,
                name: table.name.clone(),
            });
        }
    }
    tracing::debug!(event = "tables_validated", schema = %schema.name, tables = tables.len());

    validate_foreign_keys(tables, &table_names)?;
    validate_generation_order(order, &table_names)?;

    if options.order_check == OrderCheck::Dependencies {
        validate_dependency_order(schema, order)?;
    }

    Ok(())
}

fn validate_table(table: &Table, index: usize) -> Result<()> {
    let location = || Location::table(index, &table.name);

    if table.name.is_empty() {
        return Err(SchemaError::MissingField {
            location: location(),
            field: "name",
        });
    }

    if table.record_count <= 0 {
        return Err(SchemaError::InvalidValue {
            location: location(),
            field: "record_count",
            value: table.record_count.to_string(),
        });
    }

    // An empty column list reports the missing primary key, not the empty list.
    match table.columns.iter().filter(|column| column.primary_key).count() {
        0 => {
            return Err(SchemaError::MissingPrimaryKey {
                location: location(),
            });
        }
        1 => {}
        found => {
            return Err(SchemaError::MultiplePrimaryKeys {
                location: location(),
                found,
            });
        }
    }

    if table.columns.is_empty() {
        return Err(SchemaError::MissingField {
            location: location(),
            field: "columns",
        });
    }

    let mut column_names = HashSet::with_capacity(table.columns.len());
    for (column_index, column) in table.columns.iter().enumerate() {
        if !column_names.insert(column.name.as_str()) {
            return Err(SchemaError::DuplicateName {
                location: Location::column(index, &table.name, column_index, &column.name),
                kind: NameKind::Column,
                name: column.name.clone(),
            });
        }
        validate_column(column, index, &table.name, column_index)?;
    }

    Ok(())
}

fn validate_column(
    column: &Column,
    table_index: usize,
    table_name: &str,
    column_index: usize,
) -> Result<()> {
    let location = || Location::column(table_index, table_name, column_index, &column.name);

    if column.name.is_empty() {
        return Err(SchemaError::MissingField {
            location: location(),
            field: "name",
        });
    }

    validate_data_type(&column.data_type).map_err(|source| SchemaError::InvalidDataType {
        location: location(),
        source,
    })?;

    Ok(())
}

fn validate_foreign_keys(tables: &[Table], table_names: &TableNames<'_>) -> Result<()> {
    for (table_index, table) in tables.iter().enumerate() {
        for (column_index, column) in table.columns.iter().enumerate() {
            let Some(fk) = &column.foreign_key else {
                continue;
            };
            let location =
                || Location::column(table_index, &table.name, column_index, &column.name);

            if !table_names.contains(&fk.table) {
                return Err(SchemaError::DanglingForeignKey {
                    location: location(),
                    target: fk.table.clone(),
                });
            }

            for (kind, value) in [
                (ActionKind::OnDelete, &fk.on_delete),
                (ActionKind::OnUpdate, &fk.on_update),
            ] {
                if ReferentialAction::parse(value).is_none() {
                    return Err(SchemaError::InvalidReferentialAction {
                        location: location(),
                        kind,
                        value: value.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

fn validate_generation_order(order: &[String], table_names: &TableNames<'_>) -> Result<()> {
    if order.is_empty()
        && let Some(first) = table_names.ordered.first()
    {
        return Err(SchemaError::IncompleteGenerationOrder {
            name: first.to_string(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(order.len());
    for (index, name) in order.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            return Err(SchemaError::DuplicateInOrder {
                index,
                name: name.clone(),
            });
        }
        if !table_names.contains(name) {
            return Err(SchemaError::DanglingOrderReference {
                index,
                name: name.clone(),
            });
        }
    }

    if let Some(missing) = table_names
        .ordered
        .iter()
        .find(|name| !seen.contains(**name))
    {
        return Err(SchemaError::IncompleteGenerationOrder {
            name: missing.to_string(),
        });
    }

    Ok(())
}

/// Require foreign-key targets to be generated before the tables referencing them.
fn validate_dependency_order(schema: &Schema, order: &[String]) -> Result<()> {
    let report = build_dependency_report(schema);
    if let Some(tables) = report.cycle {
        return Err(SchemaError::ForeignKeyCycle { tables });
    }

    let positions: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(position, name)| (name.as_str(), position))
        .collect();

    for (position, name) in order.iter().enumerate() {
        let Some(table) = schema.table(name) else {
            continue;
        };
        for (column, fk) in table.foreign_keys() {
            if fk.table == table.name {
                continue;
            }
            let parent_position = positions.get(fk.table.as_str()).copied();
            if parent_position.is_none_or(|parent| parent > position) {
                return Err(SchemaError::OrderViolation {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    depends_on: fk.table.clone(),
                });
            }
        }
    }

    Ok(())
}
