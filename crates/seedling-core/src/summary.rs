use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::build_dependency_report;
use crate::schema::Schema;

/// Top-level summary of a validated schema description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub name: String,
    pub version: Option<String>,
    pub database_types: Vec<String>,
    pub counts: SchemaCounts,
    pub fk_graph: FkGraphMetrics,
    /// Number of columns using each generator, keyed by generator name.
    pub generators: BTreeMap<String, usize>,
}

/// Count summary for schema objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCounts {
    pub tables: usize,
    pub columns: usize,
    pub foreign_keys: usize,
    pub indexes: usize,
    pub relationships: usize,
    pub validation_rules: usize,
    /// Sum of `record_count` over all tables.
    pub records: u64,
    pub auto_increment_keys: usize,
    pub columns_without_generator: usize,
}

/// FK graph metrics for the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FkGraphMetrics {
    pub edges: usize,
    pub has_cycle: bool,
    pub topo_order: Option<Vec<String>>,
}

/// Collect counts and generator usage for a schema.
pub fn summarize(schema: &Schema) -> SchemaSummary {
    let mut counts = SchemaCounts {
        relationships: schema.relationships.len(),
        validation_rules: schema.validation_rules.len(),
        ..SchemaCounts::default()
    };
    let mut generators: BTreeMap<String, usize> = BTreeMap::new();

    for table in schema.tables() {
        counts.tables += 1;
        counts.columns += table.columns.len();
        counts.indexes += table.indexes.len();
        let records = u64::try_from(table.record_count).unwrap_or(0);
        counts.records = counts.records.saturating_add(records);

        for column in &table.columns {
            if column.foreign_key.is_some() {
                counts.foreign_keys += 1;
            }
            if column.primary_key && column.auto_increment {
                counts.auto_increment_keys += 1;
            }
            match &column.generator {
                Some(generator) => *generators.entry(generator.clone()).or_insert(0) += 1,
                None => counts.columns_without_generator += 1,
            }
        }
    }

    let graph_report = build_dependency_report(schema);
    let fk_graph = FkGraphMetrics {
        edges: graph_report.summary.edges,
        has_cycle: graph_report.cycle.is_some(),
        topo_order: graph_report.topo_order,
    };

    SchemaSummary {
        name: schema.name.clone(),
        version: schema.version.clone(),
        database_types: schema.database_type.clone(),
        counts,
        fk_graph,
        generators,
    }
}
