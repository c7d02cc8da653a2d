use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// Summary of FK graph structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Report for FK dependency ordering between tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    pub summary: DependencySummary,
    /// Parents-first table order, ties broken by name. `None` on a cycle.
    pub topo_order: Option<Vec<String>>,
    /// Tables that take part in a cycle, sorted by name.
    pub cycle: Option<Vec<String>>,
}

/// Build a deterministic FK dependency report for a schema.
///
/// Self-referencing foreign keys do not create edges.
pub fn build_dependency_report(schema: &Schema) -> DependencyReport {
    let graph = build_adjacency(schema);
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();
    let summary = DependencySummary { nodes, edges };

    match toposort(&graph) {
        Ok(order) => DependencyReport {
            summary,
            topo_order: Some(order),
            cycle: None,
        },
        Err(remaining) => DependencyReport {
            summary,
            topo_order: None,
            cycle: Some(prune_to_cycles(&graph, remaining)),
        },
    }
}

/// Edges point from the referenced table to the table holding the foreign key.
fn build_adjacency(schema: &Schema) -> BTreeMap<String, BTreeSet<String>> {
    let mut graph: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for table in schema.tables() {
        graph.entry(table.name.clone()).or_default();

        for (_, fk) in table.foreign_keys() {
            if fk.table == table.name {
                continue;
            }
            graph
                .entry(fk.table.clone())
                .or_default()
                .insert(table.name.clone());
        }
    }

    graph
}

fn toposort(graph: &BTreeMap<String, BTreeSet<String>>) -> Result<Vec<String>, BTreeSet<String>> {
    let mut indegree: BTreeMap<&str, usize> =
        graph.keys().map(|node| (node.as_str(), 0)).collect();

    for targets in graph.values() {
        for target in targets {
            *indegree.entry(target.as_str()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<&str> = indegree
        .iter()
        .filter_map(|(node, count)| if *count == 0 { Some(*node) } else { None })
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        order.push(node.to_string());

        if let Some(targets) = graph.get(node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target.as_str()) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(target.as_str());
                    }
                }
            }
        }
    }

    if order.len() == indegree.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter_map(|(node, count)| if count > 0 { Some(node.to_string()) } else { None })
            .collect())
    }
}

/// Drop tables that merely depend on a cycle, keeping the ones on it.
fn prune_to_cycles(
    graph: &BTreeMap<String, BTreeSet<String>>,
    mut remaining: BTreeSet<String>,
) -> Vec<String> {
    loop {
        let sinks: Vec<String> = remaining
            .iter()
            .filter(|node| {
                graph
                    .get(*node)
                    .map(|targets| targets.iter().all(|target| !remaining.contains(target)))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        if sinks.is_empty() {
            break;
        }
        for sink in sinks {
            remaining.remove(&sink);
        }
    }

    remaining.into_iter().collect()
}
