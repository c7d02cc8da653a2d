use std::io::{self, Write};

use seedling_core::{DependencyReport, SchemaSummary};

pub fn write_summary<W: Write>(out: &mut W, summary: &SchemaSummary) -> io::Result<()> {
    let version = summary.version.as_deref().unwrap_or("unversioned");
    writeln!(out, "schema '{}' ({version}) is valid", summary.name)?;
    writeln!(out, "  engines:       {}", summary.database_types.join(", "))?;

    let counts = &summary.counts;
    writeln!(out, "  tables:        {}", counts.tables)?;
    writeln!(
        out,
        "  columns:       {} ({} without generator)",
        counts.columns, counts.columns_without_generator
    )?;
    writeln!(out, "  foreign keys:  {}", counts.foreign_keys)?;
    writeln!(out, "  indexes:       {}", counts.indexes)?;
    writeln!(out, "  records:       {}", counts.records)?;
    if counts.validation_rules > 0 {
        writeln!(
            out,
            "  advisory rules: {} (not evaluated)",
            counts.validation_rules
        )?;
    }

    if !summary.generators.is_empty() {
        writeln!(out, "  generators:")?;
        for (generator, uses) in &summary.generators {
            writeln!(out, "    {generator}: {uses}")?;
        }
    }

    if summary.fk_graph.has_cycle {
        writeln!(out, "  warning: foreign keys form a cycle")?;
    }

    Ok(())
}

pub fn write_order<W: Write>(
    out: &mut W,
    declared: &[String],
    report: &DependencyReport,
) -> io::Result<()> {
    writeln!(out, "declared order: {}", declared.join(" -> "))?;

    match (&report.topo_order, &report.cycle) {
        (Some(order), _) => {
            writeln!(out, "fk order:       {}", order.join(" -> "))?;
            if order.as_slice() == declared {
                writeln!(out, "declared order matches foreign key dependencies")?;
            }
        }
        (None, Some(cycle)) => {
            writeln!(out, "fk cycle:       {}", cycle.join(", "))?;
        }
        (None, None) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use seedling_core::DependencySummary;
    use seedling_core::summary::{FkGraphMetrics, SchemaCounts};

    use super::*;

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).expect("write report");
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn summary_lists_counts_and_generators() {
        let summary = SchemaSummary {
            name: "shop".to_string(),
            version: Some("0.3.0".to_string()),
            database_types: vec!["mysql".to_string()],
            counts: SchemaCounts {
                tables: 2,
                columns: 5,
                records: 150,
                validation_rules: 1,
                columns_without_generator: 3,
                ..SchemaCounts::default()
            },
            fk_graph: FkGraphMetrics {
                edges: 1,
                has_cycle: false,
                topo_order: None,
            },
            generators: BTreeMap::from([("email".to_string(), 2)]),
        };

        let output = render(|out| write_summary(out, &summary));
        assert!(output.starts_with("schema 'shop' (0.3.0) is valid\n"));
        assert!(output.contains("records:       150"));
        assert!(output.contains("advisory rules: 1 (not evaluated)"));
        assert!(output.contains("    email: 2"));
    }

    #[test]
    fn order_reports_cycle() {
        let report = DependencyReport {
            summary: DependencySummary { nodes: 2, edges: 2 },
            topo_order: None,
            cycle: Some(vec!["a".to_string(), "b".to_string()]),
        };
        let declared = vec!["a".to_string(), "b".to_string()];

        let output = render(|out| write_order(out, &declared, &report));
        assert!(output.contains("declared order: a -> b"));
        assert!(output.contains("fk cycle:       a, b"));
    }
}
