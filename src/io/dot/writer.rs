use std::collections::HashSet;
use std::io::Write;

use crate::io::error::Error;
use crate::model::graph::CombinedGraph;

/// Renders `graph` as an undirected Graphviz graph.
///
/// Each directed pair `(a, b)` / `(b, a)` becomes one edge labelled with its
/// feature row. Atoms are drawn inside one cluster per molecule and labelled
/// with their node index and atomic number (the first entry of their feature
/// row); the score node is drawn as a filled box.
pub fn write_graph<W: Write>(mut writer: W, graph: &CombinedGraph) -> Result<(), Error> {
    writeln!(writer, "graph combined {{")?;
    writeln!(writer, "  node [shape=circle, fontsize=10];")?;
    writeln!(writer, "  edge [fontsize=8];")?;

    for (cluster, label, range) in [
        ("first", "molecule 1", graph.first_atoms()),
        ("second", "molecule 2", graph.second_atoms()),
    ] {
        writeln!(writer, "  subgraph cluster_{} {{", cluster)?;
        writeln!(writer, "    label=\"{}\";", label)?;
        for idx in range {
            let z = graph
                .nodes
                .row(idx)
                .and_then(|row| row.first())
                .map_or(0, |&v| v as u32);
            writeln!(writer, "    {} [label=\"{}\\nZ={}\"];", idx, idx, z)?;
        }
        writeln!(writer, "  }}")?;
    }

    writeln!(
        writer,
        "  {} [label=\"score\\n{}\", shape=box, style=filled, fillcolor=lightgoldenrod];",
        graph.score_index,
        format_row(graph.score_row())
    )?;

    let mut drawn = HashSet::with_capacity(graph.edge_count() / 2);
    for (edge_idx, &[source, target]) in graph.edges.iter().enumerate() {
        let key = (source.min(target), source.max(target));
        if !drawn.insert(key) {
            continue;
        }
        let features = graph
            .edge_features
            .row(edge_idx)
            .map(format_row)
            .unwrap_or_default();
        let style = if graph.is_score_edge([source, target]) {
            ", style=dashed, color=gray"
        } else {
            ""
        };
        writeln!(
            writer,
            "  {} -- {} [label=\"{}\"{}];",
            key.0, key.1, features, style
        )?;
    }

    writeln!(writer, "}}")?;
    writer.flush()?;
    Ok(())
}

fn format_row(row: &[f32]) -> String {
    row.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
