use std::io::Write;

use serde::Serialize;

use crate::io::error::Error;
use crate::model::graph::{CombinedGraph, FeatureMatrix};
use crate::pipeline::BatchReport;

/// Serialized layout of one combined graph.
///
/// `x` and `edge_attr` are lists of feature rows; `edge_index` is the
/// coordinate layout `[[sources...], [targets...]]`, two rows even when the
/// graph has no edges.
#[derive(Debug, Serialize)]
pub struct GraphRecord<'a> {
    pub row: usize,
    pub num_nodes: usize,
    pub n1: usize,
    pub n2: usize,
    pub score_index: usize,
    pub x: &'a FeatureMatrix,
    pub edge_index: [Vec<usize>; 2],
    pub edge_attr: &'a FeatureMatrix,
}

impl<'a> GraphRecord<'a> {
    pub fn new(row: usize, graph: &'a CombinedGraph) -> Self {
        Self {
            row,
            num_nodes: graph.node_count(),
            n1: graph.n1,
            n2: graph.n2,
            score_index: graph.score_index,
            x: &graph.nodes,
            edge_index: graph.edge_index_coo(),
            edge_attr: &graph.edge_features,
        }
    }
}

/// Writes one graph as a single-line JSON object, without a trailing newline.
pub fn write_graph<W: Write>(mut writer: W, row: usize, graph: &CombinedGraph) -> Result<(), Error> {
    serde_json::to_writer(&mut writer, &GraphRecord::new(row, graph))?;
    Ok(())
}

/// Writes every successful graph of `report` as JSON Lines, in row order.
pub fn write_report_jsonl<W: Write>(mut writer: W, report: &BatchReport) -> Result<(), Error> {
    for (row, graph) in &report.successes {
        write_graph(&mut writer, *row, graph)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes every successful graph of `report` as one JSON array, in row
/// order.
pub fn write_report_json<W: Write>(mut writer: W, report: &BatchReport) -> Result<(), Error> {
    write!(writer, "[")?;
    for (idx, (row, graph)) in report.successes.iter().enumerate() {
        if idx > 0 {
            write!(writer, ",")?;
        }
        writeln!(writer)?;
        write_graph(&mut writer, *row, graph)?;
    }
    writeln!(writer, "\n]")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featurize::{build_molecule_graph, fuse};
    use crate::io::smiles;
    use serde_json::{Value, json};

    fn make_combined(a: &str, b: &str) -> CombinedGraph {
        let g1 = build_molecule_graph(&smiles::read(a).unwrap()).unwrap();
        let g2 = build_molecule_graph(&smiles::read(b).unwrap()).unwrap();
        fuse(&g1, &g2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    fn make_report() -> BatchReport {
        let mut report = BatchReport::default();
        report.successes.push((0, make_combined("C", "C")));
        report.successes.push((2, make_combined("CO", "N")));
        report
    }

    #[test]
    fn graph_record_layout() {
        let graph = make_combined("C", "C");
        let mut buf = Vec::new();
        write_graph(&mut buf, 7, &graph).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(
            value,
            json!({
                "row": 7,
                "num_nodes": 3,
                "n1": 1,
                "n2": 1,
                "score_index": 2,
                "x": [
                    [6.0, 0.0, 4.0, 0.0, 0.0, 0.0],
                    [6.0, 0.0, 4.0, 0.0, 0.0, 0.0],
                    [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
                ],
                "edge_index": [[0, 2, 1, 2], [2, 0, 2, 1]],
                "edge_attr": [[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]
            })
        );
    }

    #[test]
    fn jsonl_has_one_graph_per_line() {
        let mut buf = Vec::new();
        write_report_jsonl(&mut buf, &make_report()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let rows: Vec<u64> = text
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).unwrap()["row"].as_u64().unwrap())
            .collect();
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn json_array_parses_back() {
        let mut buf = Vec::new();
        write_report_json(&mut buf, &make_report()).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();

        let graphs = value.as_array().unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[1]["num_nodes"], 4);
        assert_eq!(graphs[1]["edge_index"][0].as_array().unwrap().len(), 8);
    }

    #[test]
    fn empty_report_writes_empty_array() {
        let mut buf = Vec::new();
        write_report_json(&mut buf, &BatchReport::default()).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value, json!([]));

        let mut lines = Vec::new();
        write_report_jsonl(&mut lines, &BatchReport::default()).unwrap();
        assert!(lines.is_empty());
    }
}
