use std::collections::BTreeMap;
use std::io::{self, Write};

use catalyst_graph::CombinedGraph;
use catalyst_graph::pipeline::{BatchReport, Error as PipelineError, PipelineConfig};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_FAILURE_ROWS: usize = 15;

pub fn print_dataset_info(
    source: &str,
    rows: usize,
    columns: usize,
    missing: &[&str],
    config: &PipelineConfig,
) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut table = vec![
        ("Source", source.to_string()),
        ("Data Rows", rows.to_string()),
        ("Columns", columns.to_string()),
        (
            "Structures",
            format!("{} / {}", config.columns.drug1, config.columns.drug2),
        ),
        ("Metrics", config.columns.metrics.join(", ")),
        ("Score Width", config.score_width.to_string()),
    ];

    if !missing.is_empty() {
        table.push(("Missing", missing.join(", ")));
    }

    print_kv_table(&mut out, "Dataset Summary", &table);
}

pub fn print_batch_summary(report: &BatchReport) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let nodes: usize = report.successes.iter().map(|(_, g)| g.node_count()).sum();
    let edges: usize = report.successes.iter().map(|(_, g)| g.edge_count()).sum();

    let mut table = vec![
        ("Rows", report.total().to_string()),
        ("Fused", report.success_count().to_string()),
        ("Failed", report.failure_count().to_string()),
        ("Total Nodes", nodes.to_string()),
        ("Total Edges", edges.to_string()),
    ];

    if report.success_count() > 0 {
        let count = report.success_count() as f64;
        table.push((
            "Mean Graph",
            format!(
                "{:.1} nodes · {:.1} edges",
                nodes as f64 / count,
                edges as f64 / count
            ),
        ));
    }

    print_kv_table(&mut out, "Batch Summary", &table);
}

pub fn print_failures(report: &BatchReport) {
    if report.is_clean() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for failure in &report.failures {
        *kinds.entry(failure_kind(&failure.error)).or_insert(0) += 1;
    }
    let mut sorted: Vec<_> = kinds
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    print_distribution_table(&mut out, "Failure Kinds", &sorted, report.failure_count());
    print_failure_rows(&mut out, report);
}

pub fn print_graph_info(row: usize, graph: &CombinedGraph) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let score_edges = graph.edges.iter().filter(|e| graph.is_score_edge(**e)).count();
    let score_row = graph
        .score_row()
        .iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(", ");

    let table = vec![
        ("Row", row.to_string()),
        ("Drug 1 Atoms", graph.n1.to_string()),
        ("Drug 2 Atoms", graph.n2.to_string()),
        ("Score Node", graph.score_index.to_string()),
        ("Score Row", score_row),
        (
            "Edges",
            format!("{} ({} score)", graph.edge_count(), score_edges),
        ),
        ("Node Width", graph.nodes.width().to_string()),
    ];

    print_kv_table(&mut out, "Combined Graph", &table);
}

fn failure_kind(error: &PipelineError) -> &'static str {
    match error {
        PipelineError::InvalidStructure { .. } => "SMILES",
        PipelineError::Featurize(_) => "Graph",
        PipelineError::MalformedRow { .. } => "Row",
    }
}

fn print_failure_rows(out: &mut impl Write, report: &BatchReport) {
    let row_w = 7usize;
    let kind_w = 7usize;
    let sep_overhead = 6;
    let msg_w = SAFE_TABLE_WIDTH.saturating_sub(row_w + kind_w + sep_overhead);

    let _ = writeln!(out, "{}┌─ Failed Rows ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌{r_line}┬{k_line}┬{m_line}┐",
        INDENT,
        r_line = "─".repeat(row_w + 2),
        k_line = "─".repeat(kind_w + 2),
        m_line = "─".repeat(msg_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:>row_w$} │ {:<kind_w$} │ {:<msg_w$} │",
        INDENT, "Row", "Kind", "Reason"
    );
    let _ = writeln!(
        out,
        "{}├{r_line}┼{k_line}┼{m_line}┤",
        INDENT,
        r_line = "─".repeat(row_w + 2),
        k_line = "─".repeat(kind_w + 2),
        m_line = "─".repeat(msg_w + 2)
    );

    for failure in report.failures.iter().take(MAX_FAILURE_ROWS) {
        let _ = writeln!(
            out,
            "{}│ {:>row_w$} │ {:<kind_w$} │ {:<msg_w$} │",
            INDENT,
            failure.row,
            failure_kind(&failure.error),
            truncate(&failure.error.to_string(), msg_w)
        );
    }

    if report.failure_count() > MAX_FAILURE_ROWS {
        let _ = writeln!(
            out,
            "{}│ {:>row_w$} │ {:<kind_w$} │ {:<msg_w$} │",
            INDENT,
            "...",
            "...",
            format!("({} more rows)", report.failure_count() - MAX_FAILURE_ROWS)
        );
    }

    let _ = writeln!(
        out,
        "{}└{r_line}┴{k_line}┴{m_line}┘",
        INDENT,
        r_line = "─".repeat(row_w + 2),
        k_line = "─".repeat(kind_w + 2),
        m_line = "─".repeat(msg_w + 2)
    );
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 8usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{name_line}┬{count_line}┬{dist_line}┐",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        INDENT, "Kind", "Rows", "Share"
    );
    let _ = writeln!(
        out,
        "{}├{name_line}┼{count_line}┼{dist_line}┤",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );

    for (name, count) in data {
        let pct = (*count as f64 / total.max(1) as f64) * 100.0;
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            INDENT,
            truncate(name, name_w),
            count,
            dist_cell
        );
    }

    let _ = writeln!(
        out,
        "{}└{name_line}┴{count_line}┴{dist_line}┘",
        INDENT,
        name_line = "─".repeat(name_w + 2),
        count_line = "─".repeat(count_w + 2),
        dist_line = "─".repeat(dist_w + 2)
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT, "Metric", "Value"
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = (((pct / 100.0) * max_width as f64).round() as usize).min(max_width);
    let empty = max_width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(make_bar(50.0, 4), "██░░");
        assert_eq!(make_bar(0.0, 3), "░░░");
        assert_eq!(make_bar(100.0, 2), "██");
    }

    #[test]
    fn failure_kinds_by_variant() {
        assert_eq!(failure_kind(&PipelineError::malformed_row("x")), "Row");
    }

    #[test]
    fn kv_table_rows_share_one_width() {
        let mut buf = Vec::new();
        print_kv_table(
            &mut buf,
            "Batch Summary",
            &[("Rows", "3".to_string()), ("Fused", "2".to_string())],
        );
        let text = String::from_utf8(buf).unwrap();
        let widths: Vec<_> = text
            .lines()
            .skip(1)
            .map(|l| l.chars().count())
            .collect();
        assert_eq!(widths.len(), 6);
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
