use std::io::Write;

use anyhow::{Context as _, Result, anyhow};

use catalyst_graph::io::{DatasetReader, dot};
use catalyst_graph::pipeline::{PairProcessor, PipelineConfig};
use catalyst_graph::{CombinedGraph, PairRecord};

use crate::cli::{PairSelection, RenderArgs};
use crate::config::build_pipeline_config;
use crate::display::{self, Context, Progress};
use crate::io::{create_sink, open_dataset, sink_label};

const TOTAL_STEPS: u8 = 3;

pub fn run_render(args: RenderArgs, ctx: Context) -> Result<()> {
    let config = build_pipeline_config(&args.dataset, &args.fusion)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Selecting pair");
    let record = select_record(&args, &config)?;
    progress.complete_step(
        "Selecting pair",
        &[
            format!("Drug1: {}", record.drug1),
            format!("Drug2: {}", record.drug2),
        ],
    );

    progress.step("Fusing pair");
    let graph = PairProcessor::from_config(&config)
        .process_record(&record)
        .with_context(|| format!("Row {} could not be fused", record.row))?;
    progress.complete_step(
        "Fusing pair",
        &[format!(
            "{} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        )],
    );

    if ctx.interactive {
        display::print_graph_info(record.row, &graph);
    }

    progress.step("Writing DOT");
    write_dot(&args, &graph)?;
    progress.complete_step("Writing DOT", &[sink_label(args.io.output.as_deref())]);

    progress.finish("Render complete");

    Ok(())
}

fn select_record(args: &RenderArgs, config: &PipelineConfig) -> Result<PairRecord> {
    match &args.selection {
        PairSelection {
            pair: Some(pair),
            scores,
            ..
        } => match pair.as_slice() {
            [drug1, drug2] => Ok(PairRecord::new(0, drug1, drug2, scores.clone())),
            _ => Err(anyhow!("--pair takes exactly two SMILES strings")),
        },
        PairSelection { row: Some(row), .. } => read_row(args, config, *row),
        _ => Err(anyhow!("Select a pair with --row or --pair")),
    }
}

fn read_row(args: &RenderArgs, config: &PipelineConfig, row: usize) -> Result<PairRecord> {
    let dataset = open_dataset(args.io.input.as_deref())?;
    let mut reader =
        DatasetReader::from_reader(dataset.reader, &config.columns, config.delimiter_byte()?)
            .context("Failed to read dataset header")?;

    let mut seen = 0;
    for item in reader.records() {
        seen += 1;
        match item {
            Ok(record) if record.row == row => return Ok(record),
            Err(failure) if failure.row == row => return Err(failure.into()),
            _ => {}
        }
    }

    Err(anyhow!(
        "Dataset has no data row {} ({} rows read)",
        row,
        seen
    ))
}

fn write_dot(args: &RenderArgs, graph: &CombinedGraph) -> Result<()> {
    let mut writer = create_sink(args.io.output.as_deref())?;
    dot::write_graph(&mut writer, graph).context("Failed to write DOT graph")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}
