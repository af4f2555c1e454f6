use std::io::Write;

use anyhow::{Context as _, Result, bail};

use catalyst_graph::io::json::{write_report_json, write_report_jsonl};
use catalyst_graph::io::{DatasetReader, Format};
use catalyst_graph::pipeline::{BatchReport, PairProcessor};

use crate::cli::FuseArgs;
use crate::config::build_pipeline_config;
use crate::display::{self, Context, Progress};
use crate::io::{OutputSpec, create_sink, infer_output_format, open_dataset};

const TOTAL_STEPS: u8 = 3;

pub fn run_fuse(args: FuseArgs, ctx: Context) -> Result<()> {
    let dataset = open_dataset(args.io.input.as_deref())?;
    let output = resolve_output(&args)?;
    let config = build_pipeline_config(&args.dataset, &args.fusion)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading dataset");
    let source = dataset.label;
    let mut reader =
        DatasetReader::from_reader(dataset.reader, &config.columns, config.delimiter_byte()?)
            .context("Failed to read dataset header")?;
    let missing: Vec<String> = reader.missing_columns().iter().map(|c| c.to_string()).collect();
    let width = reader.width();
    let records: Vec<_> = reader.records().collect();

    let mut substeps = vec![format!("{} data rows × {} columns", records.len(), width)];
    if !missing.is_empty() {
        substeps.push(format!("Missing columns: {}", missing.join(", ")));
    }
    progress.complete_step("Reading dataset", &substeps);

    if ctx.interactive {
        let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
        display::print_dataset_info(&source, records.len(), width, &missing, &config);
    }

    progress.step_counted("Building pair graphs", records.len() as u64);
    let processor = PairProcessor::from_config(&config);
    let report = processor.run_with(records, |_| progress.advance());
    progress.complete_step(
        "Building pair graphs",
        &[
            format!("{} pairs fused", report.success_count()),
            format!("{} rows failed", report.failure_count()),
        ],
    );

    if ctx.interactive {
        display::print_batch_summary(&report);
        display::print_failures(&report);
    }

    progress.step("Writing graphs");
    write_report(&output, &report)?;
    progress.complete_step("Writing graphs", &[output.describe()]);

    progress.finish("Fusion complete");

    if args.strict && !report.is_clean() {
        bail!(
            "{} of {} rows failed to fuse (--strict)",
            report.failure_count(),
            report.total()
        );
    }

    Ok(())
}

fn resolve_output(args: &FuseArgs) -> Result<OutputSpec> {
    let path = args.io.output.clone();

    let format = match (args.output_format, &path) {
        (Some(format), _) => format.into(),
        (None, Some(p)) => match infer_output_format(p) {
            Some(Format::Json) => Format::Json,
            Some(Format::JsonLines) | None => Format::JsonLines,
            Some(other) => bail!(
                "Cannot write a batch as {}: {}. Use .json or .jsonl, or the render command for DOT.",
                other,
                p.display()
            ),
        },
        (None, None) => Format::JsonLines,
    };

    Ok(OutputSpec { path, format })
}

fn write_report(output: &OutputSpec, report: &BatchReport) -> Result<()> {
    let mut writer = create_sink(output.path.as_deref())?;

    match output.format {
        Format::Json => write_report_json(&mut writer, report),
        _ => write_report_jsonl(&mut writer, report),
    }
    .context("Failed to write graphs")?;

    writer.flush().context("Failed to flush output")?;
    Ok(())
}
