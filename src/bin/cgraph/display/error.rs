use std::io::{self, Write};

use anyhow::Error;

use catalyst_graph::FeaturizeError;
use catalyst_graph::io::{Error as IoError, Format};
use catalyst_graph::pipeline::{ConfigError, Error as PipelineError, RowFailure};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        for cause in err.chain() {
            if collector.has_typed_hints {
                break;
            }
            if let Some(e) = cause.downcast_ref::<IoError>() {
                collector.collect_io_hints(e);
            } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
                collector.collect_config_hints(e);
            } else if let Some(e) = cause.downcast_ref::<RowFailure>() {
                collector.add(format!("Data row {} (zero-based, header excluded)", e.row));
                collector.collect_pipeline_hints(&e.error);
            } else if let Some(e) = cause.downcast_ref::<PipelineError>() {
                collector.collect_pipeline_hints(e);
            } else if let Some(e) = cause.downcast_ref::<FeaturizeError>() {
                collector.collect_featurize_hints(e);
            } else if let Some(e) = cause.downcast_ref::<std::io::Error>() {
                collector.collect_std_io_hints(e);
            }
        }

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &IoError) {
        match err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse {
                format, position, ..
            } => {
                self.add(format!(
                    "{} parser stopped near character {}",
                    format, position
                ));
                if *format == Format::Smiles {
                    self.add("Supported: organic subset, [bracket] atoms, branches, ring closures");
                    self.add("Check for unbalanced parentheses or unclosed ring digits");
                }
            }

            IoError::Csv { source } => {
                if let Some(pos) = source.position() {
                    self.add(format!("CSV problem on line {}", pos.line()));
                }
                self.add("Check the field delimiter (--delimiter) and quoting");
                self.add("Every row must have as many fields as the header");
            }

            IoError::Json { .. } => {
                self.add("Graph serialization failed while writing output");
                self.add("Check that the output destination is still writable");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("Input is not valid UTF-8 text");
                self.add("Datasets must be UTF-8 encoded CSV");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            ErrorKind::BrokenPipe => {
                self.add("Output consumer closed the pipe early");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_config_hints(&mut self, err: &ConfigError) {
        match err {
            ConfigError::Parse(_) => {
                self.add("Pipeline configuration has invalid TOML syntax");
                self.add("Known keys: delimiter, score_width, [columns] drug1, drug2, metrics");
            }

            ConfigError::InvalidDelimiter(c) => {
                self.add(format!("'{}' cannot be used as a CSV delimiter", c.escape_default()));
                self.add("Use a single ASCII character such as ',' or '\\t'");
            }

            ConfigError::MetricCountMismatch {
                score_width,
                metrics,
            } => {
                self.add(format!(
                    "{} metric columns cannot fill a score node of width {}",
                    metrics, score_width
                ));
                self.add("Pass --score-width equal to the number of --metrics");
            }
        }
    }

    fn collect_pipeline_hints(&mut self, err: &PipelineError) {
        match err {
            PipelineError::InvalidStructure { slot, source, .. } => {
                self.add(format!("The {} structure is not valid SMILES", slot));
                self.collect_io_hints(source);
            }

            PipelineError::Featurize(e) => self.collect_featurize_hints(e),

            PipelineError::MalformedRow { .. } => {
                self.add("Check that the row has every configured column");
                self.add("Outcome metrics must be numeric (empty cells are rejected)");
            }
        }
    }

    fn collect_featurize_hints(&mut self, err: &FeaturizeError) {
        match err {
            FeaturizeError::InvalidStructure { .. } => {
                self.add("The parsed molecule could not be turned into a graph");
                self.add("Empty structures and self-bonded atoms are rejected");
            }

            FeaturizeError::FeatureWidthMismatch { context, .. } => {
                self.add(format!("Feature widths disagree for {}", context));
                self.add("--score-width must cover the atom feature width and match the metrics");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Provide a dataset via -i/--input or pipe CSV to stdin");
        } else if msg.contains("--strict") {
            self.add("Successful rows were still written to the output");
            self.add("Run with -v or without --strict to inspect failing rows");
        } else if msg.contains("no data row") {
            self.add("--row is zero-based and excludes the header line");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_get_typed_hints() {
        let err = Error::new(ConfigError::MetricCountMismatch {
            score_width: 6,
            metrics: 2,
        });
        let hints = HintCollector::collect(&err);
        assert!(hints.iter().any(|h| h.contains("--score-width")));
    }

    #[test]
    fn hints_found_through_context() {
        let err = Error::new(IoError::parse(Format::Smiles, 3, "unclosed branch"))
            .context("Failed to read structure");
        let hints = HintCollector::collect(&err);
        assert!(hints[0].contains("character 3"));
    }

    #[test]
    fn strict_failure_falls_back_to_text_hints() {
        let err = anyhow::anyhow!("2 of 5 rows failed to fuse (--strict)");
        let hints = HintCollector::collect(&err);
        assert!(hints.iter().any(|h| h.contains("still written")));
    }
}
