//! Where datasets are read from and where graphs are written to.

mod infer;
mod spec;

pub use infer::output as infer_output_format;
pub use spec::OutputSpec;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// A dataset byte stream and the name it is reported under.
pub struct Dataset {
    pub label: String,
    pub reader: Box<dyn Read>,
}

/// Opens the CSV dataset at `path`, or stdin when no path is given.
///
/// The CSV reader buffers its input, so neither source is wrapped here.
/// Refuses an interactive stdin rather than waiting on the terminal.
pub fn open_dataset(path: Option<&Path>) -> Result<Dataset> {
    match path {
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open dataset: {}", p.display()))?;
            Ok(Dataset {
                label: p.display().to_string(),
                reader: Box::new(file),
            })
        }
        None if io::stdin().is_terminal() => {
            bail!("No input provided: stdin is a terminal. Use -i/--input or pipe a CSV dataset.")
        }
        None => Ok(Dataset {
            label: "stdin".to_string(),
            reader: Box::new(io::stdin().lock()),
        }),
    }
}

/// Buffered graph output over a file or stdout.
pub type GraphSink = BufWriter<Box<dyn Write>>;

pub fn create_sink(path: Option<&Path>) -> Result<GraphSink> {
    let inner: Box<dyn Write> = match path {
        Some(p) => Box::new(
            File::create(p)
                .with_context(|| format!("Failed to create output file: {}", p.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    Ok(BufWriter::new(inner))
}

/// Name of an output target in progress lines.
pub fn sink_label(path: Option<&Path>) -> String {
    path.map_or_else(|| "stdout".to_string(), |p| p.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dataset_file_is_labelled_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        fs::write(&path, "drug1,drug2\nC,O\n").unwrap();

        let mut dataset = open_dataset(Some(&path)).unwrap();
        assert_eq!(dataset.label, path.display().to_string());

        let mut text = String::new();
        dataset.reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "drug1,drug2\nC,O\n");
    }

    #[test]
    fn missing_dataset_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = open_dataset(Some(&path)).err().unwrap();
        assert!(err.to_string().starts_with("Failed to open dataset"));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn sink_writes_to_file_on_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graphs.jsonl");

        let mut sink = create_sink(Some(&path)).unwrap();
        sink.write_all(b"{}\n").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert_eq!(sink_label(Some(&path)), path.display().to_string());
        assert_eq!(sink_label(None), "stdout");
    }
}
