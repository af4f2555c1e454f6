use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::{debug, info};

use crate::io::error::Error;
use crate::model::record::{OUTCOME_COLUMNS, PairRecord};
use crate::pipeline::{Error as RowError, RowFailure};

/// Names of the dataset columns that feed a [`PairRecord`].
///
/// `metrics` lists the outcome columns in feature order; the outcome vector
/// of every record follows this order, not the order in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub drug1: String,
    pub drug2: String,
    pub metrics: Vec<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            drug1: "Drug1".to_string(),
            drug2: "Drug2".to_string(),
            metrics: OUTCOME_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Header positions of the columns in a [`ColumnSpec`].
///
/// A column absent from the header stays `None`; every row then fails with
/// a malformed-row error naming it.
#[derive(Debug, Clone)]
struct ColumnMap {
    drug1: (String, Option<usize>),
    drug2: (String, Option<usize>),
    metrics: Vec<(String, Option<usize>)>,
}

impl ColumnMap {
    fn resolve(spec: &ColumnSpec, headers: &StringRecord) -> Self {
        let find = |name: &str| (name.to_string(), headers.iter().position(|h| h.trim() == name));
        Self {
            drug1: find(spec.drug1.as_str()),
            drug2: find(spec.drug2.as_str()),
            metrics: spec.metrics.iter().map(|m| find(m.as_str())).collect(),
        }
    }

    fn missing(&self) -> Vec<&str> {
        std::iter::once(&self.drug1)
            .chain(std::iter::once(&self.drug2))
            .chain(self.metrics.iter())
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn extract(&self, row: usize, record: &StringRecord) -> Result<PairRecord, RowError> {
        let drug1 = field(record, &self.drug1)?;
        let drug2 = field(record, &self.drug2)?;

        let mut outcome = Vec::with_capacity(self.metrics.len());
        for column in &self.metrics {
            let raw = field(record, column)?;
            let value: f32 = raw.parse().map_err(|_| {
                RowError::malformed_row(format!(
                    "value '{}' in column '{}' is not a number",
                    raw, column.0
                ))
            })?;
            if !value.is_finite() {
                return Err(RowError::malformed_row(format!(
                    "value '{}' in column '{}' is not finite",
                    raw, column.0
                )));
            }
            outcome.push(value);
        }

        Ok(PairRecord::new(row, drug1, drug2, outcome))
    }
}

fn field<'r>(record: &'r StringRecord, column: &(String, Option<usize>)) -> Result<&'r str, RowError> {
    let (name, idx) = column;
    let idx = idx
        .ok_or_else(|| RowError::malformed_row(format!("column '{}' not found in header", name)))?;
    match record.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RowError::malformed_row(format!(
            "missing value in column '{}'",
            name
        ))),
    }
}

/// Streams drug-pair records out of a delimited table with a header row.
///
/// Rows may have any number of fields. Each data row yields either a
/// [`PairRecord`] or a [`RowFailure`] carrying a malformed-row error, so one
/// bad row never stops the rest of the table from being read.
pub struct DatasetReader<R> {
    reader: csv::Reader<R>,
    columns: ColumnMap,
    width: usize,
}

impl DatasetReader<File> {
    /// Opens the table at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] if the file cannot be opened or its header row
    /// cannot be read.
    pub fn from_path(path: impl AsRef<Path>, spec: &ColumnSpec, delimiter: u8) -> Result<Self, Error> {
        let reader = Self::builder(delimiter).from_path(path)?;
        Self::with_reader(reader, spec)
    }
}

impl<R: Read> DatasetReader<R> {
    /// Wraps any byte source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] if the header row cannot be read.
    pub fn from_reader(rdr: R, spec: &ColumnSpec, delimiter: u8) -> Result<Self, Error> {
        let reader = Self::builder(delimiter).from_reader(rdr);
        Self::with_reader(reader, spec)
    }

    fn builder(delimiter: u8) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.has_headers(true).flexible(true).delimiter(delimiter);
        builder
    }

    fn with_reader(mut reader: csv::Reader<R>, spec: &ColumnSpec) -> Result<Self, Error> {
        let headers = reader.headers()?.clone();
        let columns = ColumnMap::resolve(spec, &headers);

        let missing = columns.missing();
        if !missing.is_empty() {
            debug!(?missing, "dataset header lacks expected columns");
        }

        Ok(Self {
            reader,
            columns,
            width: headers.len(),
        })
    }

    /// Number of columns in the header row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Names of the configured columns that the header does not contain.
    pub fn missing_columns(&self) -> Vec<&str> {
        self.columns.missing()
    }

    /// Iterates over the data rows in file order.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            inner: self,
            record: StringRecord::new(),
            row: 0,
            done: false,
        }
    }
}

/// Iterator returned by [`DatasetReader::records`].
///
/// Logs the dataset shape once the last row has been read.
pub struct Records<'a, R> {
    inner: &'a mut DatasetReader<R>,
    record: StringRecord,
    row: usize,
    done: bool,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<PairRecord, RowFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let row = self.row;
        match self.inner.reader.read_record(&mut self.record) {
            Ok(true) => {
                self.row += 1;
                Some(
                    self.inner
                        .columns
                        .extract(row, &self.record)
                        .map_err(|e| RowFailure::new(row, e)),
                )
            }
            Ok(false) => {
                self.done = true;
                info!(rows = self.row, columns = self.inner.width, "dataset shape");
                None
            }
            Err(e) => {
                self.row += 1;
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    self.done = true;
                }
                Some(Err(RowFailure::new(
                    row,
                    RowError::malformed_row(format!("unreadable record: {}", e)),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Drug1,Drug2,CSS,Synergy_ZIP,Synergy_Bliss,Synergy_Loewe,Synergy_HSA,Y";

    fn read_all(text: &str) -> Vec<Result<PairRecord, RowFailure>> {
        let mut reader =
            DatasetReader::from_reader(text.as_bytes(), &ColumnSpec::default(), b',').unwrap();
        reader.records().collect()
    }

    fn malformed_detail(result: &Result<PairRecord, RowFailure>) -> &str {
        match result {
            Err(RowFailure {
                error: RowError::MalformedRow { detail },
                ..
            }) => detail,
            other => panic!("expected malformed row, got {other:?}"),
        }
    }

    #[test]
    fn reads_records_in_row_order() {
        let text = format!("{HEADER}\nCCO,c1ccccc1,1,2,3,4,5,6\nC,N,0.5,-1.25,0,0,0,1\n");
        let rows = read_all(&text);

        assert_eq!(rows.len(), 2);
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.row, 0);
        assert_eq!(first.drug1, "CCO");
        assert_eq!(first.drug2, "c1ccccc1");
        assert_eq!(first.outcome, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let second = rows[1].as_ref().unwrap();
        assert_eq!(second.row, 1);
        assert_eq!(second.outcome, vec![0.5, -1.25, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn outcome_follows_configured_order_not_file_order() {
        let text = "Y,Synergy_HSA,Synergy_Loewe,Synergy_Bliss,Synergy_ZIP,CSS,Drug2,Drug1,extra\n\
                    6,5,4,3,2,1,N,C,ignored\n";
        let rows = read_all(text);
        let record = rows[0].as_ref().unwrap();
        assert_eq!(record.drug1, "C");
        assert_eq!(record.drug2, "N");
        assert_eq!(record.outcome, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn bad_rows_fail_individually() {
        let text = format!(
            "{HEADER}\nC,C,1,2,3,4,5,6\nC,C,1,two,3,4,5,6\nC,C,1,2\nC,,1,2,3,4,5,6\nC,C,1,2,3,4,5,inf\nN,N,6,5,4,3,2,1\n"
        );
        let rows = read_all(&text);

        assert_eq!(rows.len(), 6);
        assert!(rows[0].is_ok());
        assert!(malformed_detail(&rows[1]).contains("not a number"));
        assert!(malformed_detail(&rows[2]).contains("missing value"));
        assert!(malformed_detail(&rows[3]).contains("'Drug2'"));
        assert!(malformed_detail(&rows[4]).contains("not finite"));
        assert_eq!(rows[5].as_ref().unwrap().row, 5);

        let failed_rows: Vec<usize> = rows
            .iter()
            .filter_map(|r| r.as_ref().err().map(|f| f.row))
            .collect();
        assert_eq!(failed_rows, vec![1, 2, 3, 4]);
    }

    #[test]
    fn missing_header_column_fails_every_row() {
        let text = "Drug1,Drug2,CSS\nC,C,1\nN,N,2\n";
        let mut reader =
            DatasetReader::from_reader(text.as_bytes(), &ColumnSpec::default(), b',').unwrap();
        assert_eq!(reader.width(), 3);
        assert_eq!(reader.missing_columns().len(), 5);

        let rows: Vec<_> = reader.records().collect();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(malformed_detail(row).contains("not found in header"));
        }
    }

    #[test]
    fn custom_columns_and_delimiter() {
        let spec = ColumnSpec {
            drug1: "smiles_a".to_string(),
            drug2: "smiles_b".to_string(),
            metrics: vec!["score".to_string()],
        };
        let text = "smiles_a\tsmiles_b\tscore\nCC\tO\t0.75\n";
        let mut reader = DatasetReader::from_reader(text.as_bytes(), &spec, b'\t').unwrap();
        let rows: Vec<_> = reader.records().collect();

        let record = rows[0].as_ref().unwrap();
        assert_eq!(record.outcome, vec![0.75]);
        assert_eq!(record.smiles(crate::model::record::DrugSlot::Second), "O");
    }

    #[test]
    fn header_only_table_has_no_rows() {
        assert!(read_all(HEADER).is_empty());
    }

    #[test]
    fn from_path_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        std::fs::write(&path, format!("{HEADER}\nC,N,1,2,3,4,5,6\n")).unwrap();

        let mut reader = DatasetReader::from_path(&path, &ColumnSpec::default(), b',').unwrap();
        assert_eq!(reader.records().filter(Result::is_ok).count(), 1);
    }

    #[test]
    fn from_path_missing_file_is_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetReader::from_path(dir.path().join("absent.csv"), &ColumnSpec::default(), b',')
            .err()
            .unwrap();
        assert!(matches!(err, Error::Csv { .. }));
    }
}
