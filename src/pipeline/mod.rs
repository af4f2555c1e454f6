//! Row-by-row orchestration from dataset records to combined graphs.
//!
//! [`PairProcessor`] parses both structures of a [`PairRecord`], builds
//! their molecule graphs and fuses them with the record's outcome vector.
//! Failures are isolated per row: [`PairProcessor::run`] keeps going and
//! returns every success and every failure in a [`BatchReport`].

mod config;
mod error;

pub use config::{ConfigError, PipelineConfig};
pub use error::{Error, RowFailure};

use tracing::{debug, info, warn};

use crate::featurize::{self, GraphFusionEngine, MoleculeGraphBuilder};
use crate::io::smiles;
use crate::model::graph::{CombinedGraph, MoleculeGraph};
use crate::model::record::{DrugSlot, PairRecord};

/// Results of a batch run, in row order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub successes: Vec<(usize, CombinedGraph)>,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    /// Number of rows seen, successful or not.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Looks up the graph produced for a data row.
    pub fn graph(&self, row: usize) -> Option<&CombinedGraph> {
        self.successes
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, graph)| graph)
    }
}

/// Turns [`PairRecord`]s into [`CombinedGraph`]s.
#[derive(Debug, Clone, Default)]
pub struct PairProcessor {
    builder: MoleculeGraphBuilder,
    engine: GraphFusionEngine,
}

impl PairProcessor {
    pub fn new(engine: GraphFusionEngine) -> Self {
        Self {
            builder: MoleculeGraphBuilder::default(),
            engine,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(GraphFusionEngine::new(config.score_width))
    }

    pub fn engine(&self) -> &GraphFusionEngine {
        &self.engine
    }

    /// Processes one dataset row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStructure`] when either structure fails to
    /// parse, [`Error::MalformedRow`] when the outcome vector does not have
    /// one value per score column, and [`Error::Featurize`] when graph
    /// building or fusion rejects the pair.
    pub fn process_record(&self, record: &PairRecord) -> Result<CombinedGraph, Error> {
        let first = self.molecule_graph(record, DrugSlot::First)?;
        let second = self.molecule_graph(record, DrugSlot::Second)?;

        if record.outcome.len() != self.engine.score_width() {
            return Err(Error::malformed_row(format!(
                "expected {} outcome values, found {}",
                self.engine.score_width(),
                record.outcome.len()
            )));
        }

        Ok(self.engine.fuse(&first, &second, &record.outcome)?)
    }

    fn molecule_graph(&self, record: &PairRecord, slot: DrugSlot) -> Result<MoleculeGraph, Error> {
        let text = record.smiles(slot);
        let molecule =
            smiles::read(text).map_err(|e| Error::invalid_structure(slot, text, e))?;
        let perceived = featurize::perceive(&molecule)?;
        Ok(self.builder.build(&perceived)?)
    }

    /// Processes every record in order and collects the outcome.
    ///
    /// Records that already failed upstream are carried into the report
    /// unchanged.
    pub fn run<I>(&self, records: I) -> BatchReport
    where
        I: IntoIterator<Item = Result<PairRecord, RowFailure>>,
    {
        self.run_with(records, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_row` with each row index once it
    /// has been handled.
    pub fn run_with<I, F>(&self, records: I, mut on_row: F) -> BatchReport
    where
        I: IntoIterator<Item = Result<PairRecord, RowFailure>>,
        F: FnMut(usize),
    {
        let mut report = BatchReport::default();

        for item in records {
            let row = match item {
                Ok(record) => {
                    debug!(row = record.row, "processing pair");
                    match self.process_record(&record) {
                        Ok(graph) => {
                            report.successes.push((record.row, graph));
                            record.row
                        }
                        Err(error) => record_failure(&mut report, RowFailure::new(record.row, error)),
                    }
                }
                Err(failure) => record_failure(&mut report, failure),
            };
            on_row(row);
        }

        info!(
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "batch complete"
        );

        report
    }
}

fn record_failure(report: &mut BatchReport, failure: RowFailure) -> usize {
    warn!(row = failure.row, error = %failure.error, "row skipped");
    let row = failure.row;
    report.failures.push(failure);
    row
}
