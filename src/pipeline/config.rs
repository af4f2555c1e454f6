use serde::Deserialize;
use thiserror::Error;

use crate::io::dataset::ColumnSpec;
use crate::model::record::OUTCOME_WIDTH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse pipeline configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("delimiter '{0}' is not a single ASCII character")]
    InvalidDelimiter(char),

    #[error("score width {score_width} does not match the {metrics} configured metric columns")]
    MetricCountMismatch { score_width: usize, metrics: usize },
}

/// Settings for a batch run: which columns to read and how wide the score
/// node is.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration:
///
/// ```toml
/// delimiter = ","
/// score_width = 6
///
/// [columns]
/// drug1 = "Drug1"
/// drug2 = "Drug2"
/// metrics = ["CSS", "Synergy_ZIP", "Synergy_Bliss", "Synergy_Loewe", "Synergy_HSA", "Y"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub columns: ColumnSpec,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_score_width")]
    pub score_width: usize,
}

fn default_delimiter() -> char {
    ','
}
fn default_score_width() -> usize {
    OUTCOME_WIDTH
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSpec::default(),
            delimiter: default_delimiter(),
            score_width: default_score_width(),
        }
    }
}

impl PipelineConfig {
    /// Parses and validates a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the delimiter fits in one byte and that the metric
    /// columns fill the score node exactly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delimiter_byte()?;
        if self.columns.metrics.len() != self.score_width {
            return Err(ConfigError::MetricCountMismatch {
                score_width: self.score_width,
                metrics: self.columns.metrics.len(),
            });
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidDelimiter(self.delimiter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.score_width, 6);
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        assert_eq!(config.columns.drug1, "Drug1");
        assert_eq!(config.columns.metrics.len(), 6);
    }

    #[test]
    fn partial_columns_keep_other_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            delimiter = "\t"

            [columns]
            drug1 = "smiles_a"
            "#,
        )
        .unwrap();

        assert_eq!(config.delimiter_byte().unwrap(), b'\t');
        assert_eq!(config.columns.drug1, "smiles_a");
        assert_eq!(config.columns.drug2, "Drug2");
        assert_eq!(config.columns.metrics[5], "Y");
    }

    #[test]
    fn custom_metrics_must_match_score_width() {
        let ok = PipelineConfig::from_toml_str(
            r#"
            score_width = 3
            [columns]
            metrics = ["a", "b", "c"]
            "#,
        );
        assert!(ok.is_ok());

        let err = PipelineConfig::from_toml_str(
            r#"
            [columns]
            metrics = ["a", "b"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MetricCountMismatch {
                score_width: 6,
                metrics: 2
            }
        ));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let err = PipelineConfig::from_toml_str("delimiter = \"§\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelimiter('§')));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = PipelineConfig::from_toml_str("score_width = \"six\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
