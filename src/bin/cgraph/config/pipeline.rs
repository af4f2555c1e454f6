use std::fs;

use anyhow::{Context, Result};

use catalyst_graph::pipeline::PipelineConfig;

use crate::cli::{DatasetOptions, FusionOptions};

/// Loads the optional TOML file, then applies command-line overrides.
pub fn build_pipeline_config(
    dataset: &DatasetOptions,
    fusion: &FusionOptions,
) -> Result<PipelineConfig> {
    let mut config = match &dataset.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
            PipelineConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid configuration: {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    apply_overrides(&mut config, dataset, fusion);
    config.validate().context("Invalid pipeline settings")?;

    Ok(config)
}

fn apply_overrides(config: &mut PipelineConfig, dataset: &DatasetOptions, fusion: &FusionOptions) {
    if let Some(name) = &dataset.drug1 {
        config.columns.drug1 = name.clone();
    }
    if let Some(name) = &dataset.drug2 {
        config.columns.drug2 = name.clone();
    }
    if !dataset.metrics.is_empty() {
        config.columns.metrics = dataset.metrics.clone();
        // Custom metrics without an explicit width size the score node to fit.
        if fusion.score_width.is_none() {
            config.score_width = dataset.metrics.len();
        }
    }
    if let Some(delimiter) = dataset.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(width) = fusion.score_width {
        config.score_width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn options() -> (DatasetOptions, FusionOptions) {
        (
            DatasetOptions {
                config: None,
                drug1: None,
                drug2: None,
                metrics: Vec::new(),
                delimiter: None,
            },
            FusionOptions { score_width: None },
        )
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let (dataset, fusion) = options();
        let config = build_pipeline_config(&dataset, &fusion).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn metric_flag_resizes_score_node() {
        let (mut dataset, fusion) = options();
        dataset.metrics = vec!["CSS".into(), "Y".into()];
        dataset.delimiter = Some('\t');

        let config = build_pipeline_config(&dataset, &fusion).unwrap();
        assert_eq!(config.score_width, 2);
        assert_eq!(config.delimiter, '\t');
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "delimiter = ';'\n[columns]\ndrug1 = \"A\"").unwrap();

        let (mut dataset, fusion) = options();
        dataset.config = Some(file.path().to_path_buf());
        dataset.drug2 = Some("B".into());

        let config = build_pipeline_config(&dataset, &fusion).unwrap();
        assert_eq!(config.columns.drug1, "A");
        assert_eq!(config.columns.drug2, "B");
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn mismatched_width_is_rejected() {
        let (mut dataset, mut fusion) = options();
        dataset.metrics = vec!["CSS".into()];
        fusion.score_width = Some(6);
        assert!(build_pipeline_config(&dataset, &fusion).is_err());
    }
}
