//! Plain-text dataset and JSON model persistence.
use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use crate::data::{Dataset, Sample};
use crate::model::SvmModel;

/// Persistence seam for datasets and trained models. Each call opens and
/// releases its own file handle.
pub trait Codec {
    type Model;

    fn load_dataset(&self, path: &Path) -> Result<Dataset>;
    fn save_dataset(&self, path: &Path, data: &Dataset) -> Result<()>;
    fn load_model(&self, path: &Path) -> Result<Self::Model>;
    fn save_model(&self, path: &Path, model: &Self::Model) -> Result<()>;
}

/// Codec for `.dat` files: datasets as sparse `label idx:value ...` text
/// lines, models as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatCodec;

impl Codec for DatCodec {
    type Model = SvmModel;

    fn load_dataset(&self, path: &Path) -> Result<Dataset> {
        read_dataset(path)
    }

    fn save_dataset(&self, path: &Path, data: &Dataset) -> Result<()> {
        write_dataset(path, data)
    }

    fn load_model(&self, path: &Path) -> Result<SvmModel> {
        read_model(path)
    }

    fn save_model(&self, path: &Path, model: &SvmModel) -> Result<()> {
        write_model(path, model)
    }
}

/// Read a sparse dataset file. Each non-empty line holds an optional integer
/// label followed by `idx:value` feature pairs; `#` starts a comment.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
    parse_dataset(&content)
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))
}

/// Parse the sparse text format from an in-memory string.
pub fn parse_dataset(content: &str) -> Result<Dataset> {
    let mut samples = Vec::new();
    for (line_no, raw_line) in content.lines().enumerate() {
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut label = None;
        let mut features = Vec::new();
        for (token_no, token) in line.split_whitespace().enumerate() {
            if let Some((idx, value)) = token.split_once(':') {
                let idx = idx.parse::<usize>().with_context(|| {
                    format!("Invalid feature index '{}' at line {}", idx, line_no + 1)
                })?;
                let value = value.parse::<f64>().with_context(|| {
                    format!("Invalid feature value '{}' at line {}", value, line_no + 1)
                })?;
                features.push((idx, value));
            } else if token_no == 0 {
                label = Some(token.parse::<i32>().with_context(|| {
                    format!("Invalid label '{}' at line {}", token, line_no + 1)
                })?);
            } else {
                return Err(anyhow!(
                    "Unexpected token '{}' at line {}",
                    token,
                    line_no + 1
                ));
            }
        }

        let sample = Sample::new(label, features)
            .with_context(|| format!("Invalid sample at line {}", line_no + 1))?;
        samples.push(sample);
    }
    Ok(Dataset::new(samples))
}

/// Write a dataset back out in the sparse text format.
pub fn write_dataset(path: &Path, data: &Dataset) -> Result<()> {
    let mut out = String::new();
    for sample in data.iter() {
        let mut first = true;
        if let Some(label) = sample.label() {
            let _ = write!(out, "{}", label);
            first = false;
        }
        for &(idx, value) in sample.features() {
            if !first {
                out.push(' ');
            }
            let _ = write!(out, "{}:{}", idx, value);
            first = false;
        }
        out.push('\n');
    }
    std::fs::write(path, out)
        .with_context(|| format!("Failed to write dataset file: {}", path.display()))
}

/// Read a trained model from its JSON serialization.
pub fn read_model(path: &Path) -> Result<SvmModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open model file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse model file: {}", path.display()))
}

/// Write a trained model as JSON.
pub fn write_model(path: &Path, model: &SvmModel) -> Result<()> {
    let json = serde_json::to_string_pretty(model).context("Failed to serialize model")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write model file: {}", path.display()))
}
