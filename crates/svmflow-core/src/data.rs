//! Sparse sample and dataset containers.
use anyhow::{bail, Result};
use std::collections::HashSet;

/// One feature vector plus an optional class label. Features are sparse
/// (index, value) pairs; indices are unique per sample and insertion order
/// is preserved for reproducible output.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    label: Option<i32>,
    features: Vec<(usize, f64)>,
}

impl Sample {
    pub fn new(label: Option<i32>, features: Vec<(usize, f64)>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(features.len());
        for &(idx, _) in &features {
            if !seen.insert(idx) {
                bail!("duplicate feature index {} in sample", idx);
            }
        }
        Ok(Sample { label, features })
    }

    pub fn label(&self) -> Option<i32> {
        self.label
    }

    pub fn features(&self) -> &[(usize, f64)] {
        &self.features
    }
}

/// Ordered collection of samples. Immutable once built; a reload replaces
/// the whole value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// True only when the dataset is non-empty and every sample carries a
    /// label. A partially labeled dataset counts as unlabeled for test
    /// purposes.
    pub fn is_labeled(&self) -> bool {
        !self.samples.is_empty() && self.samples.iter().all(|s| s.label().is_some())
    }

    /// Ground-truth labels, present only for a fully labeled dataset.
    pub fn labels(&self) -> Option<Vec<i32>> {
        if !self.is_labeled() {
            return None;
        }
        Some(self.samples.iter().filter_map(|s| s.label()).collect())
    }

    /// One past the highest feature index across all samples.
    pub fn feature_dim(&self) -> usize {
        self.samples
            .iter()
            .flat_map(|s| s.features().iter())
            .map(|&(idx, _)| idx + 1)
            .max()
            .unwrap_or(0)
    }
}
