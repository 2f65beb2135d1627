//! Classifier engine seam and the linfa-svm backed implementation.
use anyhow::{anyhow, bail, Result};
use linfa::dataset::Pr;
use linfa::traits::{Fit, Predict};
use linfa::Dataset as LinfaDataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::{Array1, Array2};

use crate::aggregate::{PredictionResult, TestReport};
use crate::config::{KernelKind, SvmParameters};
use crate::data::Dataset;
use crate::model::{ModelSummary, SvmModel, TrainedModel};

/// Prediction values with a classified meaning. Anything else counts as
/// unclassified in the aggregation.
pub const POSITIVE: f64 = 1.0;
pub const NEGATIVE: f64 = -1.0;
pub const UNCLASSIFIED: f64 = 0.0;

/// Confident-call cutoffs used when probability estimates are on. Samples
/// between the cutoffs are left unclassified.
pub const PROB_POSITIVE_CUTOFF: f32 = 0.75;
pub const PROB_NEGATIVE_CUTOFF: f32 = 0.25;

/// Capability seam for training and prediction. The workflow controller
/// only ever talks to this trait, so it can be unit-tested with stand-ins.
pub trait ClassifierEngine {
    type Model: TrainedModel;

    /// Fit a model to a fully labeled training set.
    fn train(&self, data: &Dataset, params: &SvmParameters) -> Result<Self::Model>;

    /// Predict one output sequence per sample. `probability` selects
    /// confident-call mode over hard prediction.
    fn predict(
        &self,
        model: &Self::Model,
        data: &Dataset,
        probability: bool,
    ) -> Result<PredictionResult>;

    /// Compare hard predictions against ground truth. Fails when the
    /// dataset carries no labels.
    fn test(&self, model: &Self::Model, data: &Dataset) -> Result<TestReport>;
}

/// Engine backed by linfa's sequential minimal optimization solver, with
/// Platt-calibrated probability outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoEngine;

impl SmoEngine {
    fn fit_svm(
        &self,
        x: Array2<f64>,
        y: Array1<bool>,
        params: &SvmParameters,
    ) -> Result<Svm<f64, Pr>> {
        let dataset = LinfaDataset::new(x, y);
        let svm_params: SvmParams<f64, Pr> = Svm::<f64, Pr>::params()
            .pos_neg_weights(params.cost, params.cost)
            .shrinking(params.shrinking);
        let svm_params = match params.kernel {
            KernelKind::Linear => svm_params.linear_kernel(),
            // linfa's gaussian kernel is exp(-||a-b||^2 / eps), so eps = 1/gamma
            KernelKind::Rbf => svm_params.gaussian_kernel(1.0 / params.gamma),
            KernelKind::Poly => {
                svm_params.polynomial_kernel(params.poly_constant, params.poly_degree)
            }
        };
        svm_params
            .fit(&dataset)
            .map_err(|e| anyhow!("SMO solver failed: {}", e))
    }
}

impl ClassifierEngine for SmoEngine {
    type Model = SvmModel;

    fn train(&self, data: &Dataset, params: &SvmParameters) -> Result<SvmModel> {
        params.validate().map_err(|msg| anyhow!(msg))?;
        if data.is_empty() {
            bail!("training set is empty");
        }
        let labels = data
            .labels()
            .ok_or_else(|| anyhow!("training set has no labels"))?;

        let mut distinct = labels.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != 2 {
            bail!(
                "expected two classes in the training set, found {}",
                distinct.len()
            );
        }
        if distinct != [-1, 1] {
            bail!("class labels must be -1 and +1, found {:?}", distinct);
        }

        let feature_dim = data.feature_dim();
        log::info!(
            "Fitting {} kernel on {} samples with {} features",
            params.kernel,
            data.len(),
            feature_dim
        );
        let x = to_dense(data, feature_dim)?;
        let y = Array1::from_iter(labels.iter().map(|&l| l == 1));
        let svm = self.fit_svm(x, y, params)?;
        log::debug!("Solver kept {} support vectors", svm.nsupport());

        let support_vectors = svm.nsupport();
        // alpha is aligned with the training samples; nonzero entries mark
        // support vectors.
        let mut positive_support = 0;
        let mut negative_support = 0;
        for (a, &label) in svm.alpha.iter().zip(labels.iter()) {
            if a.abs() > f64::EPSILON {
                if label == 1 {
                    positive_support += 1;
                } else {
                    negative_support += 1;
                }
            }
        }

        let summary = ModelSummary {
            nr_class: 2,
            support_vectors,
            class_labels: vec![1, -1],
            class_support: vec![positive_support, negative_support],
            rho: svm.rho,
            probability: params.probability,
        };

        Ok(SvmModel {
            params: params.clone(),
            feature_dim,
            summary,
            svm,
        })
    }

    fn predict(
        &self,
        model: &SvmModel,
        data: &Dataset,
        probability: bool,
    ) -> Result<PredictionResult> {
        let x = to_dense(data, model.feature_dim)?;
        let predicted = model.svm.predict(x);
        let outputs = predicted
            .targets()
            .iter()
            .map(|&pr| vec![decide(*pr, probability)])
            .collect();
        Ok(PredictionResult { outputs })
    }

    fn test(&self, model: &SvmModel, data: &Dataset) -> Result<TestReport> {
        let labels = data
            .labels()
            .ok_or_else(|| anyhow!("classification test requires a labeled dataset"))?;
        let predictions = self.predict(model, data, false)?;

        let mut correct = 0;
        for (output, &label) in predictions.outputs.iter().zip(labels.iter()) {
            if output.first().copied() == Some(f64::from(label)) {
                correct += 1;
            }
        }
        let total = labels.len();
        let accuracy = if total == 0 {
            0.0
        } else {
            100.0 * correct as f64 / total as f64
        };
        Ok(TestReport {
            accuracy,
            correct,
            total,
        })
    }
}

/// Map a Platt probability to a prediction value. Hard mode thresholds at
/// 0.5; probability mode only makes confident calls. NaN and exact ties
/// stay unclassified.
fn decide(p: f32, probability: bool) -> f64 {
    if probability {
        if p >= PROB_POSITIVE_CUTOFF {
            POSITIVE
        } else if p <= PROB_NEGATIVE_CUTOFF {
            NEGATIVE
        } else {
            UNCLASSIFIED
        }
    } else if p > 0.5 {
        POSITIVE
    } else if p < 0.5 {
        NEGATIVE
    } else {
        UNCLASSIFIED
    }
}

/// Densify a sparse dataset into an (n_samples, width) matrix.
fn to_dense(data: &Dataset, width: usize) -> Result<Array2<f64>> {
    let mut x = Array2::zeros((data.len(), width));
    for (row, sample) in data.iter().enumerate() {
        for &(idx, value) in sample.features() {
            if idx >= width {
                bail!(
                    "sample {} has feature index {} outside the trained dimension {}",
                    row + 1,
                    idx,
                    width
                );
            }
            x[[row, idx]] = value;
        }
    }
    Ok(x)
}
