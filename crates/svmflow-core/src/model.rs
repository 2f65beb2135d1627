use linfa::dataset::Pr;
use linfa_svm::Svm;
use serde::{Deserialize, Serialize};

use crate::config::SvmParameters;

/// Summary fields the workflow reads off a trained model. Everything else
/// about the artifact is opaque to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub nr_class: usize,
    /// Total number of support vectors.
    pub support_vectors: usize,
    pub class_labels: Vec<i32>,
    /// Support-vector count per class, aligned with `class_labels`.
    pub class_support: Vec<usize>,
    pub rho: f64,
    /// Whether probability calibration was requested at training time.
    pub probability: bool,
}

/// Read-only view of a trained classifier artifact. The workflow controller
/// is bound to this trait so tests can drive it with stand-in models.
pub trait TrainedModel {
    fn summary(&self) -> &ModelSummary;
    fn parameters(&self) -> &SvmParameters;
}

/// Classifier artifact produced by the SMO engine: the training parameters,
/// the feature dimension the model was fitted with, the summary, and the
/// fitted linfa model with its Platt calibration.
#[derive(Serialize, Deserialize)]
pub struct SvmModel {
    pub params: SvmParameters,
    pub feature_dim: usize,
    pub summary: ModelSummary,
    pub svm: Svm<f64, Pr>,
}

impl TrainedModel for SvmModel {
    fn summary(&self) -> &ModelSummary {
        &self.summary
    }

    fn parameters(&self) -> &SvmParameters {
        &self.params
    }
}
