use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kernel families understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    Linear,
    Rbf,
    Poly,
}

impl FromStr for KernelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(KernelKind::Linear),
            "rbf" => Ok(KernelKind::Rbf),
            "poly" => Ok(KernelKind::Poly),
            _ => Err(format!(
                "Unknown kernel type: {}. Valid options are: linear, rbf, poly",
                s
            )),
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KernelKind::Linear => write!(f, "linear"),
            KernelKind::Rbf => write!(f, "rbf"),
            KernelKind::Poly => write!(f, "poly"),
        }
    }
}

/// Default training configuration. Every value has a name so tests and the
/// CLI can override a single option at a time.
pub const DEFAULT_KERNEL: KernelKind = KernelKind::Rbf;
pub const DEFAULT_COST: f64 = 10.0;
pub const DEFAULT_GAMMA: f64 = 0.0005;
pub const DEFAULT_POLY_CONSTANT: f64 = 1.0;
pub const DEFAULT_POLY_DEGREE: f64 = 3.0;

/// Training configuration handed to the classifier engine. Built once per
/// mode run and never mutated after it reaches the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvmParameters {
    pub kernel: KernelKind,
    /// Regularization constant C.
    pub cost: f64,
    /// Kernel coefficient for the rbf kernel.
    pub gamma: f64,
    pub poly_constant: f64,
    pub poly_degree: f64,
    pub shrinking: bool,
    pub probability: bool,
}

impl Default for SvmParameters {
    fn default() -> Self {
        SvmParameters {
            kernel: DEFAULT_KERNEL,
            cost: DEFAULT_COST,
            gamma: DEFAULT_GAMMA,
            poly_constant: DEFAULT_POLY_CONSTANT,
            poly_degree: DEFAULT_POLY_DEGREE,
            shrinking: true,
            probability: false,
        }
    }
}

impl SvmParameters {
    /// Reject configurations the solver cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.cost <= 0.0 {
            return Err(format!("cost must be positive, got {}", self.cost));
        }
        if self.gamma <= 0.0 {
            return Err(format!("gamma must be positive, got {}", self.gamma));
        }
        if self.poly_degree <= 0.0 {
            return Err(format!(
                "polynomial degree must be positive, got {}",
                self.poly_degree
            ));
        }
        Ok(())
    }
}
