//! Aggregation of raw prediction output into outcome categories.

/// Per-sample prediction values. One inner sequence per input sample, so
/// multi-output engines are tolerated; most engines emit a single value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionResult {
    pub outputs: Vec<Vec<f64>>,
}

impl PredictionResult {
    /// Number of samples predicted.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Every scalar prediction value, in traversal order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.outputs.iter().flatten().copied()
    }
}

/// Outcome tally over a prediction result. The reduction is associative and
/// commutative, so traversal order never changes the counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub positive: usize,
    pub negative: usize,
    pub unclassified: usize,
}

impl CategoryCounts {
    /// Tally every scalar value: +1 is positive, -1 is negative, anything
    /// else (including NaN sentinels) is unclassified.
    pub fn tally(predictions: &PredictionResult) -> Self {
        let mut counts = CategoryCounts::default();
        for value in predictions.values() {
            if value == 1.0 {
                counts.positive += 1;
            } else if value == -1.0 {
                counts.negative += 1;
            } else {
                counts.unclassified += 1;
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.unclassified
    }
}

/// Accuracy summary from the engine's classification test. `correct` and
/// `total` come straight from the engine; they are not derived from the
/// category counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestReport {
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
}
