//! Text rendering of workflow outcomes. No business logic lives here; the
//! renderers are pure so their output can be asserted directly.
use svmflow_core::aggregate::{CategoryCounts, TestReport};
use svmflow_core::model::ModelSummary;

use crate::workflow::{ClassifyOutcome, TrainOutcome, MODEL_OUT, TRAIN_SET_OUT};

const PROBABILITY_NOTE: &str =
    "NOTE: probability estimates tend to leave low-confidence samples unclassified";
const TEST_SKIPPED: &str = "Loaded dataset has no labels, the classification test was skipped";

pub fn render_counts(counts: &CategoryCounts) -> String {
    format!(
        "Classification results:\n  \
         number of positive samples      {}\n  \
         number of negative samples      {}\n  \
         number of unclassified samples  {}",
        counts.positive, counts.negative, counts.unclassified
    )
}

pub fn render_test_report(report: &TestReport) -> String {
    format!(
        "Accuracy (classification) = {:.3}% ({}/{})",
        report.accuracy, report.correct, report.total
    )
}

pub fn render_model_summary(summary: &ModelSummary) -> String {
    let class_support = summary
        .class_labels
        .iter()
        .zip(summary.class_support.iter())
        .map(|(label, count)| format!("{}:{}", label, count))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Model parameters summary:\n  \
         number of classes     {}\n  \
         support vectors       {}\n  \
         per-class support     {}\n  \
         rho                   {:.6}\n  \
         probability support   {}",
        summary.nr_class,
        summary.support_vectors,
        class_support,
        summary.rho,
        if summary.probability {
            "active"
        } else {
            "not active"
        }
    )
}

pub fn print_classification(outcome: &ClassifyOutcome) {
    println!("{}", render_counts(&outcome.counts));
    if outcome.counts.unclassified > 0 {
        println!("{}", PROBABILITY_NOTE);
    }
    match &outcome.test {
        Some(report) => println!("{}", render_test_report(report)),
        None => println!("{}", TEST_SKIPPED),
    }
}

pub fn print_training(outcome: &TrainOutcome) {
    println!("{}", render_model_summary(&outcome.summary));
    if outcome.saved {
        println!("Training set saved to {}", TRAIN_SET_OUT);
        println!("Model saved to {}", MODEL_OUT);
    }
    if let Some(classification) = &outcome.classification {
        print_classification(classification);
    }
}
