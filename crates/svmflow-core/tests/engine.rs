//! Integration tests for the linfa-backed SMO engine. Training runs on a
//! tiny linearly separable set so the solver converges quickly.

use svmflow_core::aggregate::CategoryCounts;
use svmflow_core::codec::{read_model, write_model};
use svmflow_core::config::{KernelKind, SvmParameters};
use svmflow_core::data::{Dataset, Sample};
use svmflow_core::engine::{ClassifierEngine, SmoEngine};
use svmflow_core::model::TrainedModel;

fn separable_dataset(labeled: bool) -> Dataset {
    // Positive class sits at x0 > 0, negative at x0 < 0, with a wide margin.
    let mut samples = Vec::new();
    for i in 0..6 {
        let offset = i as f64 * 0.5;
        let pos_label = if labeled { Some(1) } else { None };
        let neg_label = if labeled { Some(-1) } else { None };
        samples.push(Sample::new(pos_label, vec![(0, 2.0 + offset), (1, 0.5)]).unwrap());
        samples.push(Sample::new(neg_label, vec![(0, -2.0 - offset), (1, -0.5)]).unwrap());
    }
    Dataset::new(samples)
}

fn linear_params() -> SvmParameters {
    let mut params = SvmParameters::default();
    params.kernel = KernelKind::Linear;
    params
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

#[test]
fn train_produces_binary_model_summary() {
    let engine = SmoEngine;
    let data = separable_dataset(true);
    let model = engine.train(&data, &linear_params()).unwrap();

    let summary = model.summary();
    assert_eq!(summary.nr_class, 2);
    assert_eq!(summary.class_labels, vec![1, -1]);
    assert!(summary.support_vectors <= data.len());
    assert_eq!(summary.class_support.len(), 2);
    assert!(!summary.probability);
    assert_eq!(model.parameters().kernel, KernelKind::Linear);
}

#[test]
fn train_rejects_unlabeled_data() {
    let engine = SmoEngine;
    let data = separable_dataset(false);
    assert!(engine.train(&data, &linear_params()).is_err());
}

#[test]
fn train_rejects_single_class() {
    let engine = SmoEngine;
    let data = Dataset::new(vec![
        Sample::new(Some(1), vec![(0, 1.0)]).unwrap(),
        Sample::new(Some(1), vec![(0, 2.0)]).unwrap(),
    ]);
    assert!(engine.train(&data, &linear_params()).is_err());
}

#[test]
fn train_rejects_labels_outside_plus_minus_one() {
    let engine = SmoEngine;
    let data = Dataset::new(vec![
        Sample::new(Some(2), vec![(0, 1.0)]).unwrap(),
        Sample::new(Some(7), vec![(0, -1.0)]).unwrap(),
    ]);
    assert!(engine.train(&data, &linear_params()).is_err());
}

#[test]
fn train_rejects_invalid_parameters() {
    let engine = SmoEngine;
    let data = separable_dataset(true);
    let mut params = linear_params();
    params.gamma = 0.0;
    assert!(engine.train(&data, &params).is_err());
}

// ---------------------------------------------------------------------------
// Prediction and test report
// ---------------------------------------------------------------------------

#[test]
fn predict_emits_one_output_per_sample() {
    let engine = SmoEngine;
    let data = separable_dataset(true);
    let model = engine.train(&data, &linear_params()).unwrap();

    let predictions = engine.predict(&model, &data, false).unwrap();
    assert_eq!(predictions.len(), data.len());
    let counts = CategoryCounts::tally(&predictions);
    assert_eq!(counts.total(), data.len());
}

#[test]
fn test_report_holds_accuracy_invariants() {
    let engine = SmoEngine;
    let data = separable_dataset(true);
    let model = engine.train(&data, &linear_params()).unwrap();

    let report = engine.test(&model, &data).unwrap();
    assert_eq!(report.total, data.len());
    assert!(report.correct <= report.total);
    assert!(report.accuracy >= 0.0);
    assert!(report.accuracy <= 100.0);
}

#[test]
fn test_requires_labels() {
    let engine = SmoEngine;
    let model = engine
        .train(&separable_dataset(true), &linear_params())
        .unwrap();
    assert!(engine.test(&model, &separable_dataset(false)).is_err());
}

#[test]
fn predict_rejects_out_of_range_feature_index() {
    let engine = SmoEngine;
    let model = engine
        .train(&separable_dataset(true), &linear_params())
        .unwrap();
    let wide = Dataset::new(vec![Sample::new(None, vec![(50, 1.0)]).unwrap()]);
    assert!(engine.predict(&model, &wide, false).is_err());
}

// ---------------------------------------------------------------------------
// Model persistence
// ---------------------------------------------------------------------------

#[test]
fn model_round_trips_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.dat");

    let engine = SmoEngine;
    let data = separable_dataset(true);
    let model = engine.train(&data, &linear_params()).unwrap();
    let before = engine.predict(&model, &data, false).unwrap();

    write_model(&path, &model).unwrap();
    let loaded = read_model(&path).unwrap();
    assert_eq!(loaded.summary, model.summary);
    assert_eq!(loaded.params, model.params);
    assert_eq!(loaded.feature_dim, model.feature_dim);

    let after = engine.predict(&loaded, &data, false).unwrap();
    assert_eq!(before, after);
}
