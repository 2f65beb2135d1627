//! Mode selection and the train/classify orchestration.
//!
//! One mode is selected per invocation and runs to completion or to the
//! first failure. Every engine/codec call is blocking and attempted exactly
//! once; there is no retry logic anywhere in this module.
use std::path::{Path, PathBuf};

use svmflow_core::aggregate::{CategoryCounts, PredictionResult, TestReport};
use svmflow_core::codec::Codec;
use svmflow_core::config::SvmParameters;
use svmflow_core::engine::ClassifierEngine;
use svmflow_core::error::WorkflowError;
use svmflow_core::model::{ModelSummary, TrainedModel};

/// Fixed output paths used by `--save`.
pub const TRAIN_SET_OUT: &str = "./train_out.dat";
pub const MODEL_OUT: &str = "./model_out.dat";

/// Terminal modes of one run. Help and no-args are handled before a mode is
/// selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Classify,
    Train { classify_after: bool },
}

/// Select exactly one mode from the flag set, or `None` when no mode flag
/// was given (the caller prints usage). Flag combinations that cannot form
/// a single mode are configuration errors.
pub fn resolve_mode(
    train: bool,
    classify: bool,
    train_classify: bool,
    save: bool,
) -> Result<Option<Mode>, WorkflowError> {
    if train && classify {
        return Err(WorkflowError::Usage(
            "--train and --classify select different modes; pass only one".to_string(),
        ));
    }
    if train_classify && !train {
        return Err(WorkflowError::Usage(
            "--tc has to be used together with --train".to_string(),
        ));
    }
    if save && !train {
        return Err(WorkflowError::Usage(
            "--save has to be used together with --train".to_string(),
        ));
    }
    if classify {
        Ok(Some(Mode::Classify))
    } else if train {
        Ok(Some(Mode::Train {
            classify_after: train_classify,
        }))
    } else {
        Ok(None)
    }
}

#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub model_path: PathBuf,
    pub data_path: Option<PathBuf>,
    /// Forced probability-estimate setting. `None` keeps the model's
    /// trained setting.
    pub probability: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub train_path: PathBuf,
    /// Held-out data for the post-training classification run.
    pub data_path: Option<PathBuf>,
    pub classify_after: bool,
    pub save: bool,
    pub probability: Option<bool>,
    pub params: SvmParameters,
}

/// What a classify run produced: a prediction for every sample, the tallied
/// outcome categories, and a test report only when ground truth existed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOutcome {
    pub counts: CategoryCounts,
    pub predictions: PredictionResult,
    pub test: Option<TestReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub summary: ModelSummary,
    pub saved: bool,
    pub classification: Option<ClassifyOutcome>,
}

/// Classify mode: load the model, require a data file, classify everything,
/// then run the classification test when labels are present.
pub fn run_classify<E, C>(
    engine: &E,
    codec: &C,
    opts: &ClassifyOptions,
) -> Result<ClassifyOutcome, WorkflowError>
where
    E: ClassifierEngine,
    C: Codec<Model = E::Model>,
{
    let model = codec
        .load_model(&opts.model_path)
        .map_err(|source| WorkflowError::ModelLoad {
            path: opts.model_path.clone(),
            source,
        })?;
    log::info!("The model has been loaded from {}", opts.model_path.display());

    let data_path = opts
        .data_path
        .as_deref()
        .ok_or(WorkflowError::MissingDataFile)?;
    classify_with_model(engine, codec, &model, data_path, opts.probability)
}

/// Train mode: load the training set, train, optionally persist the set and
/// the model, then optionally re-enter the classify path with the fresh
/// model. The shared classify path guarantees identical aggregation to a
/// standalone classify run.
pub fn run_train<E, C>(
    engine: &E,
    codec: &C,
    opts: &TrainOptions,
) -> Result<TrainOutcome, WorkflowError>
where
    E: ClassifierEngine,
    C: Codec<Model = E::Model>,
{
    let data = codec
        .load_dataset(&opts.train_path)
        .map_err(|source| WorkflowError::DatasetLoad {
            path: opts.train_path.clone(),
            source,
        })?;
    log::info!(
        "Loaded training set with {} samples from {}",
        data.len(),
        opts.train_path.display()
    );

    let model = engine
        .train(&data, &opts.params)
        .map_err(WorkflowError::Training)?;
    log::info!("The classifier has been trained");

    if opts.save {
        // Two independent, sequential writes; the first failure halts the
        // run and already-written files stay as they are.
        let train_out = Path::new(TRAIN_SET_OUT);
        codec
            .save_dataset(train_out, &data)
            .map_err(|source| WorkflowError::Save {
                path: train_out.to_path_buf(),
                source,
            })?;
        log::info!("Training set saved to {}", TRAIN_SET_OUT);

        let model_out = Path::new(MODEL_OUT);
        codec
            .save_model(model_out, &model)
            .map_err(|source| WorkflowError::Save {
                path: model_out.to_path_buf(),
                source,
            })?;
        log::info!("Model saved to {}", MODEL_OUT);
    }

    let classification = if opts.classify_after {
        let data_path = opts
            .data_path
            .as_deref()
            .ok_or(WorkflowError::MissingDataFile)?;
        Some(classify_with_model(
            engine,
            codec,
            &model,
            data_path,
            opts.probability,
        )?)
    } else {
        None
    };

    Ok(TrainOutcome {
        summary: model.summary().clone(),
        saved: opts.save,
        classification,
    })
}

/// Shared classification pipeline over an already available model.
pub fn classify_with_model<E, C>(
    engine: &E,
    codec: &C,
    model: &E::Model,
    data_path: &Path,
    probability: Option<bool>,
) -> Result<ClassifyOutcome, WorkflowError>
where
    E: ClassifierEngine,
    C: Codec<Model = E::Model>,
{
    let data = codec
        .load_dataset(data_path)
        .map_err(|source| WorkflowError::DatasetLoad {
            path: data_path.to_path_buf(),
            source,
        })?;
    log::info!(
        "Loaded {} samples for classification from {}",
        data.len(),
        data_path.display()
    );

    // The model's trained setting is the default; an explicit flag wins.
    let probability = probability.unwrap_or(model.parameters().probability);
    let predictions = engine
        .predict(model, &data, probability)
        .map_err(WorkflowError::Classification)?;
    log::info!("Classification done ({} samples)", predictions.len());

    let counts = CategoryCounts::tally(&predictions);

    let test = if data.is_labeled() {
        log::info!("Loaded dataset has labels, the classification test will run");
        Some(
            engine
                .test(model, &data)
                .map_err(WorkflowError::Classification)?,
        )
    } else {
        log::info!("Loaded dataset has no labels, the classification test cannot be executed");
        None
    };

    Ok(ClassifyOutcome {
        counts,
        predictions,
        test,
    })
}
