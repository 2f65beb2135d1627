use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failure kinds for one workflow run. Each kind maps to a distinct process
/// exit code; a run halts at the first failure it hits.
#[derive(Debug)]
pub enum WorkflowError {
    /// Invalid flag combination or parameter value.
    Usage(String),
    DatasetLoad { path: PathBuf, source: anyhow::Error },
    /// Train mode was requested without a training file argument.
    MissingTrainingFile,
    ModelLoad { path: PathBuf, source: anyhow::Error },
    /// Classify mode was requested without a model file argument.
    MissingModelFile,
    /// Classification was requested without a data file to classify.
    MissingDataFile,
    Training(anyhow::Error),
    Classification(anyhow::Error),
    Save { path: PathBuf, source: anyhow::Error },
}

impl WorkflowError {
    pub fn exit_code(&self) -> i32 {
        match self {
            WorkflowError::Usage(_) => 2,
            WorkflowError::DatasetLoad { .. } | WorkflowError::MissingTrainingFile => 3,
            WorkflowError::ModelLoad { .. } | WorkflowError::MissingModelFile => 4,
            WorkflowError::MissingDataFile => 5,
            WorkflowError::Training(_) => 6,
            WorkflowError::Classification(_) => 7,
            WorkflowError::Save { .. } => 8,
        }
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkflowError::Usage(msg) => write!(f, "{}", msg),
            WorkflowError::DatasetLoad { path, source } => write!(
                f,
                "was not able to load dataset file \"{}\": {:#}",
                path.display(),
                source
            ),
            WorkflowError::MissingTrainingFile => {
                write!(f, "no training file with a .dat extension was supplied")
            }
            WorkflowError::ModelLoad { path, source } => write!(
                f,
                "was not able to load model file \"{}\": {:#}",
                path.display(),
                source
            ),
            WorkflowError::MissingModelFile => {
                write!(f, "no model file with a .dat extension was supplied")
            }
            WorkflowError::MissingDataFile => {
                write!(f, "no data file for classification, abort")
            }
            WorkflowError::Training(source) => {
                write!(f, "the classifier has not been trained: {:#}", source)
            }
            WorkflowError::Classification(source) => {
                write!(f, "classification error: {:#}", source)
            }
            WorkflowError::Save { path, source } => write!(
                f,
                "results not saved to \"{}\": {:#}",
                path.display(),
                source
            ),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkflowError::DatasetLoad { source, .. }
            | WorkflowError::ModelLoad { source, .. }
            | WorkflowError::Save { source, .. }
            | WorkflowError::Training(source)
            | WorkflowError::Classification(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}
