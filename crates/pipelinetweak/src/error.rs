use std::error::Error as StdError;

use thiserror::Error;

/// Failure of a prediction-backed transform.
#[derive(Debug, Error)]
pub enum TransformError<E> {
    /// The wrapped model failed; its error is passed through as is.
    #[error(transparent)]
    Model(E),

    /// The wrapped model returned something that is neither a vector nor a matrix.
    #[error("unsupported prediction output rank {rank}, expected 1 or 2")]
    UnsupportedRank { rank: usize },
}

impl<E> TransformError<E> {
    /// The wrapped model's error, if that is what failed.
    pub fn model_error(&self) -> Option<&E> {
        match self {
            TransformError::Model(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_model_error(self) -> Option<E> {
        match self {
            TransformError::Model(e) => Some(e),
            _ => None,
        }
    }
}

/// Error shared by the baseline estimators in `models::dummy`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model has not been fitted yet")]
    NotFitted,

    #[error("feature matrix has {samples} rows but {targets} targets were given")]
    LengthMismatch { samples: usize, targets: usize },

    #[error("cannot fit on an empty target set")]
    EmptyTargets,

    #[error("cannot fit on a feature matrix without rows")]
    EmptyFeatures,

    #[error("model was fitted on {expected} features, got {found}")]
    FeatureMismatch { expected: usize, found: usize },

    #[error("invalid sample weights: {0}")]
    InvalidWeights(String),

    #[error("class label {label} is out of range for {n_samples} samples")]
    InvalidLabel { label: usize, n_samples: usize },
}

/// Failure inside a `Pipeline`, tagged with the step that raised it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transform stage failed")]
    Stage(#[source] Box<dyn StdError + Send + Sync>),

    #[error("final estimator failed")]
    Final(#[source] Box<dyn StdError + Send + Sync>),
}

impl PipelineError {
    pub(crate) fn stage<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        PipelineError::Stage(Box::new(e))
    }

    pub(crate) fn final_step<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        PipelineError::Final(Box::new(e))
    }
}
