pub mod dummy;
pub mod estimator_trait;

pub use estimator_trait::{Estimator, Predictor, ProbabilisticClassifier, Transformer};
