//! Baseline estimators that ignore the features.
//!
//! They are handy as the last step of a pipeline (the stage under test is the
//! transform in front of them) and as simple models to wrap in `PredT` / `ProbT`.

use ndarray::{Array1, Array2, ArrayD, IxDyn};
use num_traits::Float;

use crate::config::{ClassifierStrategy, RegressorStrategy};
use crate::error::ModelError;
use crate::models::estimator_trait::{Estimator, Predictor, ProbabilisticClassifier};

/// Extra fit arguments accepted by the baseline estimators.
#[derive(Clone, Debug)]
pub struct FitOptions<F> {
    /// Per-sample weights. Must be finite, non-negative and not all zero.
    pub sample_weight: Option<Array1<F>>,
}

impl<F> Default for FitOptions<F> {
    fn default() -> Self {
        FitOptions {
            sample_weight: None,
        }
    }
}

impl<F> FitOptions<F> {
    pub fn with_sample_weight(sample_weight: Array1<F>) -> Self {
        FitOptions {
            sample_weight: Some(sample_weight),
        }
    }
}

fn check_lengths(samples: usize, targets: usize) -> Result<(), ModelError> {
    if samples != targets {
        return Err(ModelError::LengthMismatch { samples, targets });
    }
    if targets == 0 {
        return Err(ModelError::EmptyTargets);
    }
    Ok(())
}

fn check_features(expected: usize, found: usize) -> Result<(), ModelError> {
    if expected != found {
        return Err(ModelError::FeatureMismatch { expected, found });
    }
    Ok(())
}

/// Number of classes implied by `y`. Labels must lie below the sample count.
fn check_labels(y: &[usize]) -> Result<usize, ModelError> {
    let n_samples = y.len();
    let max = y.iter().copied().max().unwrap_or(0);
    if max >= n_samples {
        return Err(ModelError::InvalidLabel {
            label: max,
            n_samples,
        });
    }
    Ok(max + 1)
}

/// Resolve optional sample weights to one `f64` weight per sample.
fn resolve_weights<F: Float>(weights: Option<&Array1<F>>, n: usize) -> Result<Vec<f64>, ModelError> {
    let weights = match weights {
        None => return Ok(vec![1.0; n]),
        Some(w) => w,
    };
    if weights.len() != n {
        return Err(ModelError::InvalidWeights(format!(
            "expected {} weights, got {}",
            n,
            weights.len()
        )));
    }
    let resolved: Vec<f64> = weights
        .iter()
        .map(|w| w.to_f64().unwrap_or(f64::NAN))
        .collect();
    if resolved.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ModelError::InvalidWeights(
            "weights must be finite and non-negative".to_string(),
        ));
    }
    if resolved.iter().sum::<f64>() <= 0.0 {
        return Err(ModelError::InvalidWeights("weights sum to zero".to_string()));
    }
    Ok(resolved)
}

fn cast<F: Float>(v: f64) -> F {
    F::from(v).unwrap_or_else(F::nan)
}

#[derive(Clone, Debug)]
struct FittedRegressor<F> {
    value: F,
    n_features: usize,
}

/// Regressor predicting a single value learned from the targets.
#[derive(Clone, Debug)]
pub struct DummyRegressor<F> {
    strategy: RegressorStrategy,
    fitted: Option<FittedRegressor<F>>,
}

impl<F: Float> DummyRegressor<F> {
    pub fn new(strategy: RegressorStrategy) -> Self {
        DummyRegressor {
            strategy,
            fitted: None,
        }
    }

    pub fn strategy(&self) -> RegressorStrategy {
        self.strategy
    }

    /// The value predicted for every sample, once fitted.
    pub fn value(&self) -> Option<F> {
        self.fitted.as_ref().map(|f| f.value)
    }
}

impl<F: Float> Default for DummyRegressor<F> {
    fn default() -> Self {
        DummyRegressor::new(RegressorStrategy::default())
    }
}

impl<F: Float> Estimator<F> for DummyRegressor<F> {
    type Targets = Array1<F>;
    type FitParams = FitOptions<F>;
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<F>, y: &Array1<F>, params: FitOptions<F>) -> Result<(), ModelError> {
        check_lengths(x.nrows(), y.len())?;
        let weights = resolve_weights(params.sample_weight.as_ref(), y.len())?;

        let value = match self.strategy {
            RegressorStrategy::Mean => {
                let total: f64 = weights.iter().sum();
                let weighted: f64 = y
                    .iter()
                    .zip(weights.iter())
                    .map(|(v, w)| v.to_f64().unwrap_or(f64::NAN) * w)
                    .sum();
                cast(weighted / total)
            }
            // Weights are not used for the median.
            RegressorStrategy::Median => {
                let mut sorted = y.to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / cast(2.0)
                } else {
                    sorted[mid]
                }
            }
            RegressorStrategy::Constant(c) => cast(c),
        };

        log::trace!(
            "DummyRegressor({:?}) fitted on {} samples: value = {:?}",
            self.strategy,
            y.len(),
            value.to_f64()
        );
        self.fitted = Some(FittedRegressor {
            value,
            n_features: x.ncols(),
        });
        Ok(())
    }
}

impl<F: Float> Predictor<F> for DummyRegressor<F> {
    fn predict(&self, x: &Array2<F>) -> Result<ArrayD<F>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        check_features(fitted.n_features, x.ncols())?;
        Ok(ArrayD::from_elem(IxDyn(&[x.nrows()]), fitted.value))
    }
}

#[derive(Clone, Debug)]
struct FittedClassifier {
    proba: Vec<f64>,
    n_features: usize,
}

/// Classifier whose probabilities depend only on the training labels.
///
/// Labels are class indices `0..n_classes`; the number of classes is one more
/// than the largest label seen during fit and may not exceed the number of
/// samples.
#[derive(Clone, Debug, Default)]
pub struct DummyClassifier {
    strategy: ClassifierStrategy,
    fitted: Option<FittedClassifier>,
}

impl DummyClassifier {
    pub fn new(strategy: ClassifierStrategy) -> Self {
        DummyClassifier {
            strategy,
            fitted: None,
        }
    }

    pub fn strategy(&self) -> ClassifierStrategy {
        self.strategy
    }

    pub fn n_classes(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.proba.len())
    }

    /// Index of the most probable class, lowest index on ties.
    fn top_class(proba: &[f64]) -> usize {
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        best
    }
}

impl<F: Float> Estimator<F> for DummyClassifier {
    type Targets = [usize];
    type FitParams = FitOptions<F>;
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<F>, y: &[usize], params: FitOptions<F>) -> Result<(), ModelError> {
        check_lengths(x.nrows(), y.len())?;
        let weights = resolve_weights(params.sample_weight.as_ref(), y.len())?;

        let n_classes = check_labels(y)?;
        let mut prior = vec![0.0; n_classes];
        for (label, w) in y.iter().zip(weights.iter()) {
            prior[*label] += w;
        }
        let total: f64 = prior.iter().sum();
        prior.iter_mut().for_each(|p| *p /= total);

        let proba = match self.strategy {
            ClassifierStrategy::Prior => prior,
            ClassifierStrategy::Uniform => vec![1.0 / n_classes as f64; n_classes],
            ClassifierStrategy::MostFrequent => {
                let top = Self::top_class(&prior);
                let mut one_hot = vec![0.0; n_classes];
                one_hot[top] = 1.0;
                one_hot
            }
        };

        log::trace!(
            "DummyClassifier({:?}) fitted on {} samples, {} classes: {:?}",
            self.strategy,
            y.len(),
            n_classes,
            proba
        );
        self.fitted = Some(FittedClassifier {
            proba,
            n_features: x.ncols(),
        });
        Ok(())
    }
}

impl<F: Float> ProbabilisticClassifier<F> for DummyClassifier {
    fn predict_proba(&self, x: &Array2<F>) -> Result<Array2<F>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        check_features(fitted.n_features, x.ncols())?;
        let k = fitted.proba.len();
        Ok(Array2::from_shape_fn((x.nrows(), k), |(_, c)| {
            cast(fitted.proba[c])
        }))
    }
}

impl<F: Float> Predictor<F> for DummyClassifier {
    fn predict(&self, x: &Array2<F>) -> Result<ArrayD<F>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        check_features(fitted.n_features, x.ncols())?;
        let label = Self::top_class(&fitted.proba);
        Ok(ArrayD::from_elem(IxDyn(&[x.nrows()]), cast(label as f64)))
    }
}
