//! Preprocessing stages.
//!
//! Provides a `StandardScaler` for per-column mean/std standardization. It is
//! a plain `Transformer`, so it can sit in front of (or be used instead of)
//! a model-backed stage inside a `Pipeline`.

use std::marker::PhantomData;

use ndarray::{Array1, Array2, Axis};
use num_traits::{Float, FromPrimitive};

use crate::error::ModelError;
use crate::models::estimator_trait::{Estimator, Transformer};

/// Standard scaler (per-column mean/std).
///
/// Targets are accepted and ignored; `Y` only names their type so the scaler
/// fits into a pipeline next to the estimator that does use them.
#[derive(Clone, Debug)]
pub struct StandardScaler<F, Y: ?Sized = Array1<F>> {
    mean: Option<Array1<F>>,
    std: Option<Array1<F>>,
    _targets: PhantomData<fn(&Y)>,
}

impl<F: Float, Y: ?Sized> StandardScaler<F, Y> {
    /// Minimum stddev to avoid division by zero when transforming.
    pub const MIN_STD: f64 = 1e-6;

    pub fn new() -> Self {
        StandardScaler {
            mean: None,
            std: None,
            _targets: PhantomData,
        }
    }

    pub fn mean(&self) -> Option<&Array1<F>> {
        self.mean.as_ref()
    }

    pub fn std(&self) -> Option<&Array1<F>> {
        self.std.as_ref()
    }
}

impl<F: Float, Y: ?Sized> Default for StandardScaler<F, Y> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, Y> Estimator<F> for StandardScaler<F, Y>
where
    F: Float + FromPrimitive,
    Y: ?Sized,
{
    type Targets = Y;
    type FitParams = ();
    type Error = ModelError;

    fn fit(&mut self, x: &Array2<F>, _y: &Y, _params: ()) -> Result<(), ModelError> {
        let mean = x.mean_axis(Axis(0)).ok_or(ModelError::EmptyFeatures)?;
        let min_std = F::from(Self::MIN_STD).unwrap_or_else(F::epsilon);
        let std = x
            .var_axis(Axis(0), F::zero())
            .mapv(|v| v.sqrt().max(min_std));

        log::trace!("StandardScaler fitted on {:?}", x.dim());
        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }
}

impl<F, Y> Transformer<F> for StandardScaler<F, Y>
where
    F: Float + FromPrimitive,
    Y: ?Sized,
{
    type TransformError = ModelError;

    fn transform(&self, x: &Array2<F>) -> Result<Array2<F>, ModelError> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => (mean, std),
            _ => return Err(ModelError::NotFitted),
        };
        if mean.len() != x.ncols() {
            return Err(ModelError::FeatureMismatch {
                expected: mean.len(),
                found: x.ncols(),
            });
        }
        Ok((x - mean) / std)
    }
}
