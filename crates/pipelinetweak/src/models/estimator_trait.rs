use std::error::Error;

use ndarray::{Array2, ArrayD};

/// Anything that can be fitted on a feature matrix.
///
/// `Targets` is what a caller passes as `y` and `FitParams` carries every
/// other fit argument (sample weights, evaluation sets, ...). Wrappers forward
/// both untouched, so a model decides for itself what it accepts.
pub trait Estimator<F> {
    type Targets: ?Sized;
    type FitParams;
    type Error: Error + Send + Sync + 'static;

    /// Fit the model. Rows of `x` are samples, columns are features.
    fn fit(
        &mut self,
        x: &Array2<F>,
        y: &Self::Targets,
        params: Self::FitParams,
    ) -> Result<(), Self::Error>;
}

/// A fitted estimator producing point predictions.
pub trait Predictor<F>: Estimator<F> {
    /// Predict one value (rank 1) or one row of values (rank 2) per sample.
    /// The rank of the returned array is left to the model.
    fn predict(&self, x: &Array2<F>) -> Result<ArrayD<F>, Self::Error>;
}

/// A fitted classifier producing per-class probabilities.
pub trait ProbabilisticClassifier<F>: Estimator<F> {
    /// Predict a `(n_samples, n_classes)` matrix whose rows sum to one.
    fn predict_proba(&self, x: &Array2<F>) -> Result<Array2<F>, Self::Error>;
}

/// A pipeline stage mapping a feature matrix to a derived feature matrix.
pub trait Transformer<F>: Estimator<F> {
    type TransformError: Error + Send + Sync + 'static;

    fn transform(&self, x: &Array2<F>) -> Result<Array2<F>, Self::TransformError>;

    /// Fit on `x`, then transform the same `x`.
    fn fit_transform(
        &mut self,
        x: &Array2<F>,
        y: &Self::Targets,
        params: Self::FitParams,
    ) -> anyhow::Result<Array2<F>> {
        self.fit(x, y, params)?;
        Ok(self.transform(x)?)
    }
}

impl<F, M> Estimator<F> for &mut M
where
    M: Estimator<F> + ?Sized,
{
    type Targets = M::Targets;
    type FitParams = M::FitParams;
    type Error = M::Error;

    fn fit(
        &mut self,
        x: &Array2<F>,
        y: &Self::Targets,
        params: Self::FitParams,
    ) -> Result<(), Self::Error> {
        (**self).fit(x, y, params)
    }
}

impl<F, M> Predictor<F> for &mut M
where
    M: Predictor<F> + ?Sized,
{
    fn predict(&self, x: &Array2<F>) -> Result<ArrayD<F>, Self::Error> {
        (**self).predict(x)
    }
}

impl<F, M> ProbabilisticClassifier<F> for &mut M
where
    M: ProbabilisticClassifier<F> + ?Sized,
{
    fn predict_proba(&self, x: &Array2<F>) -> Result<Array2<F>, Self::Error> {
        (**self).predict_proba(x)
    }
}

impl<F, M> Estimator<F> for Box<M>
where
    M: Estimator<F> + ?Sized,
{
    type Targets = M::Targets;
    type FitParams = M::FitParams;
    type Error = M::Error;

    fn fit(
        &mut self,
        x: &Array2<F>,
        y: &Self::Targets,
        params: Self::FitParams,
    ) -> Result<(), Self::Error> {
        (**self).fit(x, y, params)
    }
}

impl<F, M> Predictor<F> for Box<M>
where
    M: Predictor<F> + ?Sized,
{
    fn predict(&self, x: &Array2<F>) -> Result<ArrayD<F>, Self::Error> {
        (**self).predict(x)
    }
}

impl<F, M> ProbabilisticClassifier<F> for Box<M>
where
    M: ProbabilisticClassifier<F> + ?Sized,
{
    fn predict_proba(&self, x: &Array2<F>) -> Result<Array2<F>, Self::Error> {
        (**self).predict_proba(x)
    }
}
