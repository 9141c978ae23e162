use ndarray::{s, Array2};

use crate::config::ProbTConfig;
use crate::models::estimator_trait::{Estimator, ProbabilisticClassifier, Transformer};

/// Uses the output of a classifier's `predict_proba` as transform output.
///
/// With `drop` set (the default) the first class's column is removed. For a
/// binary classifier that column is `1 - p1` and carries no information.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pipelinetweak::models::dummy::{DummyClassifier, FitOptions};
/// use pipelinetweak::models::Transformer;
/// use pipelinetweak::pipe::ProbT;
///
/// let x = array![[0.0], [1.0], [2.0], [3.0]];
/// let y = [0usize, 1, 1, 1];
///
/// let mut stage = ProbT::new(DummyClassifier::default());
/// stage.fit(&x, &y[..], FitOptions::default()).unwrap();
/// let z: ndarray::Array2<f64> = stage.transform(&x).unwrap();
/// assert_eq!(z.dim(), (4, 1));
/// assert_eq!(z[[0, 0]], 0.75);
/// ```
#[derive(Clone, Debug)]
pub struct ProbT<M> {
    model: M,
    drop: bool,
}

impl<M> ProbT<M> {
    /// Wrap `model`, dropping the first probability column.
    pub fn new(model: M) -> Self {
        Self::with_drop(model, true)
    }

    pub fn with_drop(model: M, drop: bool) -> Self {
        ProbT { model, drop }
    }

    pub fn from_config(model: M, config: &ProbTConfig) -> Self {
        Self::with_drop(model, config.drop)
    }

    pub fn drops_first_column(&self) -> bool {
        self.drop
    }

    pub fn set_drop(&mut self, drop: bool) {
        self.drop = drop;
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_inner(self) -> M {
        self.model
    }

    /// Fit the wrapped model with the given arguments and return `self`.
    pub fn fit<F>(
        &mut self,
        x: &Array2<F>,
        y: &<M as Estimator<F>>::Targets,
        params: <M as Estimator<F>>::FitParams,
    ) -> Result<&mut Self, <M as Estimator<F>>::Error>
    where
        M: Estimator<F>,
    {
        log::debug!("ProbT: fitting wrapped model on {:?}", x.dim());
        self.model.fit(x, y, params)?;
        Ok(self)
    }
}

/// Remove the first column. A matrix without columns is returned as is.
pub(crate) fn drop_first_column<F: Clone>(z: Array2<F>) -> Array2<F> {
    if z.ncols() == 0 {
        return z;
    }
    z.slice(s![.., 1..]).to_owned()
}

impl<F, M> Estimator<F> for ProbT<M>
where
    M: Estimator<F>,
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
        ProbT::fit(self, x, y, params).map(|_| ())
    }
}

impl<F, M> Transformer<F> for ProbT<M>
where
    F: Clone,
    M: ProbabilisticClassifier<F>,
{
    type TransformError = M::Error;

    fn transform(&self, x: &Array2<F>) -> Result<Array2<F>, M::Error> {
        let z = self.model.predict_proba(x)?;
        log::debug!(
            "ProbT: probabilities of shape {:?}, drop first column = {}",
            z.dim(),
            self.drop
        );
        if self.drop {
            Ok(drop_first_column(z))
        } else {
            Ok(z)
        }
    }
}
