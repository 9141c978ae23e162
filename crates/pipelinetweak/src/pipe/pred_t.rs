use ndarray::{Array2, ArrayD, Axis, Ix1, Ix2};

use crate::error::TransformError;
use crate::models::estimator_trait::{Estimator, Predictor, Transformer};

/// Uses the output of a model's `predict` as transform output.
///
/// Works with any regressor, classifier or clusterer implementing
/// [`Predictor`]. A prediction vector of length `n` becomes an `(n, 1)`
/// column; a prediction matrix is passed through as is.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use pipelinetweak::models::dummy::{DummyRegressor, FitOptions};
/// use pipelinetweak::models::Transformer;
/// use pipelinetweak::pipe::PredT;
///
/// let x = array![[0.0], [1.0], [2.0]];
/// let y = array![1.0, 2.0, 3.0];
///
/// let mut stage = PredT::new(DummyRegressor::default());
/// stage.fit(&x, &y, FitOptions::default()).unwrap();
/// assert_eq!(stage.transform(&x).unwrap(), array![[2.0], [2.0], [2.0]]);
/// ```
#[derive(Clone, Debug)]
pub struct PredT<M> {
    model: M,
}

impl<M> PredT<M> {
    pub fn new(model: M) -> Self {
        PredT { model }
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
        log::debug!("PredT: fitting wrapped model on {:?}", x.dim());
        self.model.fit(x, y, params)?;
        Ok(self)
    }
}

/// Reshape a prediction into a column-oriented matrix.
pub(crate) fn as_columns<F: Clone, E>(z: ArrayD<F>) -> Result<Array2<F>, TransformError<E>> {
    let rank = z.ndim();
    if let Ok(v) = z.view().into_dimensionality::<Ix1>() {
        return Ok(v.insert_axis(Axis(1)).to_owned());
    }
    z.into_dimensionality::<Ix2>()
        .map_err(|_| TransformError::UnsupportedRank { rank })
}

impl<F, M> Estimator<F> for PredT<M>
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
        PredT::fit(self, x, y, params).map(|_| ())
    }
}

impl<F, M> Transformer<F> for PredT<M>
where
    F: Clone,
    M: Predictor<F>,
{
    type TransformError = TransformError<M::Error>;

    fn transform(&self, x: &Array2<F>) -> Result<Array2<F>, Self::TransformError> {
        let z = self.model.predict(x).map_err(TransformError::Model)?;
        log::debug!("PredT: prediction of shape {:?} for {} samples", z.shape(), x.nrows());
        as_columns(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, IxDyn};

    #[test]
    fn test_vector_becomes_column() {
        let z = ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0, 2.0, 3.0]).unwrap();
        let out = as_columns::<f64, ()>(z).unwrap();
        assert_eq!(out, array![[1.0], [2.0], [3.0]]);
    }

    #[test]
    fn test_matrix_is_unchanged() {
        let m = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let out = as_columns::<f64, ()>(m.clone().into_dyn()).unwrap();
        assert_eq!(out, m);
    }

    #[test]
    fn test_other_ranks_are_rejected() {
        let z = ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2]));
        let err = as_columns::<f64, ()>(z).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedRank { rank: 3 }));

        let z = ArrayD::from_elem(IxDyn(&[]), 1.0);
        let err = as_columns::<f64, ()>(z).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedRank { rank: 0 }));
    }

    #[test]
    fn test_empty_vector_gives_empty_column() {
        let z = ArrayD::<f32>::zeros(IxDyn(&[0]));
        let out = as_columns::<f32, ()>(z).unwrap();
        assert_eq!(out.dim(), (0, 1));
    }
}
