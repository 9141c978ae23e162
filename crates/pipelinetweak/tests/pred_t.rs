//! Integration tests for the prediction-backed transform stage.

use ndarray::{array, Array1, Array2, ArrayD, IxDyn};
use pipelinetweak::error::TransformError;
use pipelinetweak::models::dummy::{DummyRegressor, FitOptions};
use pipelinetweak::models::{Estimator, Predictor, Transformer};
use pipelinetweak::pipe::PredT;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
enum StubError {
    #[error("stub model is not fitted")]
    NotFitted,
    #[error("stub model rejected fit: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Default)]
struct StubParams {
    tag: String,
}

/// Model returning a fixed prediction once fitted.
#[derive(Debug, Clone)]
struct StubPredictor {
    output: ArrayD<f64>,
    fitted: bool,
    fit_calls: usize,
    last_tag: Option<String>,
    last_targets: Option<Array1<f64>>,
}

impl StubPredictor {
    fn returning(output: ArrayD<f64>) -> Self {
        StubPredictor {
            output,
            fitted: false,
            fit_calls: 0,
            last_tag: None,
            last_targets: None,
        }
    }
}

impl Estimator<f64> for StubPredictor {
    type Targets = Array1<f64>;
    type FitParams = StubParams;
    type Error = StubError;

    fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>, params: StubParams) -> Result<(), StubError> {
        self.fit_calls += 1;
        if params.tag == "fail" {
            return Err(StubError::Rejected(params.tag));
        }
        self.last_tag = Some(params.tag);
        self.last_targets = Some(y.clone());
        self.fitted = true;
        Ok(())
    }
}

impl Predictor<f64> for StubPredictor {
    fn predict(&self, _x: &Array2<f64>) -> Result<ArrayD<f64>, StubError> {
        if !self.fitted {
            return Err(StubError::NotFitted);
        }
        Ok(self.output.clone())
    }
}

fn features(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, 2), |(r, c)| (r * 2 + c) as f64)
}

fn params(tag: &str) -> StubParams {
    StubParams {
        tag: tag.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Output shape
// ---------------------------------------------------------------------------

#[test]
fn regressor_vector_becomes_column() {
    let z = ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0, 2.0, 3.0]).unwrap();
    let mut stage = PredT::new(StubPredictor::returning(z));
    stage.fit(&features(3), &array![0.0, 0.0, 0.0], params("a")).unwrap();

    let out = stage.transform(&features(3)).unwrap();
    assert_eq!(out, array![[1.0], [2.0], [3.0]]);
}

#[test]
fn matrix_prediction_is_unchanged() {
    let m = array![[1.0, -1.0], [2.0, -2.0], [3.0, -3.0], [4.0, -4.0]];
    let mut stage = PredT::new(StubPredictor::returning(m.clone().into_dyn()));
    stage.fit(&features(4), &Array1::zeros(4), params("a")).unwrap();

    let out = stage.transform(&features(4)).unwrap();
    assert_eq!(out.dim(), (4, 2));
    assert_eq!(out, m);
}

#[test]
fn rank_three_prediction_is_rejected() {
    let z = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4]));
    let mut stage = PredT::new(StubPredictor::returning(z));
    stage.fit(&features(2), &Array1::zeros(2), params("a")).unwrap();

    let err = stage.transform(&features(2)).unwrap_err();
    assert!(matches!(err, TransformError::UnsupportedRank { rank: 3 }));
    assert!(err.to_string().contains("rank 3"));
}

// ---------------------------------------------------------------------------
// Error pass-through
// ---------------------------------------------------------------------------

#[test]
fn transform_before_fit_surfaces_model_error() {
    let stage = PredT::new(StubPredictor::returning(ArrayD::zeros(IxDyn(&[1]))));
    let err = stage.transform(&features(1)).unwrap_err();

    assert_eq!(err.model_error(), Some(&StubError::NotFitted));
    assert_eq!(err.to_string(), StubError::NotFitted.to_string());
    assert_eq!(err.into_model_error(), Some(StubError::NotFitted));
}

#[test]
fn fit_error_is_returned_unchanged() {
    let mut stage = PredT::new(StubPredictor::returning(ArrayD::zeros(IxDyn(&[1]))));
    let err = stage
        .fit(&features(1), &array![1.0], params("fail"))
        .unwrap_err();
    assert_eq!(err, StubError::Rejected("fail".to_string()));
    assert!(!stage.model().fitted);
}

// ---------------------------------------------------------------------------
// Delegation
// ---------------------------------------------------------------------------

#[test]
fn fit_forwards_arguments_and_chains() {
    let z = ArrayD::from_shape_vec(IxDyn(&[2]), vec![5.0, 6.0]).unwrap();
    let mut stage = PredT::new(StubPredictor::returning(z));

    let out = stage
        .fit(&features(2), &array![7.0, 8.0], params("first"))
        .unwrap()
        .fit(&features(2), &array![9.0, 10.0], params("second"))
        .unwrap()
        .transform(&features(2))
        .unwrap();

    assert_eq!(out, array![[5.0], [6.0]]);
    let model = stage.model();
    assert_eq!(model.fit_calls, 2);
    assert_eq!(model.last_tag.as_deref(), Some("second"));
    assert_eq!(model.last_targets, Some(array![9.0, 10.0]));
}

#[test]
fn borrowed_model_is_fitted_in_place() {
    let z = ArrayD::from_shape_vec(IxDyn(&[2]), vec![1.5, 2.5]).unwrap();
    let mut model = StubPredictor::returning(z);
    {
        let mut stage = PredT::new(&mut model);
        stage.fit(&features(2), &array![0.0, 1.0], params("borrowed")).unwrap();
        assert_eq!(stage.transform(&features(2)).unwrap(), array![[1.5], [2.5]]);
    }
    assert!(model.fitted);
    assert_eq!(model.last_tag.as_deref(), Some("borrowed"));
}

#[test]
fn fit_transform_through_trait() {
    let z = ArrayD::from_shape_vec(IxDyn(&[3]), vec![0.0, 1.0, 0.0]).unwrap();
    let mut stage = PredT::new(StubPredictor::returning(z));
    let out = stage
        .fit_transform(&features(3), &Array1::zeros(3), params("ft"))
        .unwrap();
    assert_eq!(out.dim(), (3, 1));

    let mut failing = PredT::new(StubPredictor::returning(ArrayD::zeros(IxDyn(&[1]))));
    let err = failing
        .fit_transform(&features(1), &Array1::zeros(1), params("fail"))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<StubError>(),
        Some(&StubError::Rejected("fail".to_string()))
    );
}

#[test]
fn wraps_baseline_regressor() {
    let x = features(4);
    let y = array![1.0, 2.0, 3.0, 6.0];
    let mut stage = PredT::new(DummyRegressor::default());
    stage.fit(&x, &y, FitOptions::default()).unwrap();

    let out = stage.transform(&x).unwrap();
    assert_eq!(out, Array2::from_elem((4, 1), 3.0));
    assert_eq!(stage.into_inner().value(), Some(3.0));
}
