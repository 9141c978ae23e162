use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use rand::Rng;

use pipelinetweak::config::{ClassifierStrategy, ProbTConfig, RegressorStrategy};
use pipelinetweak::models::dummy::{DummyClassifier, DummyRegressor, FitOptions};
use pipelinetweak::models::{Estimator, Predictor, Transformer};
use pipelinetweak::pipe::{PredT, ProbT};
use pipelinetweak::pipeline::Pipeline;
use pipelinetweak::preprocessing::StandardScaler;

fn synthetic(n_samples: usize, n_features: usize) -> Result<(Array2<f64>, Array1<f64>, Vec<usize>)> {
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n_samples * n_features)
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect();
    let x = Array2::from_shape_vec((n_samples, n_features), data)
        .context("failed to create feature matrix")?;

    let y_reg = x.rows().into_iter().map(|row| row.sum()).collect::<Array1<f64>>();
    let y_cls = y_reg.iter().map(|v| usize::from(*v > 0.0)).collect();
    Ok((x, y_reg, y_cls))
}

fn main() -> Result<()> {
    env_logger::init();

    let (x, y_reg, y_cls) = synthetic(20, 3)?;
    println!("Synthetic X shape: {:?}", x.shape());

    // Regressor output used as a feature for the next step.
    let mut reg: Pipeline<PredT<Pipeline<StandardScaler<f64>, DummyRegressor<f64>>>, DummyRegressor<f64>> =
        Pipeline::new(
            PredT::new(Pipeline::new(
                StandardScaler::new(),
                DummyRegressor::new(RegressorStrategy::Median),
            )),
            DummyRegressor::new(RegressorStrategy::Mean),
        );
    reg.fit(&x, &y_reg, (((), FitOptions::default()), FitOptions::default()))
        .context("fitting regression pipeline")?;
    let stage_out = reg.stage().transform(&x)?;
    let preds = reg.predict(&x)?;
    println!("PredT stage output shape: {:?}", stage_out.dim());
    println!("Regression predictions (first 5): {:?}", preds.iter().take(5).collect::<Vec<_>>());

    // Class probabilities used as features; the redundant first column is dropped.
    let mut clf = Pipeline::new(
        ProbT::from_config(DummyClassifier::new(ClassifierStrategy::Prior), &ProbTConfig::default()),
        DummyClassifier::new(ClassifierStrategy::MostFrequent),
    );
    clf.fit(&x, &y_cls[..], (FitOptions::default(), FitOptions::default()))
        .context("fitting classification pipeline")?;
    let proba: Array2<f64> = clf.stage().transform(&x)?;
    let labels = clf.predict(&x)?;
    println!("ProbT stage output shape: {:?}", proba.dim());
    println!("Class predictions (first 5): {:?}", labels.iter().take(5).collect::<Vec<_>>());

    Ok(())
}
