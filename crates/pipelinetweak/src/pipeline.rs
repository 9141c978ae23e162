//! Two-step pipeline: a transform stage followed by a final estimator.
//!
//! Longer chains are built by nesting: a `Pipeline` whose final step is a
//! `Transformer` is itself a `Transformer`.

use ndarray::{Array2, ArrayD};

use crate::error::PipelineError;
use crate::models::estimator_trait::{Estimator, Predictor, ProbabilisticClassifier, Transformer};

/// A transform stage followed by a final estimator.
///
/// Fitting fits the stage, transforms `x` with it, then fits the final
/// estimator on the transformed features. Both steps see the same targets.
/// Predicting, and transforming when the final step is a `Transformer`, runs
/// `x` through the stage first.
#[derive(Clone, Debug)]
pub struct Pipeline<S, P> {
    stage: S,
    last: P,
}

impl<S, P> Pipeline<S, P> {
    pub fn new(stage: S, last: P) -> Self {
        Pipeline { stage, last }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn last(&self) -> &P {
        &self.last
    }

    pub fn into_parts(self) -> (S, P) {
        (self.stage, self.last)
    }

    fn features<F>(&self, x: &Array2<F>) -> Result<Array2<F>, PipelineError>
    where
        S: Transformer<F>,
    {
        self.stage.transform(x).map_err(PipelineError::stage)
    }
}

impl<F, S, P> Estimator<F> for Pipeline<S, P>
where
    S: Transformer<F>,
    P: Estimator<F, Targets = S::Targets>,
{
    type Targets = S::Targets;
    type FitParams = (S::FitParams, P::FitParams);
    type Error = PipelineError;

    fn fit(
        &mut self,
        x: &Array2<F>,
        y: &Self::Targets,
        params: Self::FitParams,
    ) -> Result<(), PipelineError> {
        let (stage_params, last_params) = params;
        self.stage
            .fit(x, y, stage_params)
            .map_err(PipelineError::stage)?;
        let z = self.features(x)?;
        log::debug!("Pipeline: stage mapped {:?} to {:?}", x.dim(), z.dim());
        self.last
            .fit(&z, y, last_params)
            .map_err(PipelineError::final_step)
    }
}

impl<F, S, P> Predictor<F> for Pipeline<S, P>
where
    S: Transformer<F>,
    P: Predictor<F> + Estimator<F, Targets = S::Targets>,
{
    fn predict(&self, x: &Array2<F>) -> Result<ArrayD<F>, PipelineError> {
        let z = self.features(x)?;
        self.last.predict(&z).map_err(PipelineError::final_step)
    }
}

impl<F, S, P> ProbabilisticClassifier<F> for Pipeline<S, P>
where
    S: Transformer<F>,
    P: ProbabilisticClassifier<F> + Estimator<F, Targets = S::Targets>,
{
    fn predict_proba(&self, x: &Array2<F>) -> Result<Array2<F>, PipelineError> {
        let z = self.features(x)?;
        self.last.predict_proba(&z).map_err(PipelineError::final_step)
    }
}

impl<F, S, P> Transformer<F> for Pipeline<S, P>
where
    S: Transformer<F>,
    P: Transformer<F> + Estimator<F, Targets = S::Targets>,
{
    type TransformError = PipelineError;

    fn transform(&self, x: &Array2<F>) -> Result<Array2<F>, PipelineError> {
        let z = self.features(x)?;
        self.last.transform(&z).map_err(PipelineError::final_step)
    }
}
