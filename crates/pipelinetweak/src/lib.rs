//! pipelinetweak: reuse a model's predictions as a pipeline transform stage.
//!
//! Pipelines expect every intermediate step to `fit` and `transform`, while
//! models `fit` and `predict` (or `predict_proba`). The adapters in [`pipe`]
//! bridge the two, so a model's output can feed the next step as features.
//!
//! The crate also carries the capability traits the adapters are written
//! against ([`models`]), a few baseline estimators, a standard scaler and a
//! small [`pipeline::Pipeline`] to compose stages.
pub mod config;
pub mod error;
pub mod models;
pub mod pipe;
pub mod pipeline;
pub mod preprocessing;
