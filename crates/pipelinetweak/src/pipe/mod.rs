//! Adapters that turn a model's predictions into a pipeline transform stage.
//!
//! - [`PredT`] exposes `predict` output as an `(n_samples, n_outputs)` matrix.
//! - [`ProbT`] exposes `predict_proba` output, optionally without the first
//!   class column.
pub mod pred_t;
pub mod prob_t;

pub use pred_t::PredT;
pub use prob_t::ProbT;
