use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Settings for a `ProbT` stage.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProbTConfig {
    /// Drop the probability column of the first class.
    #[serde(default = "default_drop")]
    pub drop: bool,
}

fn default_drop() -> bool {
    true
}

impl Default for ProbTConfig {
    fn default() -> Self {
        ProbTConfig {
            drop: default_drop(),
        }
    }
}

/// How a `DummyRegressor` picks the value it predicts.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegressorStrategy {
    /// (Weighted) mean of the training targets.
    #[default]
    Mean,
    /// Median of the training targets.
    Median,
    /// A fixed value, independent of the training targets.
    Constant(f64),
}

impl FromStr for RegressorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "mean" => Ok(RegressorStrategy::Mean),
            "median" => Ok(RegressorStrategy::Median),
            _ => match s.strip_prefix("constant:") {
                Some(value) => value
                    .trim()
                    .parse::<f64>()
                    .map(RegressorStrategy::Constant)
                    .map_err(|e| format!("Invalid constant '{}': {}", value, e)),
                None => Err(format!("Unknown regressor strategy: {}", s)),
            },
        }
    }
}

/// How a `DummyClassifier` builds its class probabilities.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    /// Class frequencies observed during fit.
    #[default]
    Prior,
    /// Equal probability for every class seen during fit.
    Uniform,
    /// Probability one for the most frequent class.
    MostFrequent,
}

impl FromStr for ClassifierStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prior" => Ok(ClassifierStrategy::Prior),
            "uniform" => Ok(ClassifierStrategy::Uniform),
            "most_frequent" | "most-frequent" => Ok(ClassifierStrategy::MostFrequent),
            _ => Err(format!("Unknown classifier strategy: {}", s)),
        }
    }
}
