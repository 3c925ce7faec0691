use std::{
    error::Error,
    fmt::{self, Display},
};

use rand::RngCore;

use super::SparseGrad;
use crate::data::{DataSet, Sequence};

/// The error returned by scoring functions.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreErr {
    ParamsLength {
        got: usize,
        expected: usize,
    },
    ParamIndex {
        index: usize,
        params: usize,
    },
    SequenceTooShort {
        len: usize,
        needed: usize,
    },
    SymbolOutOfRange {
        position: usize,
        symbol: u8,
        alphabet: usize,
    },
    InvalidHyperparameter(String),
    Failed(String),
}

impl Display for ScoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreErr::ParamsLength { got, expected } => {
                write!(f, "got {got} parameters, expected {expected}")
            }
            ScoreErr::ParamIndex { index, params } => {
                write!(f, "parameter index {index} out of range for {params} parameters")
            }
            ScoreErr::SequenceTooShort { len, needed } => {
                write!(f, "sequence of length {len} is shorter than {needed}")
            }
            ScoreErr::SymbolOutOfRange {
                position,
                symbol,
                alphabet,
            } => write!(
                f,
                "symbol {symbol} at position {position} is outside an alphabet of size {alphabet}"
            ),
            ScoreErr::InvalidHyperparameter(detail) => write!(f, "invalid hyperparameter: {detail}"),
            ScoreErr::Failed(detail) => f.write_str(detail),
        }
    }
}

impl Error for ScoreErr {}

/// A differentiable function assigning a log-score to a sequence.
///
/// Every worker of the engine owns private clones, so implementations may keep
/// mutable caches without synchronization.
pub trait ScoringFunction: Send {
    /// A short human readable name, used in logs.
    fn name(&self) -> &str;

    /// Returns an independent copy of this function.
    fn clone_box(&self) -> Box<dyn ScoringFunction>;

    /// Returns the number of parameters of this function.
    fn num_params(&self) -> usize;

    /// Sets the parameters of this function.
    ///
    /// # Arguments
    /// * `params` - This function's block of the parameter vector, exactly `num_params` long.
    fn set_params(&mut self, params: &[f64]) -> Result<(), ScoreErr>;

    /// Returns a copy of the current parameters.
    fn current_params(&self) -> Vec<f64>;

    /// Computes the log-score of `seq` starting at `start`.
    fn log_score(&self, seq: &Sequence, start: usize) -> Result<f64, ScoreErr>;

    /// Computes the log-score of `seq` starting at `start` and records its non-zero
    /// partial derivatives, indexed locally, into `grad`.
    ///
    /// `grad` arrives cleared.
    fn log_score_and_gradient(
        &self,
        seq: &Sequence,
        start: usize,
        grad: &mut SparseGrad,
    ) -> Result<f64, ScoreErr>;

    /// Returns the equivalent sample size of this function's prior.
    fn ess(&self) -> f64 {
        0.
    }

    /// Returns the class parameter matching the class probability `fraction`.
    fn initial_class_param(&self, fraction: f64) -> f64 {
        fraction.ln()
    }

    /// Returns this function's own contribution to the log-prior.
    fn log_prior_term(&self) -> f64 {
        0.
    }

    /// Adds the gradient of `log_prior_term` into this function's block `grad`.
    fn add_gradient_of_log_prior_term(&self, _grad: &mut [f64]) {}

    /// Estimates the parameters from weighted data.
    fn initialize(&mut self, _data: &DataSet, _weights: &[f64]) -> Result<(), ScoreErr> {
        Ok(())
    }

    /// Draws the parameters at random.
    fn initialize_randomly(&mut self, _rng: &mut dyn RngCore) -> Result<(), ScoreErr> {
        Ok(())
    }

    /// Returns the normalization interface if this function is a statistical model.
    fn as_statistical_model(&self) -> Option<&dyn StatisticalModel> {
        None
    }
}

impl Clone for Box<dyn ScoringFunction> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A scoring function whose scores can be normalized into a likelihood.
pub trait StatisticalModel {
    /// Returns `ln Z`, the log of the sum of the scores over all sequences.
    fn log_normalization_constant(&self) -> f64;

    /// Returns the log of the partial derivative of `Z` for the local parameter `index`.
    fn log_partial_normalization_constant(&self, index: usize) -> Result<f64, ScoreErr>;
}
