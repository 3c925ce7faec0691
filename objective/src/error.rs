use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use rayon::ThreadPoolBuildError;

use crate::scoring::ScoreErr;

/// The result type used in the entire objective module.
pub type Result<T> = std::result::Result<T, ObjectiveErr>;

/// The objective module's error type.
#[derive(Debug)]
pub enum ObjectiveErr {
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    DimensionMismatch {
        got: usize,
        expected: usize,
    },
    ClassIndexOutOfRange {
        index: usize,
        classes: usize,
    },
    Worker {
        worker: usize,
        class: usize,
        sequence: usize,
        source: ScoreErr,
    },
    UnknownInitPolicy(String),
    InvalidThreads(usize),
    InvalidWeight {
        class: usize,
        sequence: usize,
        weight: f64,
    },
    EmptyData,
    InvalidPrinciple(&'static str),
    InvalidPrior(String),
    NotStatisticalModel {
        class: usize,
    },
    NonFiniteObjective {
        conditional_likelihood: f64,
        likelihood: f64,
        prior: f64,
    },
    InvalidSymbol {
        symbol: char,
        position: usize,
    },
    Scoring(ScoreErr),
    ThreadPool(ThreadPoolBuildError),
    Io(io::Error),
}

impl Display for ObjectiveErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch in {what}: got {got}, expected {expected}"),
            ObjectiveErr::DimensionMismatch { got, expected } => write!(
                f,
                "the parameter vector has dimension {got}, expected {expected}"
            ),
            ObjectiveErr::ClassIndexOutOfRange { index, classes } => write!(
                f,
                "class index {index} is out of range for {classes} classes"
            ),
            ObjectiveErr::Worker {
                worker,
                class,
                sequence,
                source,
            } => write!(
                f,
                "worker {worker} failed scoring sequence {sequence} of class {class}: {source}"
            ),
            ObjectiveErr::UnknownInitPolicy(name) => {
                write!(f, "unknown initialization policy '{name}'")
            }
            ObjectiveErr::InvalidThreads(threads) => {
                write!(f, "the number of threads has to be positive, got {threads}")
            }
            ObjectiveErr::InvalidWeight {
                class,
                sequence,
                weight,
            } => write!(
                f,
                "sequence {sequence} of class {class} has an invalid weight {weight}"
            ),
            ObjectiveErr::EmptyData => f.write_str("the total weight of the data must be positive"),
            ObjectiveErr::InvalidPrinciple(reason) => {
                write!(f, "invalid learning principle: {reason}")
            }
            ObjectiveErr::InvalidPrior(reason) => write!(f, "invalid prior: {reason}"),
            ObjectiveErr::NotStatisticalModel { class } => write!(
                f,
                "the scoring function of class {class} has no normalization constant"
            ),
            ObjectiveErr::NonFiniteObjective {
                conditional_likelihood,
                likelihood,
                prior,
            } => write!(
                f,
                "evaluating the function gives cll={conditional_likelihood} ll={likelihood} prior={prior}"
            ),
            ObjectiveErr::InvalidSymbol { symbol, position } => {
                write!(f, "invalid symbol '{symbol}' at position {position}")
            }
            ObjectiveErr::Scoring(e) => write!(f, "scoring function error: {e}"),
            ObjectiveErr::ThreadPool(e) => write!(f, "failed to build the worker pool: {e}"),
            ObjectiveErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for ObjectiveErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ObjectiveErr::Worker { source, .. } => Some(source),
            ObjectiveErr::Scoring(e) => Some(e),
            ObjectiveErr::ThreadPool(e) => Some(e),
            ObjectiveErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScoreErr> for ObjectiveErr {
    fn from(value: ScoreErr) -> Self {
        Self::Scoring(value)
    }
}

impl From<ThreadPoolBuildError> for ObjectiveErr {
    fn from(value: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(value)
    }
}

impl From<io::Error> for ObjectiveErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
