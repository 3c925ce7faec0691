use super::{ScoreErr, ScoringFunction, SparseGrad, StatisticalModel};
use crate::data::Sequence;

/// A parameter-free function giving every sequence of a fixed length the same score.
#[derive(Debug, Clone)]
pub struct UniformScore {
    length: usize,
    alphabet_size: usize,
}

impl UniformScore {
    pub fn new(length: usize, alphabet_size: usize) -> Result<Self, ScoreErr> {
        if alphabet_size == 0 {
            return Err(ScoreErr::InvalidHyperparameter(
                "the alphabet can't be empty".to_string(),
            ));
        }

        Ok(Self {
            length,
            alphabet_size,
        })
    }

    fn check(&self, seq: &Sequence, start: usize) -> Result<(), ScoreErr> {
        let needed = start + self.length;
        if seq.len() < needed {
            return Err(ScoreErr::SequenceTooShort {
                len: seq.len(),
                needed,
            });
        }
        Ok(())
    }
}

impl ScoringFunction for UniformScore {
    fn name(&self) -> &str {
        "uniform"
    }

    fn clone_box(&self) -> Box<dyn ScoringFunction> {
        Box::new(self.clone())
    }

    fn num_params(&self) -> usize {
        0
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ScoreErr> {
        if !params.is_empty() {
            return Err(ScoreErr::ParamsLength {
                got: params.len(),
                expected: 0,
            });
        }
        Ok(())
    }

    fn current_params(&self) -> Vec<f64> {
        Vec::new()
    }

    fn log_score(&self, seq: &Sequence, start: usize) -> Result<f64, ScoreErr> {
        self.check(seq, start)?;
        Ok(-(self.length as f64) * (self.alphabet_size as f64).ln())
    }

    fn log_score_and_gradient(
        &self,
        seq: &Sequence,
        start: usize,
        _grad: &mut SparseGrad,
    ) -> Result<f64, ScoreErr> {
        self.log_score(seq, start)
    }

    fn as_statistical_model(&self) -> Option<&dyn StatisticalModel> {
        Some(self)
    }
}

impl StatisticalModel for UniformScore {
    fn log_normalization_constant(&self) -> f64 {
        0.
    }

    fn log_partial_normalization_constant(&self, index: usize) -> Result<f64, ScoreErr> {
        Err(ScoreErr::ParamIndex { index, params: 0 })
    }
}
