use ndarray::{Array2, ArrayView1};
use rand::RngCore;
use rand_distr::{Distribution, Gamma};

use super::{ScoreErr, ScoringFunction, SparseGrad, StatisticalModel};
use crate::{
    data::{DataSet, Sequence},
    logsum::log_sum,
};

/// A position weight matrix in natural parameterization.
///
/// Row `p` holds the unnormalized log-potentials of the symbols at position `p`, the
/// log-score of a sequence is the sum of the potentials of its symbols. The parameter
/// of symbol `s` at position `p` has the local index `p * alphabet_size + s`.
#[derive(Debug, Clone)]
pub struct Pwm {
    params: Array2<f64>,
    ess: f64,
    row_norms: Vec<f64>,
    log_norm: f64,
}

impl Pwm {
    /// Creates a new uniform `Pwm`.
    ///
    /// # Arguments
    /// * `length` - The number of positions.
    /// * `alphabet_size` - The number of symbols per position.
    /// * `ess` - The equivalent sample size of the product-Dirichlet prior.
    ///
    /// # Returns
    /// An error if any dimension is zero or `ess` is negative.
    pub fn new(length: usize, alphabet_size: usize, ess: f64) -> Result<Self, ScoreErr> {
        if length == 0 || alphabet_size == 0 {
            return Err(ScoreErr::InvalidHyperparameter(format!(
                "a pwm needs positive dimensions, got {length}x{alphabet_size}"
            )));
        }
        if !ess.is_finite() || ess < 0. {
            return Err(ScoreErr::InvalidHyperparameter(format!(
                "the ess has to be non-negative, got {ess}"
            )));
        }

        let mut pwm = Self {
            params: Array2::zeros((length, alphabet_size)),
            ess,
            row_norms: vec![0.; length],
            log_norm: 0.,
        };
        pwm.update_norms();

        Ok(pwm)
    }

    pub fn length(&self) -> usize {
        self.params.nrows()
    }

    pub fn alphabet_size(&self) -> usize {
        self.params.ncols()
    }

    fn update_norms(&mut self) {
        for (norm, row) in self.row_norms.iter_mut().zip(self.params.rows()) {
            *norm = row_log_sum(row);
        }
        self.log_norm = self.row_norms.iter().sum();
    }

    fn check(&self, seq: &Sequence, start: usize) -> Result<(), ScoreErr> {
        let needed = start + self.length();
        if seq.len() < needed {
            return Err(ScoreErr::SequenceTooShort {
                len: seq.len(),
                needed,
            });
        }

        let alphabet = self.alphabet_size();
        match seq.symbols()[start..needed]
            .iter()
            .position(|&s| s as usize >= alphabet)
        {
            Some(p) => Err(ScoreErr::SymbolOutOfRange {
                position: start + p,
                symbol: seq.symbols()[start + p],
                alphabet,
            }),
            None => Ok(()),
        }
    }

    /// Turns every row of counts into log-probabilities.
    fn log_normalize_counts(&mut self) {
        let uniform = -(self.alphabet_size() as f64).ln();

        for mut row in self.params.rows_mut() {
            let total: f64 = row.sum();
            if total > 0. {
                row.mapv_inplace(|c| (c / total).ln());
            } else {
                row.fill(uniform);
            }
        }

        self.update_norms();
    }
}

fn row_log_sum(row: ArrayView1<'_, f64>) -> f64 {
    match row.as_slice() {
        Some(values) => log_sum(values),
        None => log_sum(&row.to_vec()),
    }
}

impl ScoringFunction for Pwm {
    fn name(&self) -> &str {
        "pwm"
    }

    fn clone_box(&self) -> Box<dyn ScoringFunction> {
        Box::new(self.clone())
    }

    fn num_params(&self) -> usize {
        self.params.len()
    }

    fn set_params(&mut self, params: &[f64]) -> Result<(), ScoreErr> {
        if params.len() != self.params.len() {
            return Err(ScoreErr::ParamsLength {
                got: params.len(),
                expected: self.params.len(),
            });
        }

        self.params
            .iter_mut()
            .zip(params)
            .for_each(|(p, &value)| *p = value);
        self.update_norms();

        Ok(())
    }

    fn current_params(&self) -> Vec<f64> {
        self.params.iter().copied().collect()
    }

    fn log_score(&self, seq: &Sequence, start: usize) -> Result<f64, ScoreErr> {
        self.check(seq, start)?;

        let score = self
            .params
            .rows()
            .into_iter()
            .zip(&seq.symbols()[start..])
            .map(|(row, &s)| row[s as usize])
            .sum();

        Ok(score)
    }

    fn log_score_and_gradient(
        &self,
        seq: &Sequence,
        start: usize,
        grad: &mut SparseGrad,
    ) -> Result<f64, ScoreErr> {
        self.check(seq, start)?;

        let alphabet = self.alphabet_size();
        let mut score = 0.;

        for (position, (row, &s)) in self
            .params
            .rows()
            .into_iter()
            .zip(&seq.symbols()[start..])
            .enumerate()
        {
            score += row[s as usize];
            grad.push(position * alphabet + s as usize, 1.);
        }

        Ok(score)
    }

    fn ess(&self) -> f64 {
        self.ess
    }

    fn initial_class_param(&self, fraction: f64) -> f64 {
        fraction.ln() - self.log_norm
    }

    fn log_prior_term(&self) -> f64 {
        // Product-Dirichlet density without its normalization, the `ess * ln Z`
        // part is accounted for by the composite prior.
        self.ess / self.alphabet_size() as f64 * self.params.sum()
    }

    fn add_gradient_of_log_prior_term(&self, grad: &mut [f64]) {
        let pseudo = self.ess / self.alphabet_size() as f64;
        grad.iter_mut().for_each(|g| *g += pseudo);
    }

    fn initialize(&mut self, data: &DataSet, weights: &[f64]) -> Result<(), ScoreErr> {
        let pseudo = self.ess / self.alphabet_size() as f64;
        self.params.fill(pseudo);

        for (seq, &weight) in data.iter().zip(weights) {
            self.check(seq, 0)?;

            for (mut row, &s) in self.params.rows_mut().into_iter().zip(seq.symbols()) {
                row[s as usize] += weight;
            }
        }

        self.log_normalize_counts();
        Ok(())
    }

    fn initialize_randomly(&mut self, rng: &mut dyn RngCore) -> Result<(), ScoreErr> {
        let alpha = match self.ess / self.alphabet_size() as f64 {
            pseudo if pseudo > 0. => pseudo,
            _ => 1.,
        };
        let gamma =
            Gamma::new(alpha, 1.).map_err(|e| ScoreErr::InvalidHyperparameter(e.to_string()))?;

        // Normalized gamma draws are a Dirichlet draw.
        self.params.mapv_inplace(|_| gamma.sample(rng));
        self.log_normalize_counts();

        Ok(())
    }

    fn as_statistical_model(&self) -> Option<&dyn StatisticalModel> {
        Some(self)
    }
}

impl StatisticalModel for Pwm {
    fn log_normalization_constant(&self) -> f64 {
        self.log_norm
    }

    fn log_partial_normalization_constant(&self, index: usize) -> Result<f64, ScoreErr> {
        if index >= self.params.len() {
            return Err(ScoreErr::ParamIndex {
                index,
                params: self.params.len(),
            });
        }

        let alphabet = self.alphabet_size();
        let (position, symbol) = (index / alphabet, index % alphabet);

        Ok(self.log_norm - self.row_norms[position] + self.params[[position, symbol]])
    }
}
