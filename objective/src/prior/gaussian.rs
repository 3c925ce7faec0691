use super::{LogPrior, PriorContext};
use crate::{ObjectiveErr, Result};

/// Independent zero-mean gaussians with a shared variance on every parameter.
///
/// The log-density is taken up to its constant, `-Σ x² / (2σ²)`.
#[derive(Debug, Clone, Copy)]
pub struct GaussianPrior {
    variance: f64,
}

impl GaussianPrior {
    /// Creates a new `GaussianPrior`.
    ///
    /// # Returns
    /// An error if `variance` isn't positive and finite.
    pub fn new(variance: f64) -> Result<Self> {
        if !variance.is_finite() || variance <= 0. {
            return Err(ObjectiveErr::InvalidPrior(format!(
                "the variance has to be positive, got {variance}"
            )));
        }

        Ok(Self { variance })
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl LogPrior for GaussianPrior {
    fn name(&self) -> &str {
        "gaussian"
    }

    fn log_prior_term(&self, params: &[f64], _ctx: PriorContext<'_>) -> Result<f64> {
        let squares: f64 = params.iter().map(|x| x * x).sum();
        Ok(-squares / (2. * self.variance))
    }

    fn add_gradient_of_log_prior_term(
        &self,
        params: &[f64],
        _ctx: PriorContext<'_>,
        grad: &mut [f64],
    ) -> Result<()> {
        for (g, x) in grad.iter_mut().zip(params) {
            *g -= x / self.variance;
        }
        Ok(())
    }
}
