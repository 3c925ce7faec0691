use super::{LogPrior, PriorContext};
use crate::Result;

/// The zero log-prior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrior;

impl LogPrior for NoPrior {
    fn name(&self) -> &str {
        "none"
    }

    fn log_prior_term(&self, _params: &[f64], _ctx: PriorContext<'_>) -> Result<f64> {
        Ok(0.)
    }

    fn add_gradient_of_log_prior_term(
        &self,
        _params: &[f64],
        _ctx: PriorContext<'_>,
        _grad: &mut [f64],
    ) -> Result<()> {
        Ok(())
    }
}
