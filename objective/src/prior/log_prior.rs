use crate::{Result, layout::ParamLayout, scoring::ScoringFunction, weights::ClassWeightState};

/// The engine state a prior may read while it is evaluated.
#[derive(Clone, Copy)]
pub struct PriorContext<'a> {
    pub layout: &'a ParamLayout,
    pub weights: &'a ClassWeightState,
    /// The primary scoring functions, holding the parameters being evaluated.
    pub scores: &'a [Box<dyn ScoringFunction>],
}

/// An additive log-prior on the parameter vector.
pub trait LogPrior: Send {
    /// A short human readable name, used in logs.
    fn name(&self) -> &str;

    /// Checks that this prior can be used with the given scoring functions.
    ///
    /// Runs on every engine reset.
    fn check(&self, _scores: &[Box<dyn ScoringFunction>]) -> Result<()> {
        Ok(())
    }

    /// Computes the log-prior of `params`.
    fn log_prior_term(&self, params: &[f64], ctx: PriorContext<'_>) -> Result<f64>;

    /// Adds the gradient of the log-prior of `params` into `grad`.
    ///
    /// # Arguments
    /// * `params` - The full parameter vector.
    /// * `ctx` - The engine state matching `params`.
    /// * `grad` - A buffer as long as `params`.
    fn add_gradient_of_log_prior_term(
        &self,
        params: &[f64],
        ctx: PriorContext<'_>,
        grad: &mut [f64],
    ) -> Result<()>;
}
