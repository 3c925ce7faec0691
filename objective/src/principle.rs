use crate::{ObjectiveErr, Result};

/// The weights of the three terms of the objective.
///
/// The objective is `β_cll·CLL + β_ll·LL + β_prior·logPrior`, the weights are
/// non-negative and sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningPrinciple {
    conditional_likelihood: f64,
    likelihood: f64,
    prior: f64,
}

impl LearningPrinciple {
    pub const MAXIMUM_LIKELIHOOD: Self = Self::raw(0., 1., 0.);
    pub const MAXIMUM_A_POSTERIORI: Self = Self::raw(0., 0.5, 0.5);
    pub const MAXIMUM_CONDITIONAL_LIKELIHOOD: Self = Self::raw(1., 0., 0.);
    pub const MAXIMUM_SUPERVISED_POSTERIOR: Self = Self::raw(0.5, 0., 0.5);

    const fn raw(conditional_likelihood: f64, likelihood: f64, prior: f64) -> Self {
        Self {
            conditional_likelihood,
            likelihood,
            prior,
        }
    }

    /// Creates a generative-discriminative trade-off from arbitrary weights.
    ///
    /// # Arguments
    /// * `conditional_likelihood` - The weight of the conditional log-likelihood.
    /// * `likelihood` - The weight of the joint log-likelihood.
    /// * `prior` - The weight of the log-prior.
    ///
    /// # Returns
    /// The weights scaled to sum to one, or an error if any is negative or not
    /// finite, or all are zero.
    pub fn gen_dis_mix(conditional_likelihood: f64, likelihood: f64, prior: f64) -> Result<Self> {
        let weights = [conditional_likelihood, likelihood, prior];

        if weights.iter().any(|w| !w.is_finite() || *w < 0.) {
            return Err(ObjectiveErr::InvalidPrinciple(
                "the weights have to be non-negative and finite",
            ));
        }

        let total: f64 = weights.iter().sum();
        if total <= 0. {
            return Err(ObjectiveErr::InvalidPrinciple(
                "at least one weight has to be positive",
            ));
        }

        Ok(Self::raw(
            conditional_likelihood / total,
            likelihood / total,
            prior / total,
        ))
    }

    pub fn conditional_likelihood(&self) -> f64 {
        self.conditional_likelihood
    }

    pub fn likelihood(&self) -> f64 {
        self.likelihood
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// Whether the conditional log-likelihood term is evaluated at all.
    pub fn uses_conditional_likelihood(&self) -> bool {
        self.conditional_likelihood != 0.
    }

    pub fn uses_likelihood(&self) -> bool {
        self.likelihood != 0.
    }

    pub fn uses_prior(&self) -> bool {
        self.prior != 0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_normalized() {
        let principle = LearningPrinciple::gen_dis_mix(1., 2., 1.).unwrap();

        assert_eq!(principle.conditional_likelihood(), 0.25);
        assert_eq!(principle.likelihood(), 0.5);
        assert_eq!(principle.prior(), 0.25);
    }

    #[test]
    fn named_principles() {
        assert!(!LearningPrinciple::MAXIMUM_LIKELIHOOD.uses_conditional_likelihood());
        assert!(LearningPrinciple::MAXIMUM_SUPERVISED_POSTERIOR.uses_prior());
        assert_eq!(
            LearningPrinciple::gen_dis_mix(0., 3., 3.).unwrap(),
            LearningPrinciple::MAXIMUM_A_POSTERIORI
        );
    }

    #[test]
    fn invalid_weights() {
        assert!(LearningPrinciple::gen_dis_mix(0., 0., 0.).is_err());
        assert!(LearningPrinciple::gen_dis_mix(-1., 2., 0.).is_err());
        assert!(LearningPrinciple::gen_dis_mix(f64::INFINITY, 0., 0.).is_err());
    }
}
