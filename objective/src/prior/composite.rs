use super::{LogPrior, PriorContext};
use crate::{
    ObjectiveErr, Result,
    logsum::log_sum,
    scoring::{ScoringFunction, StatisticalModel},
};

/// Joins the scoring functions' own prior terms with a prior on the class weights.
///
/// The class term is `Σ_c ess_c·logClazz_c - E·ln Σ_j exp(logClazz_j + logZ_j)`
/// where `E` is the sum of all equivalent sample sizes, so the class weights behave
/// like a Dirichlet with the classes' ess as hyperparameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositePrior;

impl CompositePrior {
    pub fn new() -> Self {
        Self
    }
}

fn total_ess(scores: &[Box<dyn ScoringFunction>]) -> f64 {
    scores.iter().map(|score| score.ess()).sum()
}

fn statistical(scores: &[Box<dyn ScoringFunction>]) -> Result<Vec<&dyn StatisticalModel>> {
    scores
        .iter()
        .enumerate()
        .map(|(class, score)| {
            score
                .as_statistical_model()
                .ok_or(ObjectiveErr::NotStatisticalModel { class })
        })
        .collect()
}

/// Returns `ln Σ_j exp(logClazz_j + logZ_j)`.
fn log_norm(models: &[&dyn StatisticalModel], ctx: PriorContext<'_>) -> f64 {
    let terms: Vec<f64> = models
        .iter()
        .zip(ctx.weights.log_clazz())
        .map(|(model, log_clazz)| log_clazz + model.log_normalization_constant())
        .collect();
    log_sum(&terms)
}

impl LogPrior for CompositePrior {
    fn name(&self) -> &str {
        "composite"
    }

    fn check(&self, scores: &[Box<dyn ScoringFunction>]) -> Result<()> {
        if total_ess(scores) > 0. {
            statistical(scores)?;
        }
        Ok(())
    }

    fn log_prior_term(&self, _params: &[f64], ctx: PriorContext<'_>) -> Result<f64> {
        let mut value: f64 = ctx
            .scores
            .iter()
            .zip(ctx.weights.log_clazz())
            .map(|(score, log_clazz)| score.log_prior_term() + score.ess() * log_clazz)
            .sum();

        let ess = total_ess(ctx.scores);
        if ess > 0. {
            value -= ess * log_norm(&statistical(ctx.scores)?, ctx);
        }

        Ok(value)
    }

    fn add_gradient_of_log_prior_term(
        &self,
        _params: &[f64],
        ctx: PriorContext<'_>,
        grad: &mut [f64],
    ) -> Result<()> {
        let layout = ctx.layout;
        let class_layout = layout.class_layout();
        let free_classes = layout.free_classes();

        for (class, score) in ctx.scores.iter().enumerate() {
            score.add_gradient_of_log_prior_term(&mut grad[layout.class_range(class)]);
            class_layout.spread(class, score.ess(), &mut grad[..free_classes]);
        }

        let ess = total_ess(ctx.scores);
        if ess <= 0. {
            return Ok(());
        }

        let models = statistical(ctx.scores)?;
        let norm = log_norm(&models, ctx);

        for (class, (model, log_clazz)) in models.iter().zip(ctx.weights.log_clazz()).enumerate() {
            let share = (log_clazz + model.log_normalization_constant() - norm).exp();
            class_layout.spread(class, -ess * share, &mut grad[..free_classes]);

            let offset = layout.offset(class);
            for index in 0..layout.class_range(class).len() {
                let partial = model.log_partial_normalization_constant(index)?;
                grad[offset + index] -= ess * (log_clazz + partial - norm).exp();
            }
        }

        Ok(())
    }
}
