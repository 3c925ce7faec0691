use log::info;
use rand::{SeedableRng, rngs::StdRng};
use specs::{ClassSpec, DataSpec, EngineSpec, PrincipleSpec, PriorSpec, ScoreSpec, WarmStartSpec};

use crate::{
    Result,
    data::{DataSet, WeightedData},
    function::{GenDisMixFunction, OptimizableFunction},
    init::InitKind,
    prior::{CompositePrior, GaussianPrior, LogPrior, NoPrior},
    principle::LearningPrinciple,
    scoring::{Pwm, ScoringFunction, UniformScore},
};

/// A built objective function together with its starting point.
pub struct Setup {
    pub function: GenDisMixFunction,
    pub start: Vec<f64>,
}

/// Builds `GenDisMixFunction`s given a specification.
#[derive(Default)]
pub struct EngineBuilder;

impl EngineBuilder {
    /// Creates a new `EngineBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new objective function following a spec and draws its starting point.
    ///
    /// # Arguments
    /// * `spec` - The specification for the engine.
    ///
    /// # Returns
    /// The function and the starting point, or the first error found in the spec.
    pub fn build(&self, spec: &EngineSpec) -> Result<Setup> {
        let init: InitKind = spec.init.parse()?;
        let data = self.resolve_data(&spec.classes)?;
        let scores = self.resolve_scores(&spec.classes)?;
        let prior = self.resolve_prior(spec.prior)?;
        let principle = self.resolve_principle(spec.principle)?;

        let mut function = GenDisMixFunction::new(
            spec.threads,
            scores,
            data,
            prior,
            principle,
            spec.normalize,
            spec.free_params,
        )?;

        self.resolve_warm_start(spec, &mut function)?;
        let start = function.parameters(init)?;

        info!(dimension = start.len(); "objective function built, starting from {init}");

        Ok(Setup { function, start })
    }

    fn resolve_data(&self, classes: &[ClassSpec]) -> Result<WeightedData> {
        let mut sets = Vec::with_capacity(classes.len());
        let mut weights = Vec::with_capacity(classes.len());

        for class in classes {
            let set = match &class.data {
                DataSpec::Local { path, .. } => DataSet::read_dna(path)?,
                DataSpec::Inline { sequences, .. } => DataSet::from_dna(sequences)?,
            };

            let class_weights = match class.data.weights() {
                Some(w) => w.to_vec(),
                None => vec![1.; set.len()],
            };

            sets.push(set);
            weights.push(class_weights);
        }

        WeightedData::new(sets, weights)
    }

    fn resolve_scores(&self, classes: &[ClassSpec]) -> Result<Vec<Box<dyn ScoringFunction>>> {
        classes
            .iter()
            .map(|class| self.resolve_score(class.score))
            .collect()
    }

    fn resolve_score(&self, spec: ScoreSpec) -> Result<Box<dyn ScoringFunction>> {
        let score: Box<dyn ScoringFunction> = match spec {
            ScoreSpec::Pwm {
                length,
                alphabet_size,
                ess,
            } => Box::new(Pwm::new(length, alphabet_size, ess)?),
            ScoreSpec::Uniform {
                length,
                alphabet_size,
            } => Box::new(UniformScore::new(length, alphabet_size)?),
        };

        Ok(score)
    }

    fn resolve_prior(&self, spec: PriorSpec) -> Result<Box<dyn LogPrior>> {
        let prior: Box<dyn LogPrior> = match spec {
            PriorSpec::None => Box::new(NoPrior),
            PriorSpec::Gaussian { variance } => Box::new(GaussianPrior::new(variance)?),
            PriorSpec::Composite => Box::new(CompositePrior::new()),
        };

        Ok(prior)
    }

    fn resolve_principle(&self, spec: PrincipleSpec) -> Result<LearningPrinciple> {
        match spec {
            PrincipleSpec::MaximumLikelihood => Ok(LearningPrinciple::MAXIMUM_LIKELIHOOD),
            PrincipleSpec::MaximumAPosteriori => Ok(LearningPrinciple::MAXIMUM_A_POSTERIORI),
            PrincipleSpec::MaximumConditionalLikelihood => {
                Ok(LearningPrinciple::MAXIMUM_CONDITIONAL_LIKELIHOOD)
            }
            PrincipleSpec::MaximumSupervisedPosterior => {
                Ok(LearningPrinciple::MAXIMUM_SUPERVISED_POSTERIOR)
            }
            PrincipleSpec::GenDisMix {
                conditional_likelihood,
                likelihood,
                prior,
            } => LearningPrinciple::gen_dis_mix(conditional_likelihood, likelihood, prior),
        }
    }

    fn resolve_warm_start(&self, spec: &EngineSpec, function: &mut GenDisMixFunction) -> Result<()> {
        match spec.warm_start {
            WarmStartSpec::None => Ok(()),
            WarmStartSpec::Data => function.initialize_functions(),
            WarmStartSpec::Random => {
                let mut rng = self.generate_rng(spec.seed);
                function.initialize_functions_randomly(&mut rng)
            }
        }
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
