use log::{debug, info};
use rand::RngCore;

use super::{DifferentiableFunction, OptimizableFunction};
use crate::{
    ObjectiveErr, Result,
    data::{DataSet, WeightedData},
    execution::{Context, ParallelEvaluator, Partials, Task},
    init::InitKind,
    layout::{ClassLayout, ParamLayout},
    logsum::log_sum,
    prior::{LogPrior, PriorContext},
    principle::LearningPrinciple,
    scoring::{ScoringFunction, StatisticalModel},
    weights::ClassWeightState,
};

/// The weighted sum of conditional log-likelihood, log-likelihood and log-prior of
/// class-partitioned data, evaluated by a pool of workers.
///
/// The parameter vector starts with the class parameters followed by one block per
/// class holding the parameters of that class's scoring function.
pub struct GenDisMixFunction {
    evaluator: ParallelEvaluator,
    data: WeightedData,
    layout: ParamLayout,
    weights: ClassWeightState,
    prior: Box<dyn LogPrior>,
    principle: LearningPrinciple,
    normalize: bool,
    total: Partials,
    prior_grad: Vec<f64>,
}

impl GenDisMixFunction {
    /// Creates a new `GenDisMixFunction` ready for evaluation.
    ///
    /// # Arguments
    /// * `threads` - The number of workers.
    /// * `scores` - One scoring function per class.
    /// * `data` - The weighted data of every class.
    /// * `prior` - The log-prior on the parameters.
    /// * `principle` - The weights of the three terms.
    /// * `normalize` - Whether value and gradient are divided by the total weight.
    /// * `free_params` - Whether the last class parameter is eliminated.
    ///
    /// # Returns
    /// An error if the arguments don't fit together.
    pub fn new(
        threads: usize,
        scores: Vec<Box<dyn ScoringFunction>>,
        data: WeightedData,
        prior: Box<dyn LogPrior>,
        principle: LearningPrinciple,
        normalize: bool,
        free_params: bool,
    ) -> Result<Self> {
        let classes = data.classes();
        if scores.len() != classes {
            return Err(ObjectiveErr::ShapeMismatch {
                what: "scoring functions",
                got: scores.len(),
                expected: classes,
            });
        }
        if principle.uses_conditional_likelihood() && classes < 2 {
            return Err(ObjectiveErr::InvalidPrinciple(
                "the conditional likelihood needs at least two classes",
            ));
        }

        let class_layout = ClassLayout::new(free_params);
        let mut function = Self {
            evaluator: ParallelEvaluator::new(threads, scores)?,
            data,
            layout: ParamLayout::new(class_layout, &[]),
            weights: ClassWeightState::new(class_layout, classes),
            prior,
            principle,
            normalize,
            total: Partials::default(),
            prior_grad: Vec::new(),
        };
        function.reset()?;

        info!(
            threads = threads,
            classes = classes,
            prior = function.prior.name();
            "objective function created"
        );

        Ok(function)
    }

    /// Swaps in new primary scoring functions and resets.
    pub fn reset_with(&mut self, scores: Vec<Box<dyn ScoringFunction>>) -> Result<()> {
        if scores.len() != self.data.classes() {
            return Err(ObjectiveErr::ShapeMismatch {
                what: "scoring functions",
                got: scores.len(),
                expected: self.data.classes(),
            });
        }

        self.check_scores(&scores)?;
        self.evaluator.replace_primary(scores);
        self.rebuild();

        Ok(())
    }

    fn check_scores(&self, scores: &[Box<dyn ScoringFunction>]) -> Result<()> {
        if self.principle.uses_likelihood() {
            statistical(scores)?;
        }
        if self.principle.uses_prior() {
            self.prior.check(scores)?;
        }
        Ok(())
    }

    fn rebuild(&mut self) {
        let lens: Vec<usize> = self
            .evaluator
            .primary()
            .iter()
            .map(|score| score.num_params())
            .collect();

        self.layout = ParamLayout::new(self.layout.class_layout(), &lens);
        let dimension = self.layout.dimension();

        self.evaluator.reset(dimension);
        self.evaluator.assign(&self.data.lens());
        self.total = Partials::new(self.data.classes(), dimension);
        self.prior_grad = vec![0.; dimension];

        info!(
            workers = self.evaluator.workers().len(),
            dimension = dimension;
            "objective function reset"
        );
    }

    pub fn data(&self) -> &WeightedData {
        &self.data
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn principle(&self) -> LearningPrinciple {
        self.principle
    }

    /// Returns the primary scoring functions.
    pub fn scores(&self) -> &[Box<dyn ScoringFunction>] {
        self.evaluator.primary()
    }

    /// Returns the class weights of the last dispatched parameters.
    pub fn class_weights(&self) -> &ClassWeightState {
        &self.weights
    }

    /// Returns one log-weight per class encoded by `params`.
    pub fn class_params(&self, params: &[f64]) -> Result<Vec<f64>> {
        self.check_dimension(params)?;

        let weights = ClassWeightState::from_params(
            self.layout.class_layout(),
            self.data.classes(),
            &params[..self.layout.free_classes()],
        );
        Ok(weights.log_clazz().to_vec())
    }

    /// Adds `term` to the cached log-weight of class `class`.
    ///
    /// # Returns
    /// A `ClassIndexOutOfRange` error if `class` is not a class index.
    pub fn add_term_to_class_parameter(&mut self, class: usize, term: f64) -> Result<()> {
        self.weights.add_term(class, term)
    }

    /// Passes `params` to the scoring functions of every worker.
    pub fn set_params(&mut self, params: &[f64]) -> Result<()> {
        self.dispatch(params, Task::SetParams)
    }

    /// Estimates the parameters of every scoring function from its class's data.
    pub fn initialize_functions(&mut self) -> Result<()> {
        for (class, score) in self.evaluator.primary_mut().iter_mut().enumerate() {
            score.initialize(self.data.data(class), self.data.weights(class))?;
        }

        debug!(classes = self.data.classes(); "scoring functions initialized from data");
        self.reset()
    }

    /// Draws the parameters of every scoring function at random.
    pub fn initialize_functions_randomly(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        for score in self.evaluator.primary_mut() {
            score.initialize_randomly(rng)?;
        }

        debug!(classes = self.data.classes(); "scoring functions initialized randomly");
        self.reset()
    }

    fn check_dimension(&self, params: &[f64]) -> Result<()> {
        let expected = self.layout.dimension();
        if params.len() != expected {
            return Err(ObjectiveErr::DimensionMismatch {
                got: params.len(),
                expected,
            });
        }
        Ok(())
    }

    /// Dispatches `params` and runs `task` on every worker.
    ///
    /// The cached class weights only take the new values once every worker succeeded.
    fn dispatch(&mut self, params: &[f64], task: Task) -> Result<()> {
        self.check_dimension(params)?;
        let weights = ClassWeightState::from_params(
            self.layout.class_layout(),
            self.data.classes(),
            &params[..self.layout.free_classes()],
        );

        let ctx = Context {
            params,
            data: &self.data,
            layout: &self.layout,
            weights: &weights,
            principle: &self.principle,
        };
        self.evaluator.run(task, ctx)?;
        self.weights = weights;

        if task != Task::SetParams {
            self.evaluator
                .aggregate(&mut self.total, task == Task::Gradient);
        }

        Ok(())
    }

    fn prior_value(&self, params: &[f64]) -> Result<f64> {
        if !self.principle.uses_prior() {
            return Ok(0.);
        }

        let ctx = PriorContext {
            layout: &self.layout,
            weights: &self.weights,
            scores: self.evaluator.primary(),
        };
        self.prior.log_prior_term(params, ctx)
    }

    fn finish(&self, value: f64) -> f64 {
        if self.normalize {
            value / self.data.total_weight()
        } else {
            value
        }
    }
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

/// Returns `logClazz_j + logZ_j` for every class and the log of their sum.
fn log_norm(models: &[&dyn StatisticalModel], weights: &ClassWeightState) -> (Vec<f64>, f64) {
    let terms: Vec<f64> = models
        .iter()
        .zip(weights.log_clazz())
        .map(|(model, log_clazz)| log_clazz + model.log_normalization_constant())
        .collect();
    let norm = log_sum(&terms);

    (terms, norm)
}

impl DifferentiableFunction for GenDisMixFunction {
    fn evaluate(&mut self, params: &[f64]) -> Result<f64> {
        self.dispatch(params, Task::Evaluate)?;

        let principle = self.principle;
        let cll = if principle.uses_conditional_likelihood() {
            self.total.cll
        } else {
            0.
        };
        let ll = if principle.uses_likelihood() {
            let models = statistical(self.evaluator.primary())?;
            let (_, norm) = log_norm(&models, &self.weights);
            self.total.ll - self.data.total_weight() * norm
        } else {
            0.
        };
        let prior = self.prior_value(params)?;

        let value = principle.conditional_likelihood() * cll
            + principle.likelihood() * ll
            + principle.prior() * prior;

        if !value.is_finite() {
            return Err(ObjectiveErr::NonFiniteObjective {
                conditional_likelihood: cll,
                likelihood: ll,
                prior,
            });
        }

        debug!(cll = cll, ll = ll, prior = prior; "objective evaluated");

        Ok(self.finish(value))
    }

    fn gradient(&mut self, params: &[f64]) -> Result<Vec<f64>> {
        self.dispatch(params, Task::Gradient)?;

        let principle = self.principle;
        let class_layout = self.layout.class_layout();
        let free_classes = self.layout.free_classes();
        let total_weight = self.data.total_weight();
        let total = &mut self.total;

        if principle.uses_likelihood() {
            let models = statistical(self.evaluator.primary())?;
            let (terms, norm) = log_norm(&models, &self.weights);

            for (class, model) in models.iter().enumerate() {
                total.ll_class[class] -= total_weight * (terms[class] - norm).exp();

                let log_clazz = self.weights.log_clazz()[class];
                let offset = self.layout.offset(class);
                for index in 0..self.layout.class_range(class).len() {
                    let partial = model.log_partial_normalization_constant(index)?;
                    total.ll_grad[offset + index] -=
                        total_weight * (log_clazz + partial - norm).exp();
                }
            }

            class_layout.fold(&total.ll_class, &mut total.ll_grad[..free_classes]);
        }

        if principle.uses_conditional_likelihood() {
            class_layout.fold(&total.cll_class, &mut total.cll_grad[..free_classes]);
        }

        if principle.uses_prior() {
            self.prior_grad.fill(0.);
            let ctx = PriorContext {
                layout: &self.layout,
                weights: &self.weights,
                scores: self.evaluator.primary(),
            };
            self.prior
                .add_gradient_of_log_prior_term(params, ctx, &mut self.prior_grad)?;
        }

        let scale = if self.normalize { total_weight } else { 1. };
        let grad = (0..self.layout.dimension())
            .map(|i| {
                let mut g = 0.;
                if principle.uses_conditional_likelihood() {
                    g += principle.conditional_likelihood() * self.total.cll_grad[i];
                }
                if principle.uses_likelihood() {
                    g += principle.likelihood() * self.total.ll_grad[i];
                }
                if principle.uses_prior() {
                    g += principle.prior() * self.prior_grad[i];
                }
                g / scale
            })
            .collect();

        Ok(grad)
    }

    fn dimension(&self) -> usize {
        self.layout.dimension()
    }
}

impl OptimizableFunction for GenDisMixFunction {
    fn set_data_and_weights(&mut self, data: Vec<DataSet>, weights: Vec<Vec<f64>>) -> Result<()> {
        if data.len() != self.data.classes() {
            return Err(ObjectiveErr::ShapeMismatch {
                what: "data sets",
                got: data.len(),
                expected: self.data.classes(),
            });
        }

        self.data = WeightedData::new(data, weights)?;
        self.evaluator.assign(&self.data.lens());

        debug!(total_weight = self.data.total_weight(); "data and weights replaced");
        Ok(())
    }

    fn parameters(&self, kind: InitKind) -> Result<Vec<f64>> {
        let primary = self.evaluator.primary();
        let free_classes = self.layout.free_classes();

        let mut params = match kind {
            InitKind::Zeros => return Ok(vec![0.; self.layout.dimension()]),
            InitKind::Last => self.weights.free_params().to_vec(),
            InitKind::Plugin => {
                let sums = self.data.sums();
                let ess: f64 = primary.iter().map(|score| score.ess()).sum();
                let denominator = self.data.total_weight() + ess;
                let class_layout = self.layout.class_layout();

                let initial: Vec<f64> = primary
                    .iter()
                    .enumerate()
                    .map(|(class, score)| {
                        score.initial_class_param((sums[class] + score.ess()) / denominator)
                    })
                    .collect();

                let mut free = vec![0.; free_classes];
                class_layout.encode(&initial, &mut free);
                free
            }
        };

        params.reserve(self.layout.dimension() - free_classes);
        for score in primary {
            params.extend(score.current_params());
        }

        Ok(params)
    }

    fn reset(&mut self) -> Result<()> {
        self.check_scores(self.evaluator.primary())?;
        self.rebuild();
        Ok(())
    }
}
