use super::Assignment;
use crate::{
    ObjectiveErr, Result,
    data::WeightedData,
    layout::ParamLayout,
    logsum::log_sum_normalise,
    principle::LearningPrinciple,
    scoring::{ScoreErr, ScoringFunction, SparseGrad},
    weights::ClassWeightState,
};

/// The job a worker runs on its share of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Only pass the parameters on to the scoring functions.
    SetParams,
    /// Set the parameters, then accumulate the objective terms.
    Evaluate,
    /// Set the parameters, then accumulate the objective terms and their gradients.
    Gradient,
}

/// The read-only state shared by all workers during a dispatch.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub params: &'a [f64],
    pub data: &'a WeightedData,
    pub layout: &'a ParamLayout,
    pub weights: &'a ClassWeightState,
    pub principle: &'a LearningPrinciple,
}

/// The weighted sums one worker accumulated, merged on the calling thread.
///
/// `*_class` hold one entry per class, `*_grad` are dense over the whole parameter
/// vector but only the model blocks are written by workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partials {
    pub ll: f64,
    pub cll: f64,
    pub ll_class: Vec<f64>,
    pub cll_class: Vec<f64>,
    pub ll_grad: Vec<f64>,
    pub cll_grad: Vec<f64>,
}

impl Partials {
    pub fn new(classes: usize, dimension: usize) -> Self {
        Self {
            ll: 0.,
            cll: 0.,
            ll_class: vec![0.; classes],
            cll_class: vec![0.; classes],
            ll_grad: vec![0.; dimension],
            cll_grad: vec![0.; dimension],
        }
    }

    /// Zeroes the sums, the gradient buffers only if `gradient` is set.
    pub fn clear(&mut self, gradient: bool) {
        self.ll = 0.;
        self.cll = 0.;
        if gradient {
            self.ll_class.fill(0.);
            self.cll_class.fill(0.);
            self.ll_grad.fill(0.);
            self.cll_grad.fill(0.);
        }
    }

    /// Adds `other` into `self`.
    pub fn merge(&mut self, other: &Partials, gradient: bool) {
        self.ll += other.ll;
        self.cll += other.cll;
        if gradient {
            add_into(&mut self.ll_class, &other.ll_class);
            add_into(&mut self.cll_class, &other.cll_class);
            add_into(&mut self.ll_grad, &other.ll_grad);
            add_into(&mut self.cll_grad, &other.cll_grad);
        }
    }
}

fn add_into(dst: &mut [f64], src: &[f64]) {
    dst.iter_mut().zip(src).for_each(|(d, s)| *d += s);
}

/// The private state of one worker.
///
/// Owns its own clones of the scoring functions and every buffer it writes, so
/// workers run without synchronization.
pub struct WorkerScratch {
    id: usize,
    scores: Vec<Box<dyn ScoringFunction>>,
    assignment: Assignment,
    grads: Vec<SparseGrad>,
    help: Vec<f64>,
    partials: Partials,
}

impl WorkerScratch {
    /// Creates a new `WorkerScratch`.
    ///
    /// # Arguments
    /// * `id` - The index of the worker.
    /// * `scores` - The worker's own scoring functions, one per class.
    /// * `dimension` - The dimension of the parameter vector.
    pub fn new(id: usize, scores: Vec<Box<dyn ScoringFunction>>, dimension: usize) -> Self {
        let classes = scores.len();

        Self {
            id,
            scores,
            assignment: Assignment::new(),
            grads: vec![SparseGrad::new(); classes],
            help: vec![0.; classes],
            partials: Partials::new(classes, dimension),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn scores(&self) -> &[Box<dyn ScoringFunction>] {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut [Box<dyn ScoringFunction>] {
        &mut self.scores
    }

    pub fn into_scores(self) -> Vec<Box<dyn ScoringFunction>> {
        self.scores
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn assign(&mut self, assignment: Assignment) {
        self.assignment = assignment;
    }

    pub fn partials(&self) -> &Partials {
        &self.partials
    }

    /// Returns the number of sequences assigned to this worker.
    pub fn workload(&self) -> usize {
        self.assignment.iter().map(|(_, range)| range.len()).sum()
    }

    /// Runs `task` on this worker's share of the data.
    pub fn run(&mut self, task: Task, ctx: Context<'_>) -> Result<()> {
        self.set_params(ctx)?;

        match task {
            Task::SetParams => Ok(()),
            Task::Evaluate => self.accumulate(ctx, false),
            Task::Gradient => self.accumulate(ctx, true),
        }
    }

    fn set_params(&mut self, ctx: Context<'_>) -> Result<()> {
        for (class, score) in self.scores.iter_mut().enumerate() {
            score.set_params(&ctx.params[ctx.layout.class_range(class)])?;
        }
        Ok(())
    }

    fn accumulate(&mut self, ctx: Context<'_>, gradient: bool) -> Result<()> {
        self.partials.clear(gradient);

        let worker = self.id;
        // The assignment is moved out so the loop can borrow the rest mutably.
        let assignment = std::mem::take(&mut self.assignment);
        let result = assignment.iter().try_for_each(|(class, range)| {
            range.clone().try_for_each(|sequence| {
                self.sequence(ctx, *class, sequence, gradient)
                    .map_err(|source| ObjectiveErr::Worker {
                        worker,
                        class: *class,
                        sequence,
                        source,
                    })
            })
        });
        self.assignment = assignment;

        result
    }

    fn sequence(
        &mut self,
        ctx: Context<'_>,
        class: usize,
        sequence: usize,
        gradient: bool,
    ) -> std::result::Result<(), ScoreErr> {
        let seq = ctx.data.data(class).get(sequence);
        let weight = ctx.data.weights(class)[sequence];
        let log_clazz = ctx.weights.log_clazz();
        let principle = ctx.principle;
        let partials = &mut self.partials;

        if !principle.uses_conditional_likelihood() {
            let own = if gradient {
                let grad = &mut self.grads[class];
                grad.clear();
                let score = self.scores[class].log_score_and_gradient(seq, 0, grad)?;
                partials.ll_class[class] += weight;
                grad.scatter(&mut partials.ll_grad, ctx.layout.offset(class), weight);
                score
            } else {
                self.scores[class].log_score(seq, 0)?
            };

            partials.ll += weight * (log_clazz[class] + own);
            return Ok(());
        }

        for (j, score) in self.scores.iter().enumerate() {
            self.help[j] = log_clazz[j]
                + if gradient {
                    let grad = &mut self.grads[j];
                    grad.clear();
                    score.log_score_and_gradient(seq, 0, grad)?
                } else {
                    score.log_score(seq, 0)?
                };
        }

        let own = self.help[class];
        if principle.uses_likelihood() {
            partials.ll += weight * own;
            if gradient {
                partials.ll_class[class] += weight;
                self.grads[class].scatter(&mut partials.ll_grad, ctx.layout.offset(class), weight);
            }
        }

        // `help` holds the posterior class probabilities afterwards.
        let norm = log_sum_normalise(&mut self.help);
        partials.cll += weight * (own - norm);

        if gradient {
            for (j, (grad, &posterior)) in self.grads.iter().zip(&self.help).enumerate() {
                let indicator = if j == class { 1. } else { 0. };
                let factor = weight * (indicator - posterior);
                partials.cll_class[j] += factor;
                grad.scatter(&mut partials.cll_grad, ctx.layout.offset(j), factor);
            }
        }

        Ok(())
    }
}
