use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use super::{Context, Partials, Task, WorkerScratch, partition};
use crate::{ObjectiveErr, Result, scoring::ScoringFunction};

/// Runs tasks on a fixed pool of workers and merges their partial results.
///
/// The pool is built once, worker `0` holds the primary scoring functions every
/// other worker clones on `reset`.
pub struct ParallelEvaluator {
    pool: ThreadPool,
    workers: Vec<WorkerScratch>,
}

impl ParallelEvaluator {
    /// Creates a new `ParallelEvaluator`.
    ///
    /// # Arguments
    /// * `threads` - The number of workers and pool threads, positive.
    /// * `scores` - The primary scoring functions, one per class.
    ///
    /// # Returns
    /// An error if `threads` is zero or the pool can't be built.
    pub fn new(threads: usize, scores: Vec<Box<dyn ScoringFunction>>) -> Result<Self> {
        if threads == 0 {
            return Err(ObjectiveErr::InvalidThreads(threads));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("objective-worker-{i}"))
            .build()?;

        let mut evaluator = Self {
            pool,
            workers: vec![WorkerScratch::new(0, scores, 0)],
        };
        evaluator.reset(0);

        Ok(evaluator)
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Returns the primary scoring functions.
    pub fn primary(&self) -> &[Box<dyn ScoringFunction>] {
        self.workers[0].scores()
    }

    pub fn primary_mut(&mut self) -> &mut [Box<dyn ScoringFunction>] {
        self.workers[0].scores_mut()
    }

    pub fn workers(&self) -> &[WorkerScratch] {
        &self.workers
    }

    /// Replaces the primary scoring functions, `reset` has to follow.
    pub fn replace_primary(&mut self, scores: Vec<Box<dyn ScoringFunction>>) {
        self.workers[0] = WorkerScratch::new(0, scores, 0);
    }

    /// Rebuilds every worker from the primary scoring functions.
    ///
    /// # Arguments
    /// * `dimension` - The dimension of the parameter vector.
    pub fn reset(&mut self, dimension: usize) {
        let threads = self.threads();
        let primary = self.workers.swap_remove(0);
        let scores: Vec<_> = primary.scores().to_vec();
        let assignment = primary.assignment().clone();

        let mut workers = Vec::with_capacity(threads);
        workers.push(WorkerScratch::new(0, primary.into_scores(), dimension));
        workers[0].assign(assignment);
        workers.extend((1..threads).map(|id| WorkerScratch::new(id, scores.clone(), dimension)));

        self.workers = workers;
    }

    /// Splits the sequences of every class among the workers.
    ///
    /// # Arguments
    /// * `lens` - The number of sequences of every class.
    pub fn assign(&mut self, lens: &[usize]) {
        let assignments = partition(lens, self.workers.len());

        for (worker, assignment) in self.workers.iter_mut().zip(assignments) {
            worker.assign(assignment);
            if worker.workload() == 0 {
                warn!(worker = worker.id(); "worker has no sequences assigned");
            }
        }

        debug!(
            workers = self.workers.len(),
            sequences = lens.iter().sum::<usize>();
            "partitioned sequences"
        );
    }

    /// Runs `task` on every worker and waits for all of them.
    ///
    /// # Returns
    /// The error of the lowest failing worker, if any.
    pub fn run(&mut self, task: Task, ctx: Context<'_>) -> Result<()> {
        let Self { pool, workers } = self;

        debug!(workers = workers.len(); "dispatching {task:?}");

        let results: Vec<Result<()>> = pool.install(|| {
            workers
                .par_iter_mut()
                .map(|worker| worker.run(task, ctx))
                .collect()
        });

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed = failed; "{task:?} aborted, workers failed");
        }

        results.into_iter().collect()
    }

    /// Sums the partial results of all workers in worker order.
    ///
    /// Repeated calls with the same inputs and thread count give bit-identical
    /// results. A different thread count moves the partition boundaries and may
    /// change the floating-point rounding of the sums.
    ///
    /// # Arguments
    /// * `total` - The destination, sized like the workers' partials.
    /// * `gradient` - Whether the gradient buffers are merged too.
    pub fn aggregate(&self, total: &mut Partials, gradient: bool) {
        total.clear(gradient);
        for worker in &self.workers {
            total.merge(worker.partials(), gradient);
        }
    }
}
