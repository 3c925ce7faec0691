mod evaluator;
mod partition;
mod worker;

pub use evaluator::ParallelEvaluator;
pub use partition::{Assignment, partition};
pub use worker::{Context, Partials, Task, WorkerScratch};
