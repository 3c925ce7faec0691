mod gendismix;
mod optimizable;

pub use gendismix::GenDisMixFunction;
pub use optimizable::{DifferentiableFunction, OptimizableFunction};
