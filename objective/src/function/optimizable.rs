use crate::{Result, data::DataSet, init::InitKind};

/// A function an outer optimizer can query for values and gradients.
pub trait DifferentiableFunction {
    /// Computes the value of the function at `params`.
    fn evaluate(&mut self, params: &[f64]) -> Result<f64>;

    /// Computes the gradient of the function at `params`.
    fn gradient(&mut self, params: &[f64]) -> Result<Vec<f64>>;

    /// Returns the dimension of the parameter vector.
    fn dimension(&self) -> usize;
}

/// A differentiable function defined by weighted data.
pub trait OptimizableFunction: DifferentiableFunction {
    /// Replaces the data and the weights of every class.
    ///
    /// # Arguments
    /// * `data` - One data set per class.
    /// * `weights` - One weight array per class, as long as its data set.
    ///
    /// # Returns
    /// An error if the shapes don't match, the function is left untouched then.
    fn set_data_and_weights(&mut self, data: Vec<DataSet>, weights: Vec<Vec<f64>>) -> Result<()>;

    /// Returns a starting point for the optimization.
    fn parameters(&self, kind: InitKind) -> Result<Vec<f64>>;

    /// Rebuilds the internal state after the scoring functions changed.
    fn reset(&mut self) -> Result<()>;
}
