use crate::{
    ObjectiveErr, Result,
    layout::ClassLayout,
    logsum::log_sum_normalise,
};

/// The log-weights of the classes derived from the class segment of a parameter vector.
///
/// `log_clazz` always has one entry per class, the eliminated class, if any, is
/// reconstructed from the stored ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassWeightState {
    layout: ClassLayout,
    log_clazz: Vec<f64>,
    clazz: Vec<f64>,
}

impl ClassWeightState {
    /// Creates a new `ClassWeightState` where every log-weight is `0`.
    pub fn new(layout: ClassLayout, classes: usize) -> Self {
        Self {
            layout,
            log_clazz: vec![0.; classes],
            clazz: vec![1.; classes],
        }
    }

    /// Creates a new `ClassWeightState` from the stored class parameters.
    ///
    /// # Arguments
    /// * `layout` - How the class parameters are stored.
    /// * `classes` - The number of classes.
    /// * `free` - The class segment of the parameter vector.
    pub fn from_params(layout: ClassLayout, classes: usize, free: &[f64]) -> Self {
        let mut state = Self::new(layout, classes);
        state.update(free);
        state
    }

    /// Overwrites the log-weights with the ones encoded by `free`.
    pub fn update(&mut self, free: &[f64]) {
        self.layout.expand(free, &mut self.log_clazz);
        self.refresh();
    }

    fn refresh(&mut self) {
        for (clazz, log_clazz) in self.clazz.iter_mut().zip(&self.log_clazz) {
            *clazz = log_clazz.exp();
        }
    }

    pub fn classes(&self) -> usize {
        self.log_clazz.len()
    }

    pub fn log_clazz(&self) -> &[f64] {
        &self.log_clazz
    }

    pub fn clazz(&self) -> &[f64] {
        &self.clazz
    }

    /// Returns the stored class parameters encoding this state.
    pub fn free_params(&self) -> &[f64] {
        &self.log_clazz[..self.layout.free_count(self.classes())]
    }

    /// Adds `term` to the log-weight of `class` relative to every other class.
    ///
    /// With an eliminated class the stored log-weights are recentred and the
    /// eliminated one is derived again, so the class probabilities change as if `term`
    /// was added to that single class.
    ///
    /// # Returns
    /// A `ClassIndexOutOfRange` error if `class` is not a class index.
    pub fn add_term(&mut self, class: usize, term: f64) -> Result<()> {
        let classes = self.classes();
        if class >= classes {
            return Err(ObjectiveErr::ClassIndexOutOfRange {
                index: class,
                classes,
            });
        }

        let free_count = self.layout.free_count(classes);
        self.layout
            .shift(class, term, &mut self.log_clazz[..free_count]);

        let free = self.log_clazz[..free_count].to_vec();
        self.update(&free);

        Ok(())
    }

    /// Returns the normalized class probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        let mut probs = self.log_clazz.clone();
        log_sum_normalise(&mut probs);
        probs
    }
}
