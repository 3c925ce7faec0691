use super::DataSet;
use crate::{ObjectiveErr, Result};

/// The per-class data sets together with one weight per sequence.
///
/// The weight sums are computed once on construction, `sums()[c]` is the total
/// weight of class `c` and the last entry is the grand total.
#[derive(Debug, Clone)]
pub struct WeightedData {
    data: Vec<DataSet>,
    weights: Vec<Vec<f64>>,
    sums: Vec<f64>,
}

impl WeightedData {
    /// Creates a new `WeightedData`.
    ///
    /// # Arguments
    /// * `data` - One data set per class.
    /// * `weights` - One weight array per class, as long as its data set.
    ///
    /// # Returns
    /// An error if the shapes don't match, a weight is negative or not finite,
    /// or the total weight isn't positive.
    pub fn new(data: Vec<DataSet>, weights: Vec<Vec<f64>>) -> Result<Self> {
        if weights.len() != data.len() {
            return Err(ObjectiveErr::ShapeMismatch {
                what: "weight arrays",
                got: weights.len(),
                expected: data.len(),
            });
        }

        let mut sums = Vec::with_capacity(data.len() + 1);

        for (class, (set, class_weights)) in data.iter().zip(&weights).enumerate() {
            if class_weights.len() != set.len() {
                return Err(ObjectiveErr::ShapeMismatch {
                    what: "class weights",
                    got: class_weights.len(),
                    expected: set.len(),
                });
            }

            if let Some((sequence, &weight)) = class_weights
                .iter()
                .enumerate()
                .find(|(_, w)| !w.is_finite() || **w < 0.)
            {
                return Err(ObjectiveErr::InvalidWeight {
                    class,
                    sequence,
                    weight,
                });
            }

            sums.push(class_weights.iter().sum());
        }

        let total: f64 = sums.iter().sum();
        if total <= 0. {
            return Err(ObjectiveErr::EmptyData);
        }
        sums.push(total);

        Ok(Self {
            data,
            weights,
            sums,
        })
    }

    /// Creates a new `WeightedData` where every sequence weighs `1`.
    pub fn uniform(data: Vec<DataSet>) -> Result<Self> {
        let weights = data.iter().map(|set| vec![1.; set.len()]).collect();
        Self::new(data, weights)
    }

    /// Returns the number of classes.
    pub fn classes(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self, class: usize) -> &DataSet {
        &self.data[class]
    }

    pub fn weights(&self, class: usize) -> &[f64] {
        &self.weights[class]
    }

    /// Returns the per-class weight sums followed by the grand total.
    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Returns the grand total weight.
    pub fn total_weight(&self) -> f64 {
        self.sums[self.data.len()]
    }

    /// Returns the number of sequences of every class.
    pub fn lens(&self) -> Vec<usize> {
        self.data.iter().map(DataSet::len).collect()
    }
}
