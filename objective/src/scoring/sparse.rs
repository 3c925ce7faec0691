/// The non-zero partial derivatives of a single scored sequence.
///
/// Indices are local to the scoring function that produced them. The buffers keep
/// their capacity across `clear` calls so a warmed up instance stops allocating.
#[derive(Debug, Clone, Default)]
pub struct SparseGrad {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseGrad {
    /// Creates a new empty `SparseGrad`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
        self.values.clear();
    }

    /// Records the partial derivative `value` for the local parameter `index`.
    pub fn push(&mut self, index: usize, value: f64) {
        self.indices.push(index);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates the recorded `(index, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Adds `factor * value` for every recorded pair into `dense[offset + index]`.
    ///
    /// # Arguments
    /// * `dense` - The dense destination buffer.
    /// * `offset` - The global index of this function's first parameter.
    /// * `factor` - The scale applied to every partial derivative.
    pub fn scatter(&self, dense: &mut [f64], offset: usize, factor: f64) {
        for (index, value) in self.iter() {
            dense[offset + index] += factor * value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_keeps_capacity() {
        let mut grad = SparseGrad::new();
        (0..16).for_each(|i| grad.push(i, 1.));
        let capacity = grad.indices.capacity();

        grad.clear();

        assert!(grad.is_empty());
        assert_eq!(grad.indices.capacity(), capacity);
    }

    #[test]
    fn scatter_with_repeated_indices() {
        let mut grad = SparseGrad::new();
        grad.push(0, 1.);
        grad.push(2, 0.5);
        grad.push(0, 2.);

        let mut dense = [0.; 5];
        grad.scatter(&mut dense, 2, 2.);

        assert_eq!(dense, [0., 0., 6., 0., 1.]);
    }
}
