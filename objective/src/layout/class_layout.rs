/// How the class parameters occupy the front of the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLayout {
    /// Every class owns one free parameter.
    AllFree,
    /// The last class has no parameter of its own, its log-weight is the negated sum
    /// of the other log-weights.
    LastEliminated,
}

impl ClassLayout {
    /// Returns the layout matching the `free_params` switch.
    pub fn new(free_params: bool) -> Self {
        if free_params {
            ClassLayout::LastEliminated
        } else {
            ClassLayout::AllFree
        }
    }

    /// Returns the number of class parameters stored for `classes` classes.
    pub fn free_count(&self, classes: usize) -> usize {
        match self {
            ClassLayout::AllFree => classes,
            ClassLayout::LastEliminated => classes.saturating_sub(1),
        }
    }

    /// Returns the index of the class without a stored parameter, if any.
    pub fn eliminated(&self, classes: usize) -> Option<usize> {
        match self {
            ClassLayout::AllFree => None,
            ClassLayout::LastEliminated => classes.checked_sub(1),
        }
    }

    /// Routes a derivative with respect to the log-weight of `class` onto the stored
    /// class parameters.
    ///
    /// A class owning a parameter receives the value directly. The eliminated class
    /// depends on every stored parameter with slope `-1`, so every stored entry
    /// receives the negated value.
    ///
    /// # Arguments
    /// * `class` - The class the derivative belongs to.
    /// * `value` - The derivative.
    /// * `free` - The stored class parameters, `free_count` long.
    pub fn spread(&self, class: usize, value: f64, free: &mut [f64]) {
        match self {
            ClassLayout::LastEliminated if class == free.len() => {
                free.iter_mut().for_each(|f| *f -= value)
            }
            _ => free[class] += value,
        }
    }

    /// Spreads one derivative per class onto the stored class parameters.
    ///
    /// # Arguments
    /// * `full` - One value per class.
    /// * `free` - The stored class parameters, overwritten.
    pub fn fold(&self, full: &[f64], free: &mut [f64]) {
        free.fill(0.);
        for (class, &value) in full.iter().enumerate() {
            self.spread(class, value, free);
        }
    }

    /// Adds `value` to the log-weight of `class` relative to every other class.
    ///
    /// With an eliminated class the log-weights sum to zero, so the added value is
    /// recentred: every class loses `value / classes`, the stored entry of `class`, if
    /// any, gains `value` on top. The stored entries are updated in place.
    ///
    /// # Arguments
    /// * `class` - The class whose log-weight changes.
    /// * `value` - The additive term.
    /// * `free` - The stored class parameters, `free_count` long.
    pub fn shift(&self, class: usize, value: f64, free: &mut [f64]) {
        match self {
            ClassLayout::AllFree => free[class] += value,
            ClassLayout::LastEliminated => {
                let share = value / (free.len() + 1) as f64;
                free.iter_mut().for_each(|f| *f -= share);
                if let Some(f) = free.get_mut(class) {
                    *f += value;
                }
            }
        }
    }

    /// Encodes one log-weight per class as stored class parameters.
    ///
    /// The encoded weights give the same class probabilities as `full` once expanded.
    pub fn encode(&self, full: &[f64], free: &mut [f64]) {
        free.fill(0.);
        for (class, &value) in full.iter().enumerate() {
            self.shift(class, value, free);
        }
    }

    /// Expands the stored class parameters into one log-weight per class.
    pub fn expand(&self, free: &[f64], full: &mut [f64]) {
        full[..free.len()].copy_from_slice(free);
        if let Some(last) = self.eliminated(full.len()) {
            full[last] = -free.iter().sum::<f64>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn free_count() {
        assert_eq!(ClassLayout::AllFree.free_count(3), 3);
        assert_eq!(ClassLayout::LastEliminated.free_count(3), 2);
        assert_eq!(ClassLayout::LastEliminated.free_count(1), 0);
    }

    #[test]
    fn spread_onto_own_entry() {
        let mut free = [1., 2.];
        ClassLayout::LastEliminated.spread(1, 0.5, &mut free);
        assert_eq!(free, [1., 2.5]);

        let mut free = [1., 2., 3.];
        ClassLayout::AllFree.spread(2, 1., &mut free);
        assert_eq!(free, [1., 2., 4.]);
    }

    #[test]
    fn spread_eliminated_class() {
        let mut free = [1., 2.];
        ClassLayout::LastEliminated.spread(2, 0.5, &mut free);
        assert_eq!(free, [0.5, 1.5]);
    }

    #[test]
    fn fold_is_the_chain_rule_of_expand() {
        let full = [0.3, -1., 2.];
        let mut free = [0.; 2];

        ClassLayout::LastEliminated.fold(&full, &mut free);

        assert_eq!(free, [0.3 - 2., -1. - 2.]);
    }

    #[test]
    fn expand_reconstructs_eliminated() {
        let mut full = [0.; 3];
        ClassLayout::LastEliminated.expand(&[1., 0.5], &mut full);
        assert_eq!(full, [1., 0.5, -1.5]);

        let mut full = [0.; 2];
        ClassLayout::AllFree.expand(&[1., 0.5], &mut full);
        assert_eq!(full, [1., 0.5]);
    }

    fn relative(full: &[f64]) -> Vec<f64> {
        full.iter().map(|v| v - full[0]).collect()
    }

    #[test]
    fn shift_moves_one_class_relative_to_the_others() {
        let layout = ClassLayout::LastEliminated;

        for class in 0..3 {
            let mut free = [0.4, -0.1];
            let mut before = [0.; 3];
            layout.expand(&free, &mut before);

            layout.shift(class, 0.6, &mut free);
            let mut after = [0.; 3];
            layout.expand(&free, &mut after);

            for other in (0..3).filter(|&c| c != class) {
                let moved = (after[class] - after[other]) - (before[class] - before[other]);
                assert!((moved - 0.6).abs() < EPS, "class {class} against {other}");
            }
        }
    }

    #[test]
    fn encode_keeps_relative_log_weights() {
        let full = [-2.3, 0.7, 1.1];

        let mut free = [0.; 2];
        ClassLayout::LastEliminated.encode(&full, &mut free);
        let mut expanded = [0.; 3];
        ClassLayout::LastEliminated.expand(&free, &mut expanded);

        for (got, want) in relative(&expanded).iter().zip(relative(&full)) {
            assert!((got - want).abs() < EPS);
        }

        let mut free = [0.; 3];
        ClassLayout::AllFree.encode(&full, &mut free);
        assert_eq!(free, full);
    }
}
