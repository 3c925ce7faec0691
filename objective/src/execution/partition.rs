use std::ops::Range;

/// The sequences assigned to a worker, as `(class, sequence range)` slices.
pub type Assignment = Vec<(usize, Range<usize>)>;

/// Splits the sequences of all classes into `workers` contiguous ranges.
///
/// The classes are laid end to end, worker `t` gets a range of the flattened
/// `(class, sequence)` order and range sizes differ by at most one. Ranges may be
/// empty when there are fewer sequences than workers.
///
/// # Arguments
/// * `lens` - The number of sequences of every class.
/// * `workers` - The number of workers, positive.
///
/// # Returns
/// One assignment per worker.
pub fn partition(lens: &[usize], workers: usize) -> Vec<Assignment> {
    let total: usize = lens.iter().sum();
    let base = total / workers;
    let rem = total % workers;

    let mut assignments = Vec::with_capacity(workers);
    let mut start = 0;

    for worker in 0..workers {
        let end = start + base + usize::from(worker < rem);
        assignments.push(slice(lens, start..end));
        start = end;
    }

    assignments
}

/// Cuts the flattened range `flat` back into per-class sequence ranges.
fn slice(lens: &[usize], flat: Range<usize>) -> Assignment {
    let mut slices = Vec::new();
    let mut class_start = 0;

    for (class, &len) in lens.iter().enumerate() {
        let class_end = class_start + len;
        let start = flat.start.max(class_start);
        let end = flat.end.min(class_end);

        if start < end {
            slices.push((class, start - class_start..end - class_start));
        }

        class_start = class_end;
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(assignments: &[Assignment]) -> Vec<usize> {
        assignments
            .iter()
            .map(|a| a.iter().map(|(_, r)| r.len()).sum())
            .collect()
    }

    #[test]
    fn balanced_within_one() {
        let assignments = partition(&[3, 4], 3);

        assert_eq!(sizes(&assignments), [3, 2, 2]);
        assert_eq!(assignments[0], [(0, 0..3)]);
        assert_eq!(assignments[1], [(1, 0..2)]);
        assert_eq!(assignments[2], [(1, 2..4)]);
    }

    #[test]
    fn range_across_classes() {
        let assignments = partition(&[3, 0, 3], 2);

        assert_eq!(assignments[0], [(0, 0..3)]);
        assert_eq!(assignments[1], [(2, 0..3)]);

        let assignments = partition(&[2, 2], 1);
        assert_eq!(assignments[0], [(0, 0..2), (1, 0..2)]);
    }

    #[test]
    fn more_workers_than_sequences() {
        let assignments = partition(&[1, 1], 4);

        assert_eq!(sizes(&assignments), [1, 1, 0, 0]);
        assert!(assignments[3].is_empty());
    }

    #[test]
    fn covers_every_sequence_once() {
        let lens = [5, 1, 7, 2];
        let assignments = partition(&lens, 4);
        let mut seen: Vec<Vec<usize>> = lens.iter().map(|&n| vec![0; n]).collect();

        for (class, range) in assignments.iter().flatten() {
            for sequence in range.clone() {
                seen[*class][sequence] += 1;
            }
        }

        assert!(seen.iter().flatten().all(|&n| n == 1));
    }
}
