use std::ops::Range;

use super::ClassLayout;

/// Maps the flat parameter vector onto class parameters and per-class model blocks.
///
/// `offsets[0]` is the end of the class segment, `offsets[c]..offsets[c + 1]` is the
/// block of class `c` and `offsets[classes]` is the dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLayout {
    class_layout: ClassLayout,
    offsets: Vec<usize>,
}

impl ParamLayout {
    /// Creates a new `ParamLayout`.
    ///
    /// # Arguments
    /// * `class_layout` - How the class parameters are stored.
    /// * `block_lens` - The number of parameters of every class's scoring function.
    pub fn new(class_layout: ClassLayout, block_lens: &[usize]) -> Self {
        let mut offsets = Vec::with_capacity(block_lens.len() + 1);
        let mut end = class_layout.free_count(block_lens.len());
        offsets.push(end);

        for len in block_lens {
            end += len;
            offsets.push(end);
        }

        Self {
            class_layout,
            offsets,
        }
    }

    pub fn class_layout(&self) -> ClassLayout {
        self.class_layout
    }

    pub fn classes(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Returns the number of stored class parameters.
    pub fn free_classes(&self) -> usize {
        self.offsets[0]
    }

    pub fn dimension(&self) -> usize {
        self.offsets[self.classes()]
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Returns the global index of the first parameter of class `class`'s block.
    pub fn offset(&self, class: usize) -> usize {
        self.offsets[class]
    }

    /// Returns the range of class `class`'s block in the parameter vector.
    pub fn class_range(&self, class: usize) -> Range<usize> {
        self.offsets[class]..self.offsets[class + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_all_free() {
        let layout = ParamLayout::new(ClassLayout::AllFree, &[4, 0, 2]);

        assert_eq!(layout.offsets(), [3, 7, 7, 9]);
        assert_eq!(layout.dimension(), 9);
        assert_eq!(layout.class_range(0), 3..7);
        assert!(layout.class_range(1).is_empty());
    }

    #[test]
    fn offsets_last_eliminated() {
        let layout = ParamLayout::new(ClassLayout::LastEliminated, &[4, 2]);

        assert_eq!(layout.free_classes(), 1);
        assert_eq!(layout.offsets(), [1, 5, 7]);
        assert_eq!(layout.classes(), 2);
    }
}
