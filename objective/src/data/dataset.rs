use std::{fs, path::Path};

use super::Sequence;
use crate::Result;

/// An ordered collection of sequences belonging to the same class.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    sequences: Vec<Sequence>,
}

impl DataSet {
    /// Creates a new `DataSet`.
    pub fn new(sequences: Vec<Sequence>) -> Self {
        Self { sequences }
    }

    /// Builds a `DataSet` out of DNA strings.
    ///
    /// # Arguments
    /// * `lines` - One sequence per item, blank items are skipped.
    ///
    /// # Returns
    /// The data set or the first encoding error.
    pub fn from_dna<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sequences = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| Sequence::from_dna(line.as_ref().trim()))
            .collect::<Result<_>>()?;

        Ok(Self::new(sequences))
    }

    /// Reads a text file holding one DNA sequence per line.
    pub fn read_dna(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_dna(content.lines())
    }

    /// Returns the number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns the sequence at `index`.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn get(&self, index: usize) -> &Sequence {
        &self.sequences[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }
}
