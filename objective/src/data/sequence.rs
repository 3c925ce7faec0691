use crate::{ObjectiveErr, Result};

/// The number of symbols of the DNA alphabet.
pub const DNA_SIZE: usize = 4;

/// A sequence of discrete symbols, each symbol an index into an alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    symbols: Box<[u8]>,
}

impl Sequence {
    /// Creates a new `Sequence` from already encoded symbols.
    pub fn new(symbols: impl Into<Box<[u8]>>) -> Self {
        Self {
            symbols: symbols.into(),
        }
    }

    /// Encodes a DNA string, `A`, `C`, `G` and `T` map to `0..4` in that order.
    ///
    /// # Arguments
    /// * `text` - The nucleotides, case insensitive.
    ///
    /// # Returns
    /// The encoded sequence or an `InvalidSymbol` error.
    pub fn from_dna(text: &str) -> Result<Self> {
        let symbols = text
            .chars()
            .enumerate()
            .map(|(position, symbol)| match symbol.to_ascii_uppercase() {
                'A' => Ok(0),
                'C' => Ok(1),
                'G' => Ok(2),
                'T' => Ok(3),
                _ => Err(ObjectiveErr::InvalidSymbol { symbol, position }),
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self::new(symbols))
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol at `position`, `None` if out of bounds.
    pub fn symbol(&self, position: usize) -> Option<u8> {
        self.symbols.get(position).copied()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }
}
