//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit.
///
/// Qubit `k` corresponds to bit `k` of a basis-state index, so qubit 0 is the
/// least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a `usize`, for indexing and bit shifts.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit mask selecting this qubit in a basis-state index.
    #[inline]
    pub fn mask(self) -> usize {
        1usize << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}
