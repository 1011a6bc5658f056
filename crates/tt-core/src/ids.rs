use core::fmt;

/// Position of a species in its phase's species list.
///
/// Assigned once at phase setup; the thermo engine reads it but never
/// renumbers species.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesIndex(usize);

impl SpeciesIndex {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Recover the 0-based index.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for SpeciesIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Debug for SpeciesIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpeciesIndex({})", self.0)
    }
}

impl fmt::Display for SpeciesIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
