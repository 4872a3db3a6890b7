use std::fmt;

use serde::{Deserialize, Serialize};

/// A location inside a [`Content`](crate::Content): section index plus item
/// index within that section.
///
/// Ordering is section-major, so sorting a list of paths yields on-screen
/// order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// The first item of the first section.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
