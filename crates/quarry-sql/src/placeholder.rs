use std::fmt;

/// A positional parameter reference, rendered PostgreSQL style as `$n`.
///
/// Numbering is 1-based: `Placeholder(1)` refers to the first bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(pub usize);

impl Placeholder {
    pub const FIRST: Placeholder = Placeholder(1);

    pub fn next(self) -> Placeholder {
        Placeholder(self.0 + 1)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
