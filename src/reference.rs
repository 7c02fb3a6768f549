use std::fmt::{Display, Formatter};

/// Opaque handle to a set owned by a [`Family`](crate::family::Family).
///
/// Handles are cheap to copy and compare by identity: two handles are equal
/// iff they refer to the very same set, regardless of contents.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SetRef(u32);

impl SetRef {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the index of the set inside its family.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for SetRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}
