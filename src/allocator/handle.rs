//! Heap handles - offsets standing in for raw addresses
//!
//! A `HeapRef` is only turned into an address by the region that issued it,
//! at the C boundary.

use core::fmt;

/// Opaque reference to a heap location, stored as a byte offset from the base
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct HeapRef(usize);

impl HeapRef {
    #[inline]
    pub(crate) const fn from_offset(offset: usize) -> Self {
        Self(offset)
    }

    /// Byte offset from the region base
    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }

    /// Whether the offset is a multiple of `align` (power of two)
    #[inline]
    pub const fn is_aligned_to(self, align: usize) -> bool {
        self.0 & (align - 1) == 0
    }
}

impl fmt::Display for HeapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heap+{:#x}", self.0)
    }
}
