//! Heap allocator - monotonic bump allocation over one reserved region
//!
//! Design: Two layers:
//! 1. `HeapRegion` owns the raw block reserved at startup
//! 2. `BumpAllocator` (single owner) or `SharedBumpAllocator` (atomic
//!    cursor) hands out 4-byte granular ranges from it
//!
//! Nothing is ever freed or reused. Allocations return `HeapRef` handles;
//! raw addresses only appear at the C boundary.

mod bump;
mod handle;
mod region;
mod shared;

#[cfg(test)]
mod tests;

pub use bump::{BumpAllocator, ALLOC_ALIGN};
pub use handle::HeapRef;
pub use region::{HeapRegion, REGION_ALIGN};
pub use shared::SharedBumpAllocator;

/// Default heap capacity (16 MiB)
pub const DEFAULT_HEAP_CAPACITY: usize = 16 * 1024 * 1024;

/// Allocator statistics for monitoring and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    pub capacity: usize,
    pub used: usize,
    pub remaining: usize,
    pub allocations: u64,
    pub failed_allocations: u64,
}
