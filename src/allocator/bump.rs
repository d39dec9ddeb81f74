//! Bump pointer allocation - O(1) fast path
//!
//! Design: Cursor only ever moves forward. Requests are rounded up to
//! the 4-byte allocation granule; a request that no longer fits is
//! reported as `OutOfMemory` and leaves the cursor where it was.

use super::{HeapRef, HeapRegion, HeapStats};
use crate::error::HeapError;
use crate::logging::{log_allocation, log_allocation_failure, log_heap_init};

/// Allocation granule in bytes
pub const ALLOC_ALIGN: usize = 4;

/// Single-owner bump allocator over a `HeapRegion`
pub struct BumpAllocator {
    region: HeapRegion,
    cursor: usize,
    allocations: u64,
    failed_allocations: u64,
}

impl BumpAllocator {
    /// Start allocating at the base of `region`
    pub fn new(region: HeapRegion) -> Self {
        log_heap_init(region.base(), region.size());
        Self {
            region,
            cursor: 0,
            allocations: 0,
            failed_allocations: 0,
        }
    }

    /// Reserve a fresh region of `capacity` bytes and allocate from it
    pub fn with_capacity(capacity: usize) -> Result<Self, HeapError> {
        HeapRegion::reserve(capacity).map(Self::new)
    }

    /// Hand out `size` bytes at the cursor and advance by the rounded size
    ///
    /// The returned memory is not initialized.
    #[inline]
    pub fn allocate(&mut self, size: i32) -> Result<HeapRef, HeapError> {
        let rounded = rounded_size(size)?;
        let remaining = self.remaining();

        if rounded > remaining {
            self.failed_allocations += 1;
            let err = HeapError::OutOfMemory {
                requested: rounded,
                remaining,
            };
            log_allocation_failure(&err);
            return Err(err);
        }

        let handle = HeapRef::from_offset(self.cursor);
        self.cursor += rounded;
        self.allocations += 1;
        log_allocation(size, handle.offset());
        Ok(handle)
    }

    /// The backing region
    #[inline]
    pub fn region(&self) -> &HeapRegion {
        &self.region
    }

    /// Raw address for a handle issued by this allocator
    #[inline]
    pub fn address_of(&self, handle: HeapRef) -> usize {
        self.region.address_of(handle)
    }

    /// Current cursor as a handle (where the next allocation will start)
    #[inline]
    pub fn cursor(&self) -> HeapRef {
        HeapRef::from_offset(self.cursor)
    }

    /// Bytes handed out so far (rounded)
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes left before exhaustion
    #[inline]
    pub fn remaining(&self) -> usize {
        self.region.size() - self.cursor
    }

    pub fn stats(&self) -> HeapStats {
        HeapStats {
            capacity: self.region.size(),
            used: self.cursor,
            remaining: self.remaining(),
            allocations: self.allocations,
            failed_allocations: self.failed_allocations,
        }
    }
}

/// Request size rounded up to the allocation granule
///
/// Negative sizes are rejected; zero stays zero.
#[inline(always)]
pub(crate) fn rounded_size(size: i32) -> Result<usize, HeapError> {
    if size < 0 {
        return Err(HeapError::InvalidSize { size });
    }
    Ok(align_up(size as usize, ALLOC_ALIGN))
}

/// Align upward to the next multiple of `align` (power of two)
#[inline(always)]
const fn align_up(value: usize, align: usize) -> usize {
    (value.wrapping_add(align).wrapping_sub(1)) & !align.wrapping_sub(1)
}
