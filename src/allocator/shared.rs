//! Shared bump allocation - the process-wide heap behind `gcMalloc`
//!
//! Design: Same arithmetic as `BumpAllocator`, but the cursor is an
//! atomic advanced with a compare-and-swap loop, so threads sharing one
//! heap never receive overlapping ranges.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::bump::rounded_size;
use super::{HeapRef, HeapRegion, HeapStats};
use crate::error::HeapError;
use crate::logging::{log_allocation, log_allocation_failure, log_heap_init};

/// Bump allocator usable through `&self` from any thread
pub struct SharedBumpAllocator {
    region: HeapRegion,
    cursor: AtomicUsize,
    allocations: AtomicU64,
    failed_allocations: AtomicU64,
}

impl SharedBumpAllocator {
    pub fn new(region: HeapRegion) -> Self {
        log_heap_init(region.base(), region.size());
        Self {
            region,
            cursor: AtomicUsize::new(0),
            allocations: AtomicU64::new(0),
            failed_allocations: AtomicU64::new(0),
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, HeapError> {
        HeapRegion::reserve(capacity).map(Self::new)
    }

    /// Claim `size` bytes (rounded to the granule) at the cursor
    pub fn allocate(&self, size: i32) -> Result<HeapRef, HeapError> {
        let rounded = rounded_size(size)?;
        let capacity = self.region.size();
        let mut current = self.cursor.load(Ordering::Relaxed);

        loop {
            let remaining = capacity - current;
            if rounded > remaining {
                self.failed_allocations.fetch_add(1, Ordering::Relaxed);
                let err = HeapError::OutOfMemory {
                    requested: rounded,
                    remaining,
                };
                log_allocation_failure(&err);
                return Err(err);
            }

            match self.cursor.compare_exchange_weak(
                current,
                current + rounded,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }

        self.allocations.fetch_add(1, Ordering::Relaxed);
        log_allocation(size, current);
        Ok(HeapRef::from_offset(current))
    }

    #[inline]
    pub fn region(&self) -> &HeapRegion {
        &self.region
    }

    #[inline]
    pub fn address_of(&self, handle: HeapRef) -> usize {
        self.region.address_of(handle)
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.region.size() - self.used()
    }

    pub fn stats(&self) -> HeapStats {
        let used = self.used();
        HeapStats {
            capacity: self.region.size(),
            used,
            remaining: self.region.size() - used,
            allocations: self.allocations.load(Ordering::Relaxed),
            failed_allocations: self.failed_allocations.load(Ordering::Relaxed),
        }
    }
}
