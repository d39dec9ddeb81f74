//! Heap region - the one contiguous reservation backing all allocations
//!
//! Design: A single block acquired from the global allocator at startup.
//! The base never moves and the size never changes; the block is released
//! when the region is dropped.

use core::ptr::NonNull;
use std::alloc::{alloc, dealloc, Layout};

use super::HeapRef;
use crate::error::HeapError;

/// Alignment of the region base. Allocation granularity is 4, so an
/// 8-aligned base keeps every handed-out address 4-aligned.
pub const REGION_ALIGN: usize = 8;

/// Owned block of raw memory
pub struct HeapRegion {
    base: NonNull<u8>,
    layout: Layout,
}

// SAFETY: the region exclusively owns its block and never hands out
// references into it; callers go through raw addresses.
unsafe impl Send for HeapRegion {}
unsafe impl Sync for HeapRegion {}

impl HeapRegion {
    /// Reserve `capacity` bytes
    ///
    /// The memory is not zeroed.
    pub fn reserve(capacity: usize) -> Result<Self, HeapError> {
        if capacity == 0 {
            return Err(HeapError::InvalidCapacity { capacity });
        }
        let layout = Layout::from_size_align(capacity, REGION_ALIGN)
            .map_err(|_| HeapError::InvalidCapacity { capacity })?;

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc(layout) };
        let base = NonNull::new(ptr).ok_or(HeapError::ReservationFailed { capacity })?;

        Ok(Self { base, layout })
    }

    /// Start address
    #[inline]
    pub fn base(&self) -> usize {
        self.base.as_ptr() as usize
    }

    /// Capacity in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// One past the last byte
    #[inline]
    pub fn end(&self) -> usize {
        self.base() + self.size()
    }

    /// Whether `handle` points at or inside the region (the end address counts,
    /// since a zero-length allocation may sit there)
    #[inline]
    pub fn contains(&self, handle: HeapRef) -> bool {
        handle.offset() <= self.size()
    }

    /// Raw address for a handle
    #[inline]
    pub fn address_of(&self, handle: HeapRef) -> usize {
        self.base() + handle.offset()
    }

    /// Handle for a raw address, if it lies within the region
    pub fn handle_of(&self, address: usize) -> Option<HeapRef> {
        let offset = address.checked_sub(self.base())?;
        if offset > self.size() {
            return None;
        }
        Some(HeapRef::from_offset(offset))
    }

    /// Pointer for a handle, if it lies within the region
    pub fn pointer(&self, handle: HeapRef) -> Option<NonNull<u8>> {
        if !self.contains(handle) {
            return None;
        }
        // SAFETY: offset <= size, so the result stays within (or one past) the block.
        let ptr = unsafe { self.base.as_ptr().add(handle.offset()) };
        NonNull::new(ptr)
    }
}

impl Drop for HeapRegion {
    fn drop(&mut self) {
        // SAFETY: base was returned by `alloc` with this exact layout.
        unsafe {
            dealloc(self.base.as_ptr(), self.layout);
        }
    }
}

impl core::fmt::Debug for HeapRegion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeapRegion")
            .field("base", &format_args!("{:#x}", self.base()))
            .field("size", &self.size())
            .finish()
    }
}
