//! Allocator tests
//!
//! Organized by component:
//! - Region: reservation and address conversion
//! - Bump: sequential allocation, rounding, exhaustion
//! - Shared: atomic cursor under contention
//! - Statistics

use super::*;
use crate::error::HeapError;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

// ===== Region Tests =====

#[test]
fn region_reserve_sets_base_and_size() {
    let region = HeapRegion::reserve(1024).expect("reserve");
    assert_ne!(region.base(), 0);
    assert_eq!(region.size(), 1024);
    assert_eq!(region.end() - region.base(), 1024);
    assert_eq!(region.base() % REGION_ALIGN, 0);
}

#[test]
fn region_rejects_zero_capacity() {
    assert_eq!(
        HeapRegion::reserve(0).unwrap_err(),
        HeapError::InvalidCapacity { capacity: 0 }
    );
}

#[test]
fn region_rejects_layout_overflow() {
    let capacity = usize::MAX - 2;
    assert_eq!(
        HeapRegion::reserve(capacity).unwrap_err(),
        HeapError::InvalidCapacity { capacity }
    );
}

#[cfg(target_pointer_width = "64")]
#[test]
fn region_reports_failed_reservation() {
    let capacity = 1usize << 62;
    assert_eq!(
        HeapRegion::reserve(capacity).unwrap_err(),
        HeapError::ReservationFailed { capacity }
    );
}

#[test]
fn region_handle_address_conversion() {
    let region = HeapRegion::reserve(64).expect("reserve");
    let handle = HeapRef::from_offset(16);

    let addr = region.address_of(handle);
    assert_eq!(addr, region.base() + 16);
    assert_eq!(region.handle_of(addr), Some(handle));
    assert_eq!(region.handle_of(region.end()), Some(HeapRef::from_offset(64)));
    assert_eq!(region.handle_of(region.end() + 1), None);
    assert_eq!(region.handle_of(region.base() - 1), None);
}

#[test]
fn region_pointer_is_writable() {
    let region = HeapRegion::reserve(64).expect("reserve");
    let ptr = region.pointer(HeapRef::from_offset(8)).expect("in bounds");

    unsafe {
        core::ptr::write_bytes(ptr.as_ptr(), 0xAB, 8);
        assert_eq!(*ptr.as_ptr().add(7), 0xAB);
    }
    assert!(region.pointer(HeapRef::from_offset(65)).is_none());
}

// ===== Bump Allocator Tests =====

#[test]
fn bump_scenario_offsets() {
    let mut heap = BumpAllocator::with_capacity(1024).expect("heap");

    let a = heap.allocate(10).expect("first");
    let b = heap.allocate(20).expect("second");
    let c = heap.allocate(1).expect("third");

    assert_eq!(a.offset(), 0);
    assert_eq!(b.offset(), 12);
    assert_eq!(c.offset(), 32);
    assert_eq!(heap.used(), 36);
    assert_eq!(heap.address_of(b), heap.region().base() + 12);
}

#[test]
fn bump_size_ten_advances_by_twelve() {
    let mut heap = BumpAllocator::with_capacity(1024).expect("heap");
    let mut prev = heap.allocate(10).expect("alloc");

    for _ in 0..10 {
        let next = heap.allocate(10).expect("alloc");
        assert_eq!(next.offset() - prev.offset(), 12);
        prev = next;
    }
}

#[test]
fn bump_addresses_increase_and_stay_aligned() {
    let mut heap = BumpAllocator::with_capacity(4096).expect("heap");
    let mut last: Option<HeapRef> = None;

    for size in [1, 3, 4, 5, 7, 8, 13, 64, 99] {
        let handle = heap.allocate(size).expect("alloc");
        assert!(handle.is_aligned_to(ALLOC_ALIGN));
        assert_eq!(heap.address_of(handle) % ALLOC_ALIGN, 0);
        if let Some(prev) = last {
            assert!(handle > prev);
        }
        last = Some(handle);
    }
}

#[test]
fn bump_zero_size_returns_same_address_next_time() {
    let mut heap = BumpAllocator::with_capacity(64).expect("heap");
    heap.allocate(4).expect("alloc");

    let a = heap.allocate(0).expect("zero");
    let b = heap.allocate(8).expect("next");
    assert_eq!(a, b);
}

#[test]
fn bump_negative_size_is_rejected_without_moving() {
    let mut heap = BumpAllocator::with_capacity(64).expect("heap");
    heap.allocate(8).expect("alloc");

    assert_eq!(heap.allocate(-5), Err(HeapError::InvalidSize { size: -5 }));
    assert_eq!(heap.cursor().offset(), 8);
}

#[test]
fn bump_exhaustion_is_reported() {
    let mut heap = BumpAllocator::with_capacity(32).expect("heap");
    heap.allocate(20).expect("fits");

    assert_eq!(
        heap.allocate(13),
        Err(HeapError::OutOfMemory { requested: 16, remaining: 12 })
    );
    // Cursor untouched; smaller requests still fit
    assert_eq!(heap.used(), 20);
    assert_eq!(heap.allocate(12).expect("exact fit").offset(), 20);
    assert_eq!(heap.remaining(), 0);
    assert!(heap.allocate(1).is_err());
    assert!(heap.allocate(0).is_ok());
}

#[test]
fn bump_rounding_counts_against_capacity() {
    let mut heap = BumpAllocator::with_capacity(10).expect("heap");
    assert_eq!(
        heap.allocate(10),
        Err(HeapError::OutOfMemory { requested: 12, remaining: 10 })
    );
}

#[test]
fn bump_allocations_are_writable_and_disjoint() {
    let mut heap = BumpAllocator::with_capacity(256).expect("heap");
    let sizes = [5, 9, 16, 30];
    let mut blocks = Vec::new();

    for (i, &size) in sizes.iter().enumerate() {
        let handle = heap.allocate(size).expect("alloc");
        let ptr = heap.region().pointer(handle).expect("pointer");
        unsafe { core::ptr::write_bytes(ptr.as_ptr(), i as u8 + 1, size as usize) };
        blocks.push((ptr, size as usize, i as u8 + 1));
    }

    for (ptr, size, fill) in blocks {
        let bytes = unsafe { core::slice::from_raw_parts(ptr.as_ptr(), size) };
        assert!(bytes.iter().all(|&b| b == fill));
    }
}

// ===== Shared Allocator Tests =====

#[test]
fn shared_matches_sequential_offsets() {
    let heap = SharedBumpAllocator::with_capacity(1024).expect("heap");

    assert_eq!(heap.allocate(10).expect("a").offset(), 0);
    assert_eq!(heap.allocate(20).expect("b").offset(), 12);
    assert_eq!(heap.allocate(1).expect("c").offset(), 32);
}

#[test]
fn shared_concurrent_allocations_never_overlap() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;

    let capacity = THREADS * PER_THREAD * 8;
    let heap = Arc::new(SharedBumpAllocator::with_capacity(capacity).expect("heap"));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let heap = Arc::clone(&heap);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| heap.allocate(6).expect("alloc").offset())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for offset in handle.join().expect("thread") {
            assert_eq!(offset % 8, 0);
            assert!(seen.insert(offset), "offset {} handed out twice", offset);
        }
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
    assert_eq!(heap.remaining(), 0);
}

#[test]
fn shared_exhaustion_is_reported() {
    let heap = SharedBumpAllocator::with_capacity(16).expect("heap");
    heap.allocate(16).expect("fill");

    assert_eq!(
        heap.allocate(1),
        Err(HeapError::OutOfMemory { requested: 4, remaining: 0 })
    );
    assert_eq!(heap.allocate(-1), Err(HeapError::InvalidSize { size: -1 }));
}

// ===== Statistics Tests =====

#[test]
fn stats_track_usage_and_failures() {
    let mut heap = BumpAllocator::with_capacity(64).expect("heap");
    let before = heap.stats();
    assert_eq!(before.used, 0);
    assert_eq!(before.remaining, 64);

    heap.allocate(10).expect("alloc");
    heap.allocate(100).unwrap_err();

    let after = heap.stats();
    assert_eq!(after.capacity, 64);
    assert_eq!(after.used, 12);
    assert_eq!(after.remaining, 52);
    assert_eq!(after.allocations, 1);
    assert_eq!(after.failed_allocations, 1);
}

#[test]
fn shared_stats_match_bump_stats() {
    let shared = SharedBumpAllocator::with_capacity(64).expect("heap");
    let mut bump = BumpAllocator::with_capacity(64).expect("heap");

    for size in [3, 17, 200] {
        let _ = shared.allocate(size);
        let _ = bump.allocate(size);
    }

    assert_eq!(shared.stats(), bump.stats());
}
