//! Heap entry points over the process-wide allocator

use super::{record, VmStatus};
use crate::error::HeapError;
use crate::logging::log_ffi_error;
use crate::runtime;

fn allocate(size: i32) -> Result<usize, HeapError> {
    let heap = runtime::heap().ok_or(HeapError::NotInitialized)?;
    let handle = heap.allocate(size)?;
    Ok(heap.address_of(handle))
}

/// Allocate `size` bytes (rounded up to a multiple of 4) from the VM heap
///
/// Returns the address of the new block, or 0 on failure; the reason is
/// then available from `vm_last_error`. Memory is never freed.
#[export_name = "gcMalloc"]
pub extern "C" fn gc_malloc(size: i32) -> usize {
    match allocate(size) {
        Ok(address) => {
            record(VmStatus::Ok);
            address
        }
        Err(e) => {
            record(VmStatus::from(&e));
            0
        }
    }
}

/// Like `gcMalloc`, but returns a status and writes the address to `out`
///
/// # Safety
/// `out` must be null or valid for a `usize` write.
#[no_mangle]
pub unsafe extern "C" fn vm_gc_malloc_checked(out: *mut usize, size: i32) -> i32 {
    if out.is_null() {
        log_ffi_error("vm_gc_malloc_checked", "null out pointer");
        return record(VmStatus::InvalidArgument);
    }
    match allocate(size) {
        Ok(address) => {
            // SAFETY: non-null, valid per caller contract.
            unsafe { *out = address };
            record(VmStatus::Ok)
        }
        Err(e) => record(VmStatus::from(&e)),
    }
}

/// Start address of the heap region, or 0 before initialization
#[no_mangle]
pub extern "C" fn vm_heap_base() -> usize {
    runtime::heap().map_or(0, |heap| heap.region().base())
}

/// Bytes handed out so far
#[no_mangle]
pub extern "C" fn vm_heap_used() -> u64 {
    runtime::heap().map_or(0, |heap| heap.used() as u64)
}

#[no_mangle]
pub extern "C" fn vm_heap_capacity() -> u64 {
    runtime::heap().map_or(0, |heap| heap.region().size() as u64)
}
