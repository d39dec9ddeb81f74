//! C FFI - Stable ABI for generated code
//!
//! Design: Zero-overhead C bindings with:
//! 1. Long arithmetic (`lAdd` .. `lCmp`), output location first
//! 2. Heap allocation (`gcMalloc`) from the process-wide heap
//! 3. Runtime lifecycle and heap introspection
//! 4. Error propagation via null addresses plus a thread-local status

mod arith;
mod heap;

pub use arith::{
    long_add, long_cmp, long_div, long_mul, long_neg, long_rem, long_shl, long_shr, long_sub,
    long_ushr,
};
pub use heap::{gc_malloc, vm_gc_malloc_checked, vm_heap_base, vm_heap_capacity, vm_heap_used};

use std::cell::Cell;

use crate::config::RuntimeConfig;
use crate::error::{ConfigError, HeapError};
use crate::logging::log_ffi_error;
use crate::runtime;

/// C-compatible status code. `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VmStatus {
    Ok = 0,
    /// No heap installed yet.
    NotInitialized = -1,
    /// `vm_runtime_init` called twice.
    AlreadyInitialized = -2,
    /// Host could not provide the heap region.
    ReservationFailed = -3,
    /// Zero or unrepresentable heap capacity.
    InvalidCapacity = -4,
    /// Negative allocation size.
    InvalidSize = -5,
    /// Heap exhausted.
    OutOfMemory = -6,
    /// Null or otherwise unusable pointer argument.
    InvalidArgument = -7,
    /// Configuration file or environment override rejected.
    ConfigError = -8,
}

impl From<&HeapError> for VmStatus {
    fn from(e: &HeapError) -> Self {
        match e {
            HeapError::ReservationFailed { .. } => VmStatus::ReservationFailed,
            HeapError::InvalidCapacity { .. } => VmStatus::InvalidCapacity,
            HeapError::InvalidSize { .. } => VmStatus::InvalidSize,
            HeapError::OutOfMemory { .. } => VmStatus::OutOfMemory,
            HeapError::AlreadyInitialized => VmStatus::AlreadyInitialized,
            HeapError::NotInitialized => VmStatus::NotInitialized,
        }
    }
}

impl From<&ConfigError> for VmStatus {
    fn from(_e: &ConfigError) -> Self {
        VmStatus::ConfigError
    }
}

thread_local! {
    /// Status of the most recent heap or lifecycle call on this thread
    static LAST_STATUS: Cell<i32> = const { Cell::new(0) };
}

/// Record `status` for `vm_last_error` and hand it back as a C return value
pub(crate) fn record(status: VmStatus) -> i32 {
    LAST_STATUS.with(|cell| cell.set(status as i32));
    status as i32
}

/// Status of the most recent heap or lifecycle call on this thread
#[no_mangle]
pub extern "C" fn vm_last_error() -> i32 {
    LAST_STATUS.with(Cell::get)
}

/// Bootstrap the runtime with an explicit heap capacity
///
/// `capacity_bytes == 0` keeps the default capacity (16 MiB, or
/// `VM_NATIVE_HEAP_SIZE` when set). Must be called exactly once before
/// any `gcMalloc`; a failure here is fatal for the VM.
#[no_mangle]
pub extern "C" fn vm_runtime_init(capacity_bytes: u64) -> i32 {
    let mut config = RuntimeConfig::default();
    if let Err(e) = config.apply_env() {
        log_ffi_error("vm_runtime_init", &e.to_string());
        return record(VmStatus::from(&e));
    }
    if capacity_bytes != 0 {
        match usize::try_from(capacity_bytes) {
            Ok(capacity) => config.heap.capacity_bytes = capacity,
            Err(_) => return record(VmStatus::InvalidCapacity),
        }
        if let Err(e) = config.validate() {
            log_ffi_error("vm_runtime_init", &e.to_string());
            return record(VmStatus::InvalidCapacity);
        }
    }
    start(&config)
}

/// Bootstrap the runtime from `vm-native.toml` and the environment
#[no_mangle]
pub extern "C" fn vm_runtime_init_default() -> i32 {
    start(&RuntimeConfig::discover())
}

/// Flush logs and report final heap usage
#[no_mangle]
pub extern "C" fn vm_runtime_shutdown() {
    runtime::shutdown();
}

fn start(config: &RuntimeConfig) -> i32 {
    match runtime::bootstrap(config) {
        Ok(_) => record(VmStatus::Ok),
        Err(e) => {
            log_ffi_error("vm_runtime_init", &e.to_string());
            record(VmStatus::from(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(VmStatus::Ok as i32, 0);
        assert_eq!(VmStatus::NotInitialized as i32, -1);
        assert_eq!(VmStatus::AlreadyInitialized as i32, -2);
        assert_eq!(VmStatus::ReservationFailed as i32, -3);
        assert_eq!(VmStatus::InvalidCapacity as i32, -4);
        assert_eq!(VmStatus::InvalidSize as i32, -5);
        assert_eq!(VmStatus::OutOfMemory as i32, -6);
        assert_eq!(VmStatus::InvalidArgument as i32, -7);
        assert_eq!(VmStatus::ConfigError as i32, -8);
    }

    #[test]
    fn heap_error_to_status() {
        assert_eq!(
            VmStatus::from(&HeapError::OutOfMemory { requested: 4, remaining: 0 }),
            VmStatus::OutOfMemory
        );
        assert_eq!(
            VmStatus::from(&HeapError::InvalidSize { size: -1 }),
            VmStatus::InvalidSize
        );
        assert_eq!(
            VmStatus::from(&HeapError::ReservationFailed { capacity: 8 }),
            VmStatus::ReservationFailed
        );
        assert_eq!(
            VmStatus::from(&HeapError::InvalidCapacity { capacity: 0 }),
            VmStatus::InvalidCapacity
        );
        assert_eq!(VmStatus::from(&HeapError::NotInitialized), VmStatus::NotInitialized);
        assert_eq!(
            VmStatus::from(&HeapError::AlreadyInitialized),
            VmStatus::AlreadyInitialized
        );
    }

    #[test]
    fn runtime_init_rejects_unaligned_capacity() {
        assert_eq!(vm_runtime_init(10), VmStatus::InvalidCapacity as i32);
        assert_eq!(vm_last_error(), VmStatus::InvalidCapacity as i32);
        assert!(!runtime::is_initialized());
    }

    #[test]
    fn last_error_is_per_thread() {
        record(VmStatus::OutOfMemory);
        assert_eq!(vm_last_error(), VmStatus::OutOfMemory as i32);

        let other = std::thread::spawn(|| vm_last_error()).join().expect("thread");
        assert_eq!(other, 0);

        record(VmStatus::Ok);
        assert_eq!(vm_last_error(), 0);
    }
}
