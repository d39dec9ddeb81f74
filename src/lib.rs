//! VM Native - Runtime support linked into VM-generated native code
//!
//! Provides the two services generated code calls by fixed symbol name:
//! 64-bit long arithmetic (`lAdd` .. `lCmp`) and heap allocation
//! (`gcMalloc`) from a monotonic bump heap reserved at startup.

#![warn(unsafe_op_in_unsafe_fn)]

pub mod allocator;
pub mod arith;
pub mod config;
pub mod error;
pub mod ffi;
pub mod logging;
pub mod runtime;

// Re-export commonly used items
pub use allocator::{BumpAllocator, HeapRef, HeapRegion, HeapStats, SharedBumpAllocator};
pub use config::RuntimeConfig;
pub use error::{ArithError, ConfigError, HeapError};
pub use ffi::VmStatus;
