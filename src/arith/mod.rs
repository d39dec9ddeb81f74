//! Long arithmetic - out-of-line 64-bit integer primitives
//!
//! Design: Pure functions over two's-complement `i64` with the VM's
//! integer model:
//! - Add/sub/mul/neg wrap on overflow
//! - Division truncates toward zero, remainder takes the sign of the dividend
//! - Shift counts use their low six bits
//!
//! The C entry points live in `crate::ffi::arith`.

mod ops;


pub use ops::{add, checked_div, checked_rem, cmp, div, mul, neg, rem, shl, shr, sub, ushr};
