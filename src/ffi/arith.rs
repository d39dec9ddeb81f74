//! Long arithmetic entry points
//!
//! Each function writes its result through the first pointer and reads
//! operands through the rest. Null pointers are logged and the call does
//! nothing. Division or remainder by zero aborts the process: there is no
//! recovery path at this layer and unwinding may not cross `extern "C"`.

use crate::arith;
use crate::logging::{log_arith_fault, log_ffi_error};
use crate::runtime;

#[inline(always)]
unsafe fn binary(
    name: &str,
    result: *mut i64,
    l: *const i64,
    r: *const i64,
    op: fn(i64, i64) -> i64,
) {
    if result.is_null() || l.is_null() || r.is_null() {
        log_ffi_error(name, "null pointer argument");
        return;
    }
    // SAFETY: non-null, and valid for reads/writes per caller contract.
    unsafe { *result = op(*l, *r) };
}

#[inline(always)]
unsafe fn shift(name: &str, result: *mut i64, l: *const i64, v: i32, op: fn(i64, i32) -> i64) {
    if result.is_null() || l.is_null() {
        log_ffi_error(name, "null pointer argument");
        return;
    }
    // SAFETY: as above.
    unsafe { *result = op(*l, v) };
}

/// Fault on a zero divisor before the operation is attempted
#[inline(always)]
unsafe fn check_divisor(name: &str, r: *const i64) {
    // SAFETY: null is checked first; otherwise valid per caller contract.
    if !r.is_null() && unsafe { *r } == 0 {
        log_arith_fault(name, "division by zero");
        runtime::flush_logs();
        std::process::abort();
    }
}

/// `*result = *l + *r` (wrapping)
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lAdd"]
pub unsafe extern "C" fn long_add(result: *mut i64, l: *const i64, r: *const i64) {
    unsafe { binary("lAdd", result, l, r, arith::add) }
}

/// `*result = -*l` (wrapping)
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lNeg"]
pub unsafe extern "C" fn long_neg(result: *mut i64, l: *const i64) {
    if result.is_null() || l.is_null() {
        log_ffi_error("lNeg", "null pointer argument");
        return;
    }
    // SAFETY: non-null, valid per caller contract.
    unsafe { *result = arith::neg(*l) };
}

/// `*result = *l - *r` (wrapping)
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lSub"]
pub unsafe extern "C" fn long_sub(result: *mut i64, l: *const i64, r: *const i64) {
    unsafe { binary("lSub", result, l, r, arith::sub) }
}

/// `*result = *l / *r`, truncating; aborts when `*r == 0`
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lDiv"]
pub unsafe extern "C" fn long_div(result: *mut i64, l: *const i64, r: *const i64) {
    unsafe {
        check_divisor("lDiv", r);
        binary("lDiv", result, l, r, arith::div)
    }
}

/// `*result = *l * *r` (wrapping)
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lMul"]
pub unsafe extern "C" fn long_mul(result: *mut i64, l: *const i64, r: *const i64) {
    unsafe { binary("lMul", result, l, r, arith::mul) }
}

/// `*result = *l % *r`, sign of `*l`; aborts when `*r == 0`
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lRem"]
pub unsafe extern "C" fn long_rem(result: *mut i64, l: *const i64, r: *const i64) {
    unsafe {
        check_divisor("lRem", r);
        binary("lRem", result, l, r, arith::rem)
    }
}

/// `*result = *l << (v mod 64)`
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lShl"]
pub unsafe extern "C" fn long_shl(result: *mut i64, l: *const i64, v: i32) {
    unsafe { shift("lShl", result, l, v, arith::shl) }
}

/// Arithmetic shift right by `v mod 64`
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lShr"]
pub unsafe extern "C" fn long_shr(result: *mut i64, l: *const i64, v: i32) {
    unsafe { shift("lShr", result, l, v, arith::shr) }
}

/// Logical shift right by `v mod 64`
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lUshr"]
pub unsafe extern "C" fn long_ushr(result: *mut i64, l: *const i64, v: i32) {
    unsafe { shift("lUshr", result, l, v, arith::ushr) }
}

/// `*result` = 1, -1 or 0 as `*l` is greater, less or equal to `*r`
///
/// # Safety
/// Each pointer must be null or valid and aligned for its access.
#[export_name = "lCmp"]
pub unsafe extern "C" fn long_cmp(result: *mut i32, l: *const i64, r: *const i64) {
    if result.is_null() || l.is_null() || r.is_null() {
        log_ffi_error("lCmp", "null pointer argument");
        return;
    }
    // SAFETY: non-null, valid per caller contract.
    unsafe { *result = arith::cmp(*l, *r) };
}
