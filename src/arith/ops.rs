//! Integer operations - the semantics behind each `l*` entry point

use core::cmp::Ordering;

use crate::error::ArithError;

/// Low six bits of a shift count
#[inline(always)]
const fn shift_amount(shift: i32) -> u32 {
    (shift as u32) & 0x3f
}

/// `l + r`, wrapping
#[inline]
pub const fn add(l: i64, r: i64) -> i64 {
    l.wrapping_add(r)
}

/// `-l`, wrapping (`i64::MIN` negates to itself)
#[inline]
pub const fn neg(l: i64) -> i64 {
    l.wrapping_neg()
}

/// `l - r`, wrapping
#[inline]
pub const fn sub(l: i64, r: i64) -> i64 {
    l.wrapping_sub(r)
}

/// `l * r`, wrapping
#[inline]
pub const fn mul(l: i64, r: i64) -> i64 {
    l.wrapping_mul(r)
}

/// Truncating division
///
/// # Panics
/// Panics if `r == 0`. `i64::MIN / -1` wraps to `i64::MIN`.
#[inline]
pub const fn div(l: i64, r: i64) -> i64 {
    l.wrapping_div(r)
}

/// Truncated remainder with the sign of `l`
///
/// # Panics
/// Panics if `r == 0`. `i64::MIN % -1` is `0`.
#[inline]
pub const fn rem(l: i64, r: i64) -> i64 {
    l.wrapping_rem(r)
}

/// Division that reports a zero divisor instead of faulting
pub fn checked_div(l: i64, r: i64) -> Result<i64, ArithError> {
    if r == 0 {
        return Err(ArithError::DivisionByZero);
    }
    Ok(div(l, r))
}

/// Remainder that reports a zero divisor instead of faulting
pub fn checked_rem(l: i64, r: i64) -> Result<i64, ArithError> {
    if r == 0 {
        return Err(ArithError::DivisionByZero);
    }
    Ok(rem(l, r))
}

/// `l << (shift mod 64)`
#[inline]
pub const fn shl(l: i64, shift: i32) -> i64 {
    l.wrapping_shl(shift_amount(shift))
}

/// Arithmetic right shift, sign-extending
#[inline]
pub const fn shr(l: i64, shift: i32) -> i64 {
    l.wrapping_shr(shift_amount(shift))
}

/// Logical right shift over the bit pattern of `l`
#[inline]
pub const fn ushr(l: i64, shift: i32) -> i64 {
    ((l as u64) >> shift_amount(shift)) as i64
}

/// Three-way compare: `1`, `-1` or `0`
#[inline]
pub fn cmp(l: i64, r: i64) -> i32 {
    match l.cmp(&r) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}
