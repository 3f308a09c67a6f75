//! Wide intermediate arithmetic for fixed-point reward accounting.

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Computes `a * b / denominator`, rounding toward zero.
///
/// The product is formed in 256 bits so it never overflows. Returns `None`
/// for a zero denominator or when the quotient does not fit in a `u128`.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = U256::from(a)
        .checked_mul(U256::from(b))?
        .checked_div(U256::from(denominator))?;
    if quotient > U256::from(u128::MAX) {
        return None;
    }
    Some(quotient.as_u128())
}
