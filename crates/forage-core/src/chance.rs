//! Exact decimal chance draws.
//!
//! A chance `c` out of `n` is decided by a uniform integer draw over the
//! units of `c`'s own decimal scale. A chance of `0.015` out of `100` draws
//! from `0..100_000` and hits below `15`, so no chance is ever rounded.

use rand::Rng;
use rust_decimal::Decimal;

/// Whether a uniform draw in `[0, out_of)` falls below `chance`.
///
/// Chances at or below zero never hit. Chances at or above `out_of` always
/// hit.
pub fn hits(chance: Decimal, out_of: u32, rng: &mut impl Rng) -> bool {
    if chance <= Decimal::ZERO {
        return false;
    }
    if chance >= Decimal::from(out_of) {
        return true;
    }
    let chance = chance.normalize();
    let Ok(threshold) = u128::try_from(chance.mantissa()) else {
        return false;
    };
    // Scale is at most 28, so 10^28 * u32::MAX still fits in a u128.
    10_u128
        .checked_pow(chance.scale())
        .and_then(|units| units.checked_mul(u128::from(out_of)))
        .is_some_and(|total| rng.random_range(0..total) < threshold)
}
