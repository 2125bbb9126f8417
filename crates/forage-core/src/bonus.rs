//! Bonus round probability helper.
//!
//! Some nodes offer an optional secondary check (a timing mini-game in the
//! client). The core only needs its outcome: a success flag and a display
//! multiplier. How the check is presented is up to the host.

use rand::Rng;
use rust_decimal::Decimal;

use crate::chance;

/// Multiplier reported on a successful bonus round (1.2).
pub const SUCCESS_MULTIPLIER: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Outcome of a bonus round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusRoll {
    /// Whether the round succeeded.
    pub success: bool,
    /// `1.2` on success, `1.0` otherwise.
    pub multiplier: Decimal,
}

impl BonusRoll {
    /// Outcome for a node without a bonus round.
    pub const fn skipped() -> Self {
        Self {
            success: false,
            multiplier: Decimal::ONE,
        }
    }
}

/// Stateless bonus-round roller.
#[derive(Debug, Clone, Copy, Default)]
pub struct BonusModifier;

impl BonusModifier {
    /// Roll a bonus round with `base_chance` as a fraction in `[0, 1]`.
    ///
    /// Succeeds iff a uniform draw in `[0, 1)` is below `base_chance`.
    pub fn roll(base_chance: Decimal, rng: &mut impl Rng) -> BonusRoll {
        let success = chance::hits(base_chance, 1, rng);
        BonusRoll {
            success,
            multiplier: if success {
                SUCCESS_MULTIPLIER
            } else {
                Decimal::ONE
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn zero_chance_never_succeeds() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(!BonusModifier::roll(Decimal::ZERO, &mut rng).success);
        }
    }

    #[test]
    fn full_chance_always_succeeds() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1000 {
            let roll = BonusModifier::roll(Decimal::ONE, &mut rng);
            assert!(roll.success);
            assert_eq!(roll.multiplier, dec!(1.2));
        }
    }

    #[test]
    fn failure_reports_neutral_multiplier() {
        let mut rng = SmallRng::seed_from_u64(7);
        let roll = BonusModifier::roll(Decimal::ZERO, &mut rng);
        assert_eq!(roll.multiplier, Decimal::ONE);
        assert_eq!(BonusRoll::skipped(), roll);
    }

    #[test]
    fn tiny_base_chance_is_not_rounded_up() {
        // 0.005% of 2 000 000 = 100, sigma ~ 10.
        let mut rng = SmallRng::seed_from_u64(5);
        let successes = (0..2_000_000)
            .filter(|_| BonusModifier::roll(dec!(0.00005), &mut rng).success)
            .count();
        assert!((60..=140).contains(&successes), "{successes}");
    }

    #[test]
    fn thirty_percent_success_rate() {
        let mut rng = SmallRng::seed_from_u64(42);
        let trials: u32 = 20_000;
        let successes = (0..trials)
            .filter(|_| BonusModifier::roll(dec!(0.30), &mut rng).success)
            .count();
        // 30% of 20 000 = 6000, sigma ~ 65
        assert!(
            (5_700..=6_300).contains(&successes),
            "expected ~6000 successes, got {successes}"
        );
    }
}
