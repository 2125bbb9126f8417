//! Daily weather for hosts that have no weather system of their own.
//!
//! One forecast per in-game day, drawn from a per-day seeded generator so a
//! save reloaded mid-day sees the weather it left with. Odds per season, in
//! percent:
//!
//! | Season | Sunny | Cloudy | Rainy | Stormy | Snowy |
//! |--------|-------|--------|-------|--------|-------|
//! | Spring | 40    | 25     | 30    | 5      | 0     |
//! | Summer | 55    | 20     | 15    | 10     | 0     |
//! | Autumn | 35    | 30     | 25    | 10     | 0     |
//! | Winter | 25    | 25     | 10    | 5      | 35    |

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use forage_types::{Season, Weather};

/// Forecast order; [`odds`] rows follow it.
const FORECAST_ORDER: [Weather; 5] = [
    Weather::Sunny,
    Weather::Cloudy,
    Weather::Rainy,
    Weather::Stormy,
    Weather::Snowy,
];

/// Spreads consecutive days across the seed space.
const DAY_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Percent odds per weather in [`FORECAST_ORDER`]. Each row sums to 100.
const fn odds(season: Season) -> [u32; 5] {
    match season {
        Season::Spring => [40, 25, 30, 5, 0],
        Season::Summer => [55, 20, 15, 10, 0],
        Season::Autumn => [35, 30, 25, 10, 0],
        Season::Winter => [25, 25, 10, 5, 35],
    }
}

/// Seeded daily weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWeather {
    seed: u64,
}

impl DailyWeather {
    /// Forecast for the save with this seed.
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Weather on `day`, which falls in `season`.
    pub fn forecast(&self, day: u64, season: Season) -> Weather {
        let mut rng = SmallRng::seed_from_u64(self.seed ^ day.wrapping_mul(DAY_STRIDE));
        let mut roll = rng.random_range(0..100_u32);
        for (weather, chance) in FORECAST_ORDER.into_iter().zip(odds(season)) {
            if roll < chance {
                return weather;
            }
            roll = roll.saturating_sub(chance);
        }
        Weather::Sunny
    }

    /// The save seed.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}
