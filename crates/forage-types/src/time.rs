//! In-game time.
//!
//! Every timestamp in the engine is a [`GameTime`]: a count of in-game
//! minutes since the save began. Day and hour are derived, never stored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Minutes in one in-game hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Hours in one in-game day.
pub const HOURS_PER_DAY: u64 = 24;

/// Minutes in one in-game day.
pub const MINUTES_PER_DAY: u64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// A point in in-game time, measured in minutes from the start of the save.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct GameTime(pub u64);

impl GameTime {
    /// The first minute of day 0.
    pub const START: Self = Self(0);

    /// Construct from a raw minute count.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(minutes)
    }

    /// Construct from a day number and an hour of that day.
    ///
    /// Returns `None` if `hour` is not below 24 or the value overflows.
    pub const fn from_day_hour(day: u64, hour: u64) -> Option<Self> {
        if hour >= HOURS_PER_DAY {
            return None;
        }
        let Some(day_minutes) = day.checked_mul(MINUTES_PER_DAY) else {
            return None;
        };
        match day_minutes.checked_add(hour.saturating_mul(MINUTES_PER_HOUR)) {
            Some(total) => Some(Self(total)),
            None => None,
        }
    }

    /// Total minutes since the start of the save.
    pub const fn minutes(self) -> u64 {
        self.0
    }

    /// Zero-based day number.
    pub const fn day(self) -> u64 {
        self.0 / MINUTES_PER_DAY
    }

    /// Hour of the current day (0--23).
    pub const fn hour(self) -> u64 {
        (self.0 / MINUTES_PER_HOUR) % HOURS_PER_DAY
    }

    /// Minute of the current hour (0--59).
    pub const fn minute_of_hour(self) -> u64 {
        self.0 % MINUTES_PER_HOUR
    }

    /// Advance by `minutes`, returning `None` on overflow.
    pub const fn checked_add_minutes(self, minutes: u64) -> Option<Self> {
        match self.0.checked_add(minutes) {
            Some(total) => Some(Self(total)),
            None => None,
        }
    }

    /// The first `reset_hour:00` that comes strictly after `self`.
    ///
    /// Returns `None` if `reset_hour` is not a valid hour or the value
    /// overflows.
    pub const fn next_reset_after(self, reset_hour: u8) -> Option<Self> {
        let Some(same_day) = Self::from_day_hour(self.day(), reset_hour as u64) else {
            return None;
        };
        if same_day.0 > self.0 {
            return Some(same_day);
        }
        same_day.checked_add_minutes(MINUTES_PER_DAY)
    }
}

impl core::fmt::Display for GameTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "day {} {:02}:{:02}",
            self.day(),
            self.hour(),
            self.minute_of_hour()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_and_hour_are_derived() {
        let t = GameTime::from_minutes(MINUTES_PER_DAY * 3 + 7 * 60 + 15);
        assert_eq!(t.day(), 3);
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute_of_hour(), 15);
        assert_eq!(t.to_string(), "day 3 07:15");
    }

    #[test]
    fn from_day_hour_rejects_bad_hour() {
        assert_eq!(GameTime::from_day_hour(0, 24), None);
        assert_eq!(
            GameTime::from_day_hour(1, 6),
            Some(GameTime::from_minutes(MINUTES_PER_DAY + 360))
        );
    }

    #[test]
    fn next_reset_later_same_day() {
        let claimed = GameTime::from_day_hour(2, 4);
        let next = claimed.and_then(|t| t.next_reset_after(6));
        assert_eq!(next, GameTime::from_day_hour(2, 6));
    }

    #[test]
    fn next_reset_rolls_to_tomorrow() {
        let claimed = GameTime::from_day_hour(2, 9);
        let next = claimed.and_then(|t| t.next_reset_after(6));
        assert_eq!(next, GameTime::from_day_hour(3, 6));
    }

    #[test]
    fn next_reset_is_strictly_after() {
        // Claimed exactly at the reset hour: the next reset is tomorrow.
        let claimed = GameTime::from_day_hour(0, 6);
        let next = claimed.and_then(|t| t.next_reset_after(6));
        assert_eq!(next, GameTime::from_day_hour(1, 6));
    }
}
