//! In-game clock.
//!
//! The clock is the single source of truth for in-game time. It holds a
//! [`GameTime`] minute counter and derives the season from the day number
//! and the configured season length.
//!
//! - All advances use checked arithmetic (no silent overflow).
//! - Season is computed from the minute counter, never stored. The counter
//!   is the source of truth.

use forage_types::{GameTime, Season};

use crate::config::ClockConfig;
use crate::providers::SeasonProvider;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Minute counter would overflow.
    #[error("game time overflow: cannot advance {minutes} minutes past {from}")]
    TimeOverflow {
        /// Time the advance started from.
        from: GameTime,
        /// Minutes requested.
        minutes: u64,
    },

    /// Invalid clock configuration (e.g. zero days per season).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// In-game clock with a derived season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    /// Current in-game time.
    now: GameTime,

    /// Number of in-game days in one season.
    days_per_season: u64,
}

impl GameClock {
    /// Create a clock from configuration.
    ///
    /// The clock starts at `day start_day, start_hour:00`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `days_per_season` is 0 or the
    /// start hour is not below 24.
    pub fn new(config: &ClockConfig) -> Result<Self, ClockError> {
        let now = GameTime::from_day_hour(config.start_day, config.start_hour).ok_or_else(|| {
            ClockError::InvalidConfig {
                reason: format!(
                    "start day {} hour {} is not a valid time",
                    config.start_day, config.start_hour
                ),
            }
        })?;
        Self::from_parts(now, config.days_per_season)
    }

    /// Create a clock at an explicit time (useful for tests and save
    /// restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `days_per_season` is 0.
    pub fn from_parts(now: GameTime, days_per_season: u64) -> Result<Self, ClockError> {
        if days_per_season == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "days_per_season must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            now,
            days_per_season,
        })
    }

    /// Advance the clock by `minutes`. Returns the new time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TimeOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self, minutes: u64) -> Result<GameTime, ClockError> {
        self.now = self
            .now
            .checked_add_minutes(minutes)
            .ok_or(ClockError::TimeOverflow {
                from: self.now,
                minutes,
            })?;
        Ok(self.now)
    }

    /// Current in-game time.
    pub const fn now(&self) -> GameTime {
        self.now
    }

    /// Current in-game day.
    pub const fn day(&self) -> u64 {
        self.now.day()
    }

    /// Configured season length in days.
    pub const fn days_per_season(&self) -> u64 {
        self.days_per_season
    }

    /// Season of the current day: `(day / days_per_season) % 4`.
    pub fn season(&self) -> Season {
        let index = self
            .day()
            .checked_div(self.days_per_season)
            .and_then(|raw| raw.checked_rem(4))
            .and_then(|idx| usize::try_from(idx).ok())
            .unwrap_or(0);
        Season::CYCLE.get(index).copied().unwrap_or(Season::Spring)
    }

    /// Days left before the season changes (at least 1).
    pub fn days_until_season_change(&self) -> u64 {
        let within = self.day().checked_rem(self.days_per_season).unwrap_or(0);
        self.days_per_season.saturating_sub(within)
    }
}

impl SeasonProvider for GameClock {
    fn current_season(&self) -> Option<Season> {
        Some(self.season())
    }
}
