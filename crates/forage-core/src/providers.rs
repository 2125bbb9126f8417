//! Environment capabilities.
//!
//! Drop conditions read weather, season, town level, the active event, and
//! museum completion. Each comes from a different game system, so each is a
//! narrow single-getter trait. The gather pipeline never cares how a value
//! is computed; it only sees an [`EnvironmentSnapshot`] sampled once per
//! call by [`EnvironmentSources::sample`].
//!
//! A missing provider yields `None`, and conditions that need the value fail
//! closed.

use forage_types::{EnvironmentSnapshot, GameTime, Season, Weather};

/// Source of the current weather.
pub trait WeatherProvider {
    /// Current weather, if known.
    fn current_weather(&self) -> Option<Weather>;
}

/// Source of the current season.
pub trait SeasonProvider {
    /// Current season, if known.
    fn current_season(&self) -> Option<Season>;
}

/// Source of the town level.
pub trait TownProvider {
    /// Current town level, if known.
    fn town_level(&self) -> Option<u32>;
}

/// Source of the active event.
pub trait EventProvider {
    /// Id of the active event, if any.
    fn active_event(&self) -> Option<String>;
}

/// Source of museum completion.
pub trait MuseumProvider {
    /// Museum completion percentage (0--100), if known.
    fn museum_completion(&self) -> Option<u32>;
}

/// The providers a host has wired up. Unset providers read as absent.
#[derive(Clone, Copy, Default)]
pub struct EnvironmentSources<'a> {
    /// Weather source.
    pub weather: Option<&'a dyn WeatherProvider>,
    /// Season source.
    pub season: Option<&'a dyn SeasonProvider>,
    /// Town level source.
    pub town: Option<&'a dyn TownProvider>,
    /// Event source.
    pub event: Option<&'a dyn EventProvider>,
    /// Museum source.
    pub museum: Option<&'a dyn MuseumProvider>,
}

impl EnvironmentSources<'_> {
    /// Read every provider once and stamp the result with `now`.
    pub fn sample(&self, now: GameTime) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            time: now,
            weather: self.weather.and_then(|p| p.current_weather()),
            season: self.season.and_then(|p| p.current_season()),
            town_level: self.town.and_then(|p| p.town_level()),
            event_id: self.event.and_then(|p| p.active_event()),
            museum_completion: self.museum.and_then(|p| p.museum_completion()),
        }
    }
}

impl core::fmt::Debug for EnvironmentSources<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EnvironmentSources")
            .field("weather", &self.weather.is_some())
            .field("season", &self.season.is_some())
            .field("town", &self.town.is_some())
            .field("event", &self.event.is_some())
            .field("museum", &self.museum.is_some())
            .finish()
    }
}

/// Fixed environment values, for hosts whose systems are static and for
/// tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedEnvironment {
    /// Weather to report.
    pub weather: Option<Weather>,
    /// Season to report.
    pub season: Option<Season>,
    /// Town level to report.
    pub town_level: Option<u32>,
    /// Event to report.
    pub event_id: Option<String>,
    /// Museum completion to report.
    pub museum_completion: Option<u32>,
}

impl FixedEnvironment {
    /// Sources backed entirely by this value.
    pub fn sources(&self) -> EnvironmentSources<'_> {
        EnvironmentSources {
            weather: Some(self),
            season: Some(self),
            town: Some(self),
            event: Some(self),
            museum: Some(self),
        }
    }
}

impl WeatherProvider for FixedEnvironment {
    fn current_weather(&self) -> Option<Weather> {
        self.weather
    }
}

impl SeasonProvider for FixedEnvironment {
    fn current_season(&self) -> Option<Season> {
        self.season
    }
}

impl TownProvider for FixedEnvironment {
    fn town_level(&self) -> Option<u32> {
        self.town_level
    }
}

impl EventProvider for FixedEnvironment {
    fn active_event(&self) -> Option<String> {
        self.event_id.clone()
    }
}

impl MuseumProvider for FixedEnvironment {
    fn museum_completion(&self) -> Option<u32> {
        self.museum_completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_providers_yields_bare_snapshot() {
        let snapshot = EnvironmentSources::default().sample(GameTime::from_minutes(90));
        assert_eq!(snapshot.time, GameTime::from_minutes(90));
        assert_eq!(snapshot.weather, None);
        assert_eq!(snapshot.town_level, None);
        assert_eq!(snapshot.event_id, None);
    }

    #[test]
    fn fixed_environment_fills_every_field() {
        let fixed = FixedEnvironment {
            weather: Some(Weather::Rainy),
            season: Some(Season::Autumn),
            town_level: Some(3),
            event_id: Some("spring_festival".to_owned()),
            museum_completion: Some(55),
        };
        let snapshot = fixed.sources().sample(GameTime::START);
        assert_eq!(snapshot.weather, Some(Weather::Rainy));
        assert_eq!(snapshot.season, Some(Season::Autumn));
        assert_eq!(snapshot.town_level, Some(3));
        assert_eq!(snapshot.event_id.as_deref(), Some("spring_festival"));
        assert_eq!(snapshot.museum_completion, Some(55));
    }

    #[test]
    fn sources_can_be_mixed() {
        struct Town;
        impl TownProvider for Town {
            fn town_level(&self) -> Option<u32> {
                Some(5)
            }
        }
        let fixed = FixedEnvironment {
            weather: Some(Weather::Sunny),
            ..FixedEnvironment::default()
        };
        let sources = EnvironmentSources {
            weather: Some(&fixed),
            town: Some(&Town),
            ..EnvironmentSources::default()
        };
        let snapshot = sources.sample(GameTime::START);
        assert_eq!(snapshot.weather, Some(Weather::Sunny));
        assert_eq!(snapshot.town_level, Some(5));
        assert_eq!(snapshot.season, None);
    }
}
