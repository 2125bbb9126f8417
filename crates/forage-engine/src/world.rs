//! The session's view of the game world: clock, weather, town, event, and
//! museum, exposed to the gather pipeline through the provider traits.

use forage_core::config::SessionConfig;
use forage_core::{
    EnvironmentSources, EventProvider, GameClock, MuseumProvider, SeasonProvider, TownProvider,
    WeatherProvider,
};
use forage_types::{Season, Weather};
use forage_world::DailyWeather;

/// World state the simulated forager walks through.
#[derive(Debug, Clone)]
pub struct SessionWorld {
    /// In-game clock.
    pub clock: GameClock,
    weather: DailyWeather,
    town_level: u32,
    event_id: Option<String>,
    museum_completion: u32,
}

impl SessionWorld {
    /// Assemble the world from a clock and session settings.
    pub fn new(clock: GameClock, session: &SessionConfig) -> Self {
        Self {
            clock,
            weather: DailyWeather::new(session.seed),
            town_level: session.town_level,
            event_id: session.event_id.clone(),
            museum_completion: session.museum_completion.min(100),
        }
    }

    /// Every provider, backed by this world.
    pub fn sources(&self) -> EnvironmentSources<'_> {
        EnvironmentSources {
            weather: Some(self),
            season: Some(&self.clock),
            town: Some(self),
            event: Some(self),
            museum: Some(self),
        }
    }
}

impl WeatherProvider for SessionWorld {
    fn current_weather(&self) -> Option<Weather> {
        Some(
            self.weather
                .forecast(self.clock.day(), self.clock.season()),
        )
    }
}

impl SeasonProvider for SessionWorld {
    fn current_season(&self) -> Option<Season> {
        self.clock.current_season()
    }
}

impl TownProvider for SessionWorld {
    fn town_level(&self) -> Option<u32> {
        Some(self.town_level)
    }
}

impl EventProvider for SessionWorld {
    fn active_event(&self) -> Option<String> {
        self.event_id.clone()
    }
}

impl MuseumProvider for SessionWorld {
    fn museum_completion(&self) -> Option<u32> {
        Some(self.museum_completion)
    }
}
