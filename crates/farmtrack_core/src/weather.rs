//! Read-only weather forecast for the dashboard widget.
//!
//! # Responsibility
//! - Define the forecast shape and the provider seam.
//! - Ship a fixed seven-day provider used until a live source exists.
//!
//! # Invariants
//! - `today` is the first day of `weekly_forecast`.
//! - Temperatures are whole degrees Fahrenheit, wind speed in mph.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Days shown in the widget preview strip.
pub const PREVIEW_DAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
}

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Short weekday label, e.g. `Mon`.
    pub day: String,
    pub location: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub condition: WeatherCondition,
    /// Relative humidity percent.
    pub humidity: u8,
    pub wind_speed: u32,
    pub high: i32,
    pub low: i32,
}

pub type WeatherResult<T> = Result<T, WeatherError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Provider returned no days.
    EmptyForecast,
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyForecast => write!(f, "weather forecast is empty"),
        }
    }
}

impl Error for WeatherError {}

/// Source of forecast data.
pub trait WeatherProvider {
    /// Seven days starting today.
    fn weekly_forecast(&self) -> WeatherResult<Vec<DailyForecast>>;

    fn today(&self) -> WeatherResult<DailyForecast> {
        self.weekly_forecast()?
            .into_iter()
            .next()
            .ok_or(WeatherError::EmptyForecast)
    }

    /// First [`PREVIEW_DAYS`] days of the forecast.
    fn preview(&self) -> WeatherResult<Vec<DailyForecast>> {
        let mut days = self.weekly_forecast()?;
        days.truncate(PREVIEW_DAYS);
        Ok(days)
    }
}

/// Provider returning a fixed week.
#[derive(Debug, Clone)]
pub struct StaticWeatherProvider {
    location: String,
}

impl Default for StaticWeatherProvider {
    fn default() -> Self {
        Self::new("Farm Location")
    }
}

impl StaticWeatherProvider {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl WeatherProvider for StaticWeatherProvider {
    fn weekly_forecast(&self) -> WeatherResult<Vec<DailyForecast>> {
        use WeatherCondition::{Cloudy, Rainy, Sunny};

        // day, temperature, feels like, condition, humidity, wind, high, low
        let week = [
            ("Mon", 72, 70, Sunny, 45, 8, 75, 62),
            ("Tue", 68, 66, Cloudy, 55, 12, 70, 58),
            ("Wed", 65, 63, Rainy, 75, 15, 67, 55),
            ("Thu", 70, 68, Cloudy, 60, 10, 73, 60),
            ("Fri", 75, 73, Sunny, 40, 6, 78, 64),
            ("Sat", 76, 74, Sunny, 38, 5, 80, 66),
            ("Sun", 74, 72, Cloudy, 50, 9, 77, 63),
        ];
        Ok(week
            .into_iter()
            .map(
                |(day, temperature, feels_like, condition, humidity, wind_speed, high, low)| {
                    DailyForecast {
                        day: day.to_string(),
                        location: self.location.clone(),
                        temperature,
                        feels_like,
                        condition,
                        humidity,
                        wind_speed,
                        high,
                        low,
                    }
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DailyForecast, StaticWeatherProvider, WeatherCondition, WeatherError, WeatherProvider,
        WeatherResult, PREVIEW_DAYS,
    };

    struct EmptyProvider;

    impl WeatherProvider for EmptyProvider {
        fn weekly_forecast(&self) -> WeatherResult<Vec<DailyForecast>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn static_provider_returns_a_full_week() {
        let week = StaticWeatherProvider::default().weekly_forecast().unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day, "Mon");
        assert_eq!(week[6].day, "Sun");
        assert!(week.iter().all(|day| day.low <= day.high));
    }

    #[test]
    fn today_is_first_day_and_preview_is_truncated() {
        let provider = StaticWeatherProvider::new("North Field");
        let today = provider.today().unwrap();
        assert_eq!(today.condition, WeatherCondition::Sunny);
        assert_eq!(today.location, "North Field");
        assert_eq!(provider.preview().unwrap().len(), PREVIEW_DAYS);
    }

    #[test]
    fn empty_forecast_has_no_today() {
        assert_eq!(EmptyProvider.today(), Err(WeatherError::EmptyForecast));
    }
}
