pub mod feed;
pub mod forecast;

pub use feed::{AreaRegistryFeed, ForecastFeed, ReportBlock};
pub use forecast::{DayForecast, ForecastBundle, WeeklyEntry};
