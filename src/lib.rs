mod error;
mod forecast;
mod loader;
mod types;
mod utils;

pub use error::ZambrettiError;

pub use forecast::engine::*;
pub use forecast::error::ForecastError;
pub use forecast::lookup_table::{lookup_phrase, FORECAST_UNAVAILABLE, TREND_UNDETERMINED};

pub use loader::csv_loader::*;
pub use loader::error::LoaderError;

pub use types::into_utc_trait::IntoUtcDateTime;
pub use types::observation::Observation;
pub use types::pressure_series::*;
pub use types::trend::Trend;
pub use types::wind_direction::WindDirection;
