pub mod into_utc_trait;
pub mod observation;
pub mod pressure_series;
pub mod trend;
pub mod wind_direction;
