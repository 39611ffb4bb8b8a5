use crate::forecast::error::ForecastError;
use crate::loader::error::LoaderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZambrettiError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Loader(#[from] LoaderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PressureSeries, WindDirection, Zambretti};
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn forecast_from_file(file: &NamedTempFile) -> Result<&'static str, ZambrettiError> {
        let series = PressureSeries::from_home_assistant_csv(file.path())?;
        let forecast = Zambretti::new()
            .forecast()
            .elevation(90.0)
            .temperature(25.0)
            .series(&series)
            .now(Utc.with_ymd_and_hms(2024, 11, 19, 12, 0, 0).unwrap())
            .wind_direction(WindDirection::North)
            .call()?;
        Ok(forecast)
    }

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_forecast_from_home_assistant_export() -> Result<(), ZambrettiError> {
        let file = write_csv(
            "entity_id,state,last_changed\n\
             sensor.pressure,1050.0,2024-11-19T09:01:00.000Z\n\
             sensor.pressure,1040.0,2024-11-19T09:30:00.000Z\n\
             sensor.pressure,unavailable,2024-11-19T09:45:00.000Z\n\
             sensor.pressure,1030.0,2024-11-19T10:00:00.000Z\n\
             sensor.pressure,1020.0,2024-11-19T10:30:00.000Z\n\
             sensor.pressure,1010.0,2024-11-19T11:00:00.000Z\n\
             sensor.pressure,1000.0,2024-11-19T11:40:00.000Z\n",
        );

        assert_eq!(forecast_from_file(&file)?, "Showery, Becoming More Unsettled");
        Ok(())
    }

    #[test]
    fn test_insufficient_data_surfaces_as_forecast_error() {
        let file = write_csv(
            "entity_id,state,last_changed\n\
             sensor.pressure,1001.0,2024-11-19T11:00:00.000Z\n\
             sensor.pressure,1002.0,2024-11-19T11:30:00.000Z\n",
        );

        assert!(matches!(
            forecast_from_file(&file),
            Err(ZambrettiError::Forecast(ForecastError::InsufficientData { .. }))
        ));
    }

    #[test]
    fn test_loader_failure_surfaces_as_loader_error() {
        let file = write_csv(
            "entity_id,state,last_changed\n\
             sensor.pressure,1001.0,yesterday\n",
        );

        assert!(matches!(
            forecast_from_file(&file),
            Err(ZambrettiError::Loader(LoaderError::TimestampParse { .. }))
        ));
    }
}
