use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("Insufficient pressure data: at least {required} readings are required, found {found}")]
    InsufficientData { required: usize, found: usize },
}
