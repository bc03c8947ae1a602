use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("interrupted after {completed_sweeps} sweeps")]
    Interrupted { completed_sweeps: usize },

    #[error("run at temperature #{index} (T = {temperature}) failed: {source}")]
    TemperatureFailed {
        index: usize,
        temperature: f64,
        #[source]
        source: Box<IsingError>,
    },
}

impl IsingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type IsingResult<T> = Result<T, IsingError>;

/// Reject temperatures for which `beta = 1 / T` is meaningless, including
/// subnormal ones whose reciprocal overflows.
pub fn check_temperature(temperature: f64) -> IsingResult<()> {
    if temperature.is_finite() && temperature > 0.0 && (1.0 / temperature).is_finite() {
        Ok(())
    } else {
        Err(IsingError::invalid(format!(
            "temperature must be strictly positive with a finite 1/T, got {temperature}"
        )))
    }
}

pub fn check_coupling(coupling: f64) -> IsingResult<()> {
    if coupling.is_finite() {
        Ok(())
    } else {
        Err(IsingError::invalid(format!(
            "coupling constant J must be a finite real number, got {coupling}"
        )))
    }
}
