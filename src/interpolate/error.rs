use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InterpolateError {
    #[error("no samples to interpolate")]
    Empty,
    #[error("query {t} is outside the domain [{min}, {max}]")]
    Domain { t: f64, min: f64, max: f64 },
}
