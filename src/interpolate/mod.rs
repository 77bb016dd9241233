mod error;
mod heart;
mod interp1d;
mod options;
mod track;

pub use error::InterpolateError;
pub use heart::BiometricInterpolator;
pub use interp1d::Interp1d;
pub use options::{Bounds, InterpolationOptions, Kind};
pub use track::TrackInterpolator;

/// A continuous function of time built from time-indexed records.
pub trait Interpolator {
    type Output;

    /// `[first, last]` sample time.
    fn domain(&self) -> [f64; 2];

    fn call(&self, t: f64) -> Result<Self::Output, InterpolateError>;
}
