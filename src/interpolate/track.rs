use super::error::InterpolateError;
use super::interp1d::Interp1d;
use super::options::InterpolationOptions;
use super::Interpolator;
use crate::parser::TrackPoint;

/// Position along a track log as a function of epoch-millisecond time.
#[derive(Debug, Clone)]
pub struct TrackInterpolator {
    model: Interp1d<3>,
}

impl TrackInterpolator {
    pub fn new(points: &[TrackPoint]) -> Result<Self, InterpolateError> {
        Self::with_options(points, InterpolationOptions::default())
    }

    pub fn with_options(
        points: &[TrackPoint],
        options: InterpolationOptions,
    ) -> Result<Self, InterpolateError> {
        let samples = points
            .iter()
            .map(|p| (p.timestamp as f64, [p.latitude, p.longitude, p.altitude]))
            .collect();
        Ok(Self {
            model: Interp1d::new(samples, options)?,
        })
    }

    pub fn lat_range(&self) -> [f64; 2] {
        self.model.range(0)
    }

    pub fn lon_range(&self) -> [f64; 2] {
        self.model.range(1)
    }

    pub fn alt_range(&self) -> [f64; 2] {
        self.model.range(2)
    }
}

impl Interpolator for TrackInterpolator {
    /// `[latitude, longitude, altitude]`
    type Output = [f64; 3];

    fn domain(&self) -> [f64; 2] {
        self.model.domain()
    }

    fn call(&self, t: f64) -> Result<[f64; 3], InterpolateError> {
        self.model.call(t)
    }
}
