use super::error::InterpolateError;
use super::interp1d::Interp1d;
use super::options::InterpolationOptions;
use super::Interpolator;
use crate::parser::HeartRateSample;

/// Heart rate as a function of epoch-millisecond time.
#[derive(Debug, Clone)]
pub struct BiometricInterpolator {
    model: Interp1d<1>,
}

impl BiometricInterpolator {
    pub fn new(samples: &[HeartRateSample]) -> Result<Self, InterpolateError> {
        Self::with_options(samples, InterpolationOptions::default())
    }

    pub fn with_options(
        samples: &[HeartRateSample],
        options: InterpolationOptions,
    ) -> Result<Self, InterpolateError> {
        let samples = samples
            .iter()
            .map(|s| (s.timestamp as f64, [s.value]))
            .collect();
        Ok(Self {
            model: Interp1d::new(samples, options)?,
        })
    }

    pub fn range(&self) -> [f64; 2] {
        self.model.range(0)
    }
}

impl Interpolator for BiometricInterpolator {
    type Output = f64;

    fn domain(&self) -> [f64; 2] {
        self.model.domain()
    }

    fn call(&self, t: f64) -> Result<f64, InterpolateError> {
        self.model.call(t).map(|[v]| v)
    }
}
