use super::error::InterpolateError;
use super::options::{Bounds, InterpolationOptions, Kind};

/// One-dimensional interpolant over `N` dependent columns.
///
/// Samples are sorted by `x` once at construction and never change.
#[derive(Debug, Clone)]
pub struct Interp1d<const N: usize> {
    x: Vec<f64>,
    y: Vec<[f64; N]>,
    options: InterpolationOptions,
}

impl<const N: usize> Interp1d<N> {
    pub fn new(
        mut samples: Vec<(f64, [f64; N])>,
        options: InterpolationOptions,
    ) -> Result<Self, InterpolateError> {
        if samples.is_empty() {
            return Err(InterpolateError::Empty);
        }
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (x, y) = samples.into_iter().unzip();
        Ok(Self { x, y, options })
    }

    pub fn domain(&self) -> [f64; 2] {
        [self.x[0], self.x[self.x.len() - 1]]
    }

    /// `[min, max]` of one dependent column.
    pub fn range(&self, column: usize) -> [f64; 2] {
        self.y.iter().map(|row| row[column]).fold(
            [f64::INFINITY, f64::NEG_INFINITY],
            |[lo, hi], v| [lo.min(v), hi.max(v)],
        )
    }

    pub fn call(&self, t: f64) -> Result<[f64; N], InterpolateError> {
        let [min, max] = self.domain();
        if !(min..=max).contains(&t) {
            match self.options.bounds {
                Bounds::Error => return Err(InterpolateError::Domain { t, min, max }),
                Bounds::Fill(value) => return Ok([value; N]),
                Bounds::Extrapolate if t.is_nan() => {
                    return Err(InterpolateError::Domain { t, min, max })
                }
                Bounds::Extrapolate => {}
            }
        }

        let n = self.x.len();
        if n == 1 {
            return Ok(self.y[0]);
        }

        let value = match self.options.kind {
            Kind::Linear => {
                let (lo, hi) = self.segment(t);
                self.lerp(lo, hi, t)
            }
            Kind::Nearest => {
                let (lo, hi) = self.segment(t);
                if t - self.x[lo] <= self.x[hi] - t {
                    self.y[lo]
                } else {
                    self.y[hi]
                }
            }
            Kind::Previous => {
                let i = self.x.partition_point(|&v| v <= t);
                self.y[i.saturating_sub(1)]
            }
            Kind::Next => {
                let i = self.x.partition_point(|&v| v < t);
                self.y[i.min(n - 1)]
            }
        };
        Ok(value)
    }

    /// Indices of the samples bracketing `t`, clamped to the first and last
    /// segment. An exact hit on a sample closes the segment to its left.
    fn segment(&self, t: f64) -> (usize, usize) {
        let idx = self
            .x
            .partition_point(|&v| v < t)
            .clamp(1, self.x.len() - 1);
        (idx - 1, idx)
    }

    fn lerp(&self, lo: usize, hi: usize, t: f64) -> [f64; N] {
        let (x0, x1) = (self.x[lo], self.x[hi]);
        if x1 == x0 {
            return self.y[lo];
        }
        let f = (t - x0) / (x1 - x0);
        let (y0, y1) = (&self.y[lo], &self.y[hi]);
        std::array::from_fn(|c| y0[c] * (1.0 - f) + y1[c] * f)
    }
}
