use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How values between samples are estimated.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    /// Straight line between neighbouring samples.
    #[default]
    #[serde(alias = "slinear")]
    #[strum(to_string = "linear", serialize = "slinear")]
    Linear,
    /// Value of the closest sample; ties go to the earlier one.
    Nearest,
    /// Value of the last sample at or before the query.
    #[serde(alias = "zero")]
    #[strum(to_string = "previous", serialize = "zero")]
    Previous,
    /// Value of the first sample at or after the query.
    Next,
}

/// What a query outside the sampled domain returns.
///
/// In YAML the fill variant is a single-key map: `bounds: {fill: 0.0}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bounds {
    #[default]
    Error,
    /// Every field takes this value.
    Fill(f64),
    /// Continue the interpolant past the ends.
    Extrapolate,
}

/// `error`, `extrapolate` or `fill=<value>`.
impl FromStr for Bounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Bounds::Error),
            "extrapolate" => Ok(Bounds::Extrapolate),
            other => other
                .strip_prefix("fill=")
                .and_then(|v| v.trim().parse().ok())
                .map(Bounds::Fill)
                .ok_or_else(|| {
                    format!("invalid bounds {s:?}; expected error, extrapolate or fill=<value>")
                }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InterpolationOptions {
    pub kind: Kind,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub bounds: Bounds,
}

impl InterpolationOptions {
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    pub fn extrapolate(mut self) -> Self {
        self.bounds = Bounds::Extrapolate;
        self
    }

    pub fn fill(mut self, value: f64) -> Self {
        self.bounds = Bounds::Fill(value);
        self
    }
}
