//! Normalizes GPX track logs, Fitbit intraday heart-rate exports and GSI DEM
//! elevation grids into ordered records, and interpolates time-indexed
//! records into continuous functions of time.

pub mod config;
pub mod grid;
pub mod interpolate;
pub mod parser;
pub mod time;
pub mod util;

pub use config::Config;
pub use grid::ElevationGridParser;
pub use interpolate::{BiometricInterpolator, Interpolator, TrackInterpolator};
pub use parser::{BiometricSeriesParser, RecordParser, Source, TrackLogParser};
