mod error;
mod heart;
mod source;
mod track;
mod types;

pub use error::ParseError;
pub use heart::BiometricSeriesParser;
pub use source::{RecordParser, Source};
pub use track::{TrackLogParser, GPX_NS};
pub use types::{GridCell, HeartRateSample, TrackPoint};

pub(crate) use source::{find, find_text, parse_f64};
