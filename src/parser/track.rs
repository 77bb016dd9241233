use chrono::{DateTime, NaiveDateTime};
use roxmltree::Node;

use super::error::ParseError;
use super::source::{find_text, parse_f64, RecordParser};
use super::types::TrackPoint;
use crate::time::TimeCodec;

pub const GPX_NS: &str = "http://www.topografix.com/GPX/1/1";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Reads GPX 1.1 track logs.
#[derive(Debug, Clone, Default)]
pub struct TrackLogParser {
    codec: TimeCodec,
}

impl TrackLogParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codec(codec: TimeCodec) -> Self {
        Self { codec }
    }

    fn parse_time(&self, text: &str) -> Result<i64, ParseError> {
        let text = text.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, TIME_FORMAT) {
            return Ok(self.codec.to_millis(&self.codec.localize_utc(naive)));
        }
        // Some exporters write fractional seconds or explicit offsets.
        DateTime::parse_from_rfc3339(text)
            .map(|dt| self.codec.to_millis(&dt))
            .map_err(|_| ParseError::timestamp(text))
    }

    fn decode_point(&self, trkpt: Node<'_, '_>) -> Result<TrackPoint, ParseError> {
        let attr = |name: &'static str| {
            trkpt.attribute(name).ok_or(ParseError::MissingAttribute {
                element: "trkpt",
                attribute: name,
            })
        };

        Ok(TrackPoint {
            timestamp: self.parse_time(find_text(trkpt, GPX_NS, "time")?)?,
            latitude: parse_f64("latitude", attr("lat")?)?,
            longitude: parse_f64("longitude", attr("lon")?)?,
            altitude: parse_f64("altitude", find_text(trkpt, GPX_NS, "ele")?)?,
        })
    }
}

impl RecordParser for TrackLogParser {
    type Record = TrackPoint;

    fn fields(&self) -> &'static [&'static str] {
        &["timestamp", "latitude", "longitude", "altitude"]
    }

    fn decode_node(&self, node: Node<'_, '_>) -> Result<Vec<TrackPoint>, ParseError> {
        let mut points = node
            .descendants()
            .filter(|n| n.has_tag_name((GPX_NS, "trkpt")))
            .map(|n| self.decode_point(n))
            .collect::<Result<Vec<_>, _>>()?;

        points.sort_by_key(|p| p.timestamp);
        log::debug!("decoded {} track points", points.len());
        Ok(points)
    }
}
