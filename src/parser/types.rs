use serde::Serialize;

/// One track-log point. Fields `[timestamp, latitude, longitude, altitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub timestamp: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// One intraday heart-rate reading. Fields `[timestamp, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartRateSample {
    pub timestamp: i64,
    pub value: f64,
}

/// One elevation-grid cell. Fields `[latitude, longitude, altitude, type]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
}
