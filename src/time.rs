use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

pub const DEFAULT_ZONE: Tz = chrono_tz::Asia::Tokyo;

/// Converts calendar timestamps to epoch milliseconds and back, anchored to a
/// reference zone for wall-clock inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCodec {
    zone: Tz,
}

impl Default for TimeCodec {
    fn default() -> Self {
        Self { zone: DEFAULT_ZONE }
    }
}

impl TimeCodec {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn to_millis<Z: TimeZone>(&self, dt: &DateTime<Z>) -> i64 {
        dt.timestamp_millis()
    }

    /// Interprets `naive` as wall-clock time in the reference zone. Ambiguous
    /// times (DST fold) resolve to the earlier instant; skipped times are `None`.
    pub fn local_to_millis(&self, naive: NaiveDateTime) -> Option<i64> {
        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Some(dt.timestamp_millis()),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
            LocalResult::None => None,
        }
    }

    /// Reads a UTC wall-clock value and localizes it to the reference zone.
    pub fn localize_utc(&self, naive: NaiveDateTime) -> DateTime<Tz> {
        naive.and_utc().with_timezone(&self.zone)
    }

    pub fn from_millis(&self, millis: i64) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&self.zone))
    }
}
