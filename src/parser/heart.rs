use chrono::{NaiveDate, NaiveTime};
use roxmltree::Node;
use serde_json::Value;

use super::error::ParseError;
use super::source::RecordParser;
use super::types::HeartRateSample;
use crate::time::TimeCodec;

/// Reads Fitbit intraday heart-rate exports.
///
/// The reference date comes from `activities-heart[0].dateTime`; every entry of
/// `activities-heart-intraday.dataset` carries a time of day and a value.
/// Wall-clock times are read in the codec's reference zone.
#[derive(Debug, Clone, Default)]
pub struct BiometricSeriesParser {
    codec: TimeCodec,
}

impl BiometricSeriesParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_codec(codec: TimeCodec) -> Self {
        Self { codec }
    }

    fn decode_entry(&self, date: NaiveDate, entry: &Value) -> Result<HeartRateSample, ParseError> {
        let time = entry
            .get("time")
            .and_then(Value::as_str)
            .ok_or(ParseError::MissingField("time"))?;
        let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
            .map_err(|_| ParseError::timestamp(time))?;

        let value = entry.get("value").ok_or(ParseError::MissingField("value"))?;
        let value = value
            .as_f64()
            .ok_or_else(|| ParseError::number("value", &value.to_string()))?;

        let naive = date.and_time(time);
        let timestamp = self
            .codec
            .local_to_millis(naive)
            .ok_or_else(|| ParseError::timestamp(&naive.to_string()))?;

        Ok(HeartRateSample { timestamp, value })
    }
}

impl RecordParser for BiometricSeriesParser {
    type Record = HeartRateSample;

    fn fields(&self) -> &'static [&'static str] {
        &["timestamp", "value"]
    }

    fn decode_node(&self, _node: Node<'_, '_>) -> Result<Vec<HeartRateSample>, ParseError> {
        Err(ParseError::UnsupportedSource("XML tree"))
    }

    fn decode_value(&self, value: &Value) -> Result<Vec<HeartRateSample>, ParseError> {
        let date = value
            .pointer("/activities-heart/0/dateTime")
            .and_then(Value::as_str)
            .ok_or(ParseError::MissingField("activities-heart[0].dateTime"))?;
        let date =
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ParseError::timestamp(date))?;

        let dataset = value
            .pointer("/activities-heart-intraday/dataset")
            .and_then(Value::as_array)
            .ok_or(ParseError::MissingField("activities-heart-intraday.dataset"))?;

        let mut samples = dataset
            .iter()
            .map(|entry| self.decode_entry(date, entry))
            .collect::<Result<Vec<_>, _>>()?;

        samples.sort_by_key(|s| s.timestamp);
        log::debug!("decoded {} heart-rate samples for {}", samples.len(), date);
        Ok(samples)
    }

    fn decode_text(&self, text: &str) -> Result<Vec<HeartRateSample>, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        self.decode_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Source;
    use serde_json::json;

    fn export() -> Value {
        json!({
            "activities-heart": [{ "dateTime": "2020-01-01", "value": { "restingHeartRate": 58 } }],
            "activities-heart-intraday": {
                "dataset": [
                    { "time": "00:00:00", "value": 60 },
                    { "time": "00:01:00", "value": 62 }
                ],
                "datasetInterval": 1,
                "datasetType": "minute"
            }
        })
    }

    #[test]
    fn decodes_one_sample_per_entry() {
        let codec = TimeCodec::default();
        let base = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let value = export();
        let samples = BiometricSeriesParser::new().parse((&value).into()).unwrap();

        let start = codec.local_to_millis(base).unwrap();
        assert_eq!(
            samples,
            vec![
                HeartRateSample {
                    timestamp: start,
                    value: 60.0,
                },
                HeartRateSample {
                    timestamp: start + 60_000,
                    value: 62.0,
                },
            ]
        );
    }

    #[test]
    fn text_and_reader_sources_decode_as_json() {
        let text = export().to_string();
        let parser = BiometricSeriesParser::new();

        assert_eq!(parser.parse(Source::Str(&text)).unwrap().len(), 2);
        assert_eq!(parser.parse(Source::reader(text.as_bytes())).unwrap().len(), 2);
    }

    #[test]
    fn reference_zone_shifts_timestamps() {
        let value = export();
        let utc = BiometricSeriesParser::with_codec(TimeCodec::new(chrono_tz::UTC))
            .parse((&value).into())
            .unwrap();
        assert_eq!(utc[0].timestamp, 1_577_836_800_000);
    }

    #[test]
    fn missing_dataset_is_malformed() {
        let value = json!({ "activities-heart": [{ "dateTime": "2020-01-01" }] });
        let err = BiometricSeriesParser::new().parse((&value).into()).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let mut value = export();
        value["activities-heart-intraday"]["dataset"][0]["value"] = json!("fast");
        let err = BiometricSeriesParser::new().parse((&value).into()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn xml_trees_are_unsupported() {
        let doc = roxmltree::Document::parse("<heart/>").unwrap();
        let err = BiometricSeriesParser::new().parse((&doc).into()).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedSource(_)));
    }
}
