//! Native (`chrono::DateTime<Utc>`) ⇄ wire (`prost_types::Timestamp`)
//! instants. Nanosecond precision is preserved in both directions.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

pub fn to_wire(instant: &DateTime<Utc>) -> Timestamp {
    // Leap seconds surface as nanos >= 1e9; the wire form cannot carry them.
    let nanos = instant.timestamp_subsec_nanos().min(NANOS_PER_SECOND - 1);
    Timestamp {
        seconds: instant.timestamp(),
        nanos: nanos as i32,
    }
}

/// `None` if the instant falls outside the native range.
pub fn from_wire(ts: &Timestamp) -> Option<DateTime<Utc>> {
    let mut ts = ts.clone();
    ts.normalize();
    DateTime::from_timestamp(ts.seconds, ts.nanos as u32)
}

/// Serde adapter for `Option<Timestamp>` wire fields: RFC 3339 text,
/// `null` when unset.
///
/// ```ignore
/// #[serde(default, with = "transcode::timestamp::serde_wire")]
/// pub update_time: Option<prost_types::Timestamp>,
/// ```
pub mod serde_wire {
    use chrono::{DateTime, Utc};
    use prost_types::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => {
                let instant = super::from_wire(ts)
                    .ok_or_else(|| serde::ser::Error::custom("timestamp out of range"))?;
                serializer.serialize_str(&instant.to_rfc3339())
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Timestamp>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| super::to_wire(&t.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_roundtrip_preserves_nanos() {
        let instant = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let wire = to_wire(&instant);
        assert_eq!(wire, Timestamp { seconds: 1_700_000_000, nanos: 123_456_789 });
        assert_eq!(from_wire(&wire), Some(instant));
    }

    #[test]
    fn test_pre_epoch_instant() {
        let instant = Utc.timestamp_opt(-1, 500_000_000).unwrap();
        let wire = to_wire(&instant);
        assert_eq!(wire.seconds, -1);
        assert_eq!(wire.nanos, 500_000_000);
        assert_eq!(from_wire(&wire), Some(instant));
    }

    #[test]
    fn test_unnormalized_wire_is_normalized() {
        let wire = Timestamp { seconds: 10, nanos: -1 };
        let instant = from_wire(&wire).unwrap();
        assert_eq!(instant.timestamp(), 9);
        assert_eq!(instant.timestamp_subsec_nanos(), 999_999_999);
    }

    #[test]
    fn test_out_of_range_wire_is_rejected() {
        assert_eq!(from_wire(&Timestamp { seconds: i64::MAX, nanos: 0 }), None);
    }
}
