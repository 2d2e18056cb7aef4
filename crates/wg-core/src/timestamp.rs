use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Extended ISO-8601 with millisecond precision and an explicit offset,
/// e.g. `2026-10-16T08:15:42.123+00:00`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, false)
}

pub(crate) fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

pub(crate) fn serialize_option<S: Serializer>(
    ts: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize(ts, serializer),
        None => serializer.serialize_none(),
    }
}
