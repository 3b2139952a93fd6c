//! Serde helpers for optional date fields. Input may be an RFC 3339 timestamp, a plain
//! `YYYY-MM-DD` date (midnight UTC) or a number of milliseconds since the Unix epoch;
//! output is RFC 3339 UTC with milliseconds.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{de::Error, Deserialize, Deserializer, Serializer};
use serde_json::{Number, Value};

pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("invalid date '{}'", s))
}

pub fn from_millis(n: &Number) -> Option<DateTime<Utc>> {
    let millis = n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
    DateTime::from_timestamp_millis(millis)
}

pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_some(&format(dt)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse(&s).map(Some).map_err(D::Error::custom),
        Some(Value::Number(n)) => from_millis(&n)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date '{}'", n))),
        Some(other) => Err(D::Error::custom(format!("invalid date '{}'", other))),
    }
}
