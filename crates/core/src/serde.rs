//! Serde helpers for booking and request forms.
//!
//! HTML forms submit every field as a string, and optional inputs left blank
//! arrive as `""`. These helpers map blanks to `None` and accept the `HH:MM`
//! values produced by `<input type="time">`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};
use uuid::Uuid;

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Deserialize an optional string, treating blank input as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Deserialize an optional `YYYY-MM-DD` date, treating blank input as None.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize a required time of day (`HH:MM` or `HH:MM:SS`).
pub fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_time(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid time: {s}")))
}

/// Deserialize an optional unsigned number that may arrive as a string.
///
/// Accepts JSON numbers, numeric strings and blank strings (None).
pub fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Deserialize an optional UUID, treating blank input (an unselected `<select>`) as None.
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Serialize a time of day as `HH:MM`.
pub fn serialize_hhmm<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// Serde adapter for `NaiveTime` fields stored as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::serialize_hhmm(time, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::deserialize_time(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct BookingForm {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        notes: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        preferred_date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_u32")]
        budget: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Slot {
        #[serde(with = "hhmm")]
        start: NaiveTime,
    }

    #[test]
    fn test_blank_fields_become_none() {
        let json = r#"{"notes": "  ", "preferred_date": "", "budget": ""}"#;
        let form: BookingForm = serde_json::from_str(json).unwrap();
        assert_eq!(
            form,
            BookingForm {
                notes: None,
                preferred_date: None,
                budget: None,
            }
        );
    }

    #[test]
    fn test_missing_fields_become_none() {
        let form: BookingForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.notes, None);
        assert_eq!(form.budget, None);
    }

    #[test]
    fn test_notes_are_trimmed() {
        let json = r#"{"notes": "  left forearm  "}"#;
        let form: BookingForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.notes.as_deref(), Some("left forearm"));
    }

    #[test]
    fn test_preferred_date_parses() {
        let json = r#"{"preferred_date": "2025-03-14"}"#;
        let form: BookingForm = serde_json::from_str(json).unwrap();
        assert_eq!(
            form.preferred_date,
            Some(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
        );
    }

    #[test]
    fn test_preferred_date_rejects_garbage() {
        let json = r#"{"preferred_date": "14/03/2025"}"#;
        assert!(serde_json::from_str::<BookingForm>(json).is_err());
    }

    #[test]
    fn test_time_accepts_both_formats() {
        let slot: Slot = serde_json::from_str(r#"{"start": "09:45"}"#).unwrap();
        assert_eq!(Some(slot.start), NaiveTime::from_hms_opt(9, 45, 0));

        let slot: Slot = serde_json::from_str(r#"{"start": "09:45:30"}"#).unwrap();
        assert_eq!(Some(slot.start), NaiveTime::from_hms_opt(9, 45, 30));

        assert!(serde_json::from_str::<Slot>(r#"{"start": "9h45"}"#).is_err());
    }

    #[test]
    fn test_budget_accepts_number_or_string() {
        let form: BookingForm = serde_json::from_str(r#"{"budget": 12000}"#).unwrap();
        assert_eq!(form.budget, Some(12000));

        let form: BookingForm = serde_json::from_str(r#"{"budget": " 150 "}"#).unwrap();
        assert_eq!(form.budget, Some(150));

        assert!(serde_json::from_str::<BookingForm>(r#"{"budget": "lots"}"#).is_err());
    }

    #[test]
    fn test_hhmm_adapter() {
        let slot = Slot {
            start: NaiveTime::from_hms_opt(14, 15, 0).unwrap(),
        };
        assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"start":"14:15"}"#);

        let parsed: Slot = serde_json::from_str(r#"{"start":"14:15"}"#).unwrap();
        assert_eq!(parsed, slot);
    }
}
