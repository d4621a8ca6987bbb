use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Domain context an extraction runs under. Drives prompt vocabulary.
///
/// Deserializes leniently: unknown values fall back to `Work`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EventMode {
    Recruit,
    Order,
    #[default]
    Work,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventMode::Recruit => "recruit",
            EventMode::Order => "order",
            EventMode::Work => "work",
        }
    }
}

impl From<&str> for EventMode {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "recruit" | "recruiting" => EventMode::Recruit,
            "order" | "ordering" => EventMode::Order,
            _ => EventMode::Work,
        }
    }
}

impl From<String> for EventMode {
    fn from(value: String) -> Self {
        EventMode::from(value.as_str())
    }
}

/// Incoming extraction call.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionRequest {
    pub text: String,
    pub mode: EventMode,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Loosely-typed fields read out of a model reply, before date resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFields {
    pub customer_name: Option<String>,
    pub datetime: Option<String>,
    pub description: Option<String>,
    /// Everything the reply decoded to, kept for audit.
    pub raw: serde_json::Map<String, Value>,
}

/// A resolved point in time. `Date` means no time-of-day was found,
/// which is not the same thing as midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl EventTime {
    pub fn display(&self) -> String {
        match self {
            EventTime::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            EventTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Terminal output of the extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEvent {
    pub id: Uuid,
    pub mode: EventMode,
    pub customer_name: Option<String>,
    pub datetime: Option<EventTime>,
    pub description: Option<String>,
    pub original_text: String,
    pub user_id: Option<String>,
    /// Coarse signal: 0.8 on a structured parse, 0.0 on failure.
    pub confidence: f32,
    pub extracted_fields: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_lowercase() {
        let mode: EventMode = serde_json::from_str(r#""recruit""#).unwrap();
        assert_eq!(mode, EventMode::Recruit);
        assert_eq!(serde_json::to_string(&EventMode::Order).unwrap(), r#""order""#);
    }

    #[test]
    fn test_mode_accepts_long_names_case_insensitive() {
        assert_eq!(EventMode::from("Recruiting"), EventMode::Recruit);
        assert_eq!(EventMode::from("ORDERING"), EventMode::Order);
        assert_eq!(EventMode::from("work"), EventMode::Work);
    }

    #[test]
    fn test_unknown_mode_falls_back_to_work() {
        let mode: EventMode = serde_json::from_str(r#""party""#).unwrap();
        assert_eq!(mode, EventMode::Work);
    }

    #[test]
    fn test_request_user_id_optional() {
        let req: ExtractionRequest =
            serde_json::from_str(r#"{"text": "hello", "mode": "order"}"#).unwrap();
        assert_eq!(req.mode, EventMode::Order);
        assert!(req.user_id.is_none());
    }

    #[test]
    fn test_event_time_serializes_date_only_without_time() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let json = serde_json::to_string(&EventTime::Date(date)).unwrap();
        assert_eq!(json, r#""2025-01-15""#);

        let dt = date.and_hms_opt(14, 0, 0).unwrap();
        let json = serde_json::to_string(&EventTime::DateTime(dt)).unwrap();
        assert_eq!(json, r#""2025-01-15T14:00:00""#);
    }

    #[test]
    fn test_event_time_display() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(EventTime::Date(date).display(), "2025-12-25");
        let dt = date.and_hms_opt(9, 5, 0).unwrap();
        assert_eq!(EventTime::DateTime(dt).display(), "2025-12-25 09:05");
    }
}
