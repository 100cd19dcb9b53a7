use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::models::{identifier::Identifier, lenient, test::TestContext};
use crate::utils::{fallback::first_present, time::parse_timestamp};

/// Marks as the API sent them. Numbers print the way a JavaScript client
/// would show them, so `90.0` reads `90` and `87.5` stays `87.5`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Marks {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marks::Number(n) => f.write_str(&number_text(n)),
            Marks::Text(s) => f.write_str(s),
        }
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e21 => format!("{:.0}", v),
        Some(v) => v.to_string(),
        None => n.to_string(),
    }
}

impl From<i64> for Marks {
    fn from(n: i64) -> Self {
        Marks::Number(n.into())
    }
}

fn deserialize_marks_lenient<'de, D>(deserializer: D) -> Result<Option<Marks>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(n) => Some(Marks::Number(n)),
        JsonValue::String(s) => Some(Marks::Text(s)),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(default, deserialize_with = "lenient::or_none", skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub question_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub question_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_marks_lenient")]
    pub marks: Option<Marks>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub submitted_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::millis")]
    pub time_taken: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_none", skip_serializing_if = "Option::is_none")]
    pub test: Option<TestContext>,
}

impl SubmissionRecord {
    /// Display name, falling back to the raw user id.
    pub fn user_label(&self) -> Option<&str> {
        first_present([self.user_name.as_deref(), self.user_id.as_deref()])
    }

    /// Question title, falling back to the raw question id.
    pub fn question_label(&self) -> Option<&str> {
        first_present([self.question_title.as_deref(), self.question_id.as_deref()])
    }

    /// Offset-less timestamps are read as wall-clock time in `local`.
    pub fn submitted_at_time(&self, local: FixedOffset) -> Option<DateTime<Utc>> {
        self.submitted_at.as_deref().and_then(|s| parse_timestamp(s, local))
    }

    /// Lenient conversion used for list payloads: a malformed element becomes
    /// an empty record rather than failing the whole list.
    pub fn from_json_lenient(value: JsonValue) -> Self {
        match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed submission record; rendering empty fields");
                Self::default()
            }
        }
    }
}
