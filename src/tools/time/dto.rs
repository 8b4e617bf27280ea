use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Text arguments are kept as raw JSON: a mistyped or `null` value is not a
// decoding error, it is rendered the way the tools render any odd input.

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetCurrentTimeInput {
    #[serde(default, deserialize_with = "present")]
    pub format: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub timezone: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCurrentDateInput {
    #[serde(default, deserialize_with = "present")]
    pub format: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub custom_format: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub timezone: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetDatetimeInfoInput {
    #[serde(default, deserialize_with = "present")]
    pub timezone: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FormatTimestampInput {
    // `null` and absent both mean "no timestamp".
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub format: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub timezone: Option<Value>,
}

/// `Some(Value::Null)` for an explicit `null`; absent keys stay `None`
/// through `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatetimeInfo {
    pub timestamp: i64,
    pub iso: String,
    pub local: String,
    pub utc: String,
    pub unix: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub day_of_week: String,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_specific: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_error: Option<String>,
}
