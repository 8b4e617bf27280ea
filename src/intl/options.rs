use crate::error::{Result, TimeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Narrow,
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericStyle {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthStyle {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "narrow")]
    Narrow,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "long")]
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    Full,
    Long,
    Medium,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneNameStyle {
    Short,
    Long,
}

/// Which rendering entry point the options are resolved for. Each one adds
/// different default fields when the caller asked for none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Date,
    Time,
    DateTime,
}

/// Structured date-time rendering options, deserialized from the JSON shape
/// clients send (`{"weekday": "long", "month": "2-digit", ...}`).
///
/// Unknown keys are ignored; unknown values for known keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_name: Option<ZoneNameStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_style: Option<FormatStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_style: Option<FormatStyle>,
}

impl DateTimeFormatOptions {
    /// Parses a JSON options document. Non-object scalars carry no options
    /// and yield the empty set; `null` cannot be converted and is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| TimeError::invalid_options(e.to_string()))?;
        match value {
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| TimeError::invalid_options(e.to_string()))
            }
            Value::Null => Err(TimeError::invalid_options(
                "Cannot convert null to an options object",
            )),
            _ => Ok(Self::default()),
        }
    }

    pub fn in_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    pub fn has_date_fields(&self) -> bool {
        self.weekday.is_some() || self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    pub fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }

    pub fn has_style(&self) -> bool {
        self.date_style.is_some() || self.time_style.is_some()
    }

    /// Applies the defaulting rules for `rendering`, returning the options
    /// that will actually be rendered.
    pub fn resolve(&self, rendering: Rendering) -> Result<Self> {
        if self.has_style() && (self.has_date_fields() || self.has_time_fields()) {
            return Err(TimeError::invalid_options(
                "dateStyle and timeStyle cannot be combined with individual date-time fields",
            ));
        }
        match rendering {
            Rendering::Date if self.time_style.is_some() => {
                return Err(TimeError::invalid_options(
                    "timeStyle cannot be used when rendering a date",
                ));
            }
            Rendering::Time if self.date_style.is_some() => {
                return Err(TimeError::invalid_options(
                    "dateStyle cannot be used when rendering a time",
                ));
            }
            _ => {}
        }

        let need_defaults = !self.has_style()
            && match rendering {
                Rendering::Date => !self.has_date_fields(),
                Rendering::Time => !self.has_time_fields(),
                Rendering::DateTime => !self.has_date_fields() && !self.has_time_fields(),
            };

        let mut resolved = self.clone();
        if need_defaults {
            if matches!(rendering, Rendering::Date | Rendering::DateTime) {
                resolved.year = Some(NumericStyle::Numeric);
                resolved.month = Some(MonthStyle::Numeric);
                resolved.day = Some(NumericStyle::Numeric);
            }
            if matches!(rendering, Rendering::Time | Rendering::DateTime) {
                resolved.hour = Some(NumericStyle::Numeric);
                resolved.minute = Some(NumericStyle::Numeric);
                resolved.second = Some(NumericStyle::Numeric);
            }
        }
        Ok(resolved)
    }
}
