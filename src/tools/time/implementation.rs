use super::dto::{
    DatetimeInfo, FormatTimestampInput, GetCurrentDateInput, GetCurrentTimeInput,
    GetDatetimeInfoInput,
};
use super::helpers::{is_truthy, js_string, parse_timestamp, unix_seconds};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::intl::options::{FormatStyle, MonthStyle, NumericStyle, TextStyle};
use crate::intl::{
    iso_string, utc_string, weekday_name, DateTimeFormatOptions, InstantFormatter, Locale,
    LocaleFormatter, Rendering,
};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde_json::Value;
use std::sync::Arc;

pub const LOCAL_TIMEZONE: &str = "local";
pub const DEFAULT_FORMAT: &str = "iso";

/// The four time tools. Holds no mutable state, so one instance is shared
/// by every request.
#[derive(Clone)]
pub struct TimeTools {
    clock: Arc<dyn Clock>,
    formatter: Arc<dyn InstantFormatter>,
}

impl TimeTools {
    pub fn new(clock: Arc<dyn Clock>, formatter: Arc<dyn InstantFormatter>) -> Self {
        Self { clock, formatter }
    }

    pub fn get_current_time(&self, input: GetCurrentTimeInput) -> Result<String> {
        let format = choice(input.format.as_ref(), DEFAULT_FORMAT);
        let timezone = input.timezone.as_ref();
        let now = self.clock.now();

        let mut time_string = match format {
            Some("local") => self.host_default(now, Rendering::Time)?,
            Some("utc") => utc_string(now),
            Some("unix") => unix_seconds(now).to_string(),
            _ => iso_string(now),
        };

        // Epoch seconds read the same in every zone.
        if !is_local(timezone) && format != Some("unix") {
            let timezone = label(timezone, LOCAL_TIMEZONE);
            let options = DateTimeFormatOptions {
                time_style: Some(FormatStyle::Medium),
                ..Default::default()
            }
            .in_time_zone(timezone.as_str());
            match self.render(now, Locale::EnUs, options, Rendering::Time) {
                Ok(zoned) => time_string = zoned,
                Err(e) => {
                    tracing::debug!("Falling back to local time: {}", e);
                    time_string.push_str(&invalid_zone_note(&timezone));
                }
            }
        }

        Ok(format!(
            "Current time ({}): {}",
            label(input.format.as_ref(), DEFAULT_FORMAT),
            time_string
        ))
    }

    pub fn get_current_date(&self, input: GetCurrentDateInput) -> Result<String> {
        let format = choice(input.format.as_ref(), DEFAULT_FORMAT);
        let timezone = input.timezone.as_ref();
        let now = self.clock.now();

        let mut date_string = match format {
            Some("local") => self.host_default(now, Rendering::Date)?,
            Some("short") => self.render(
                now,
                Locale::EnUs,
                DateTimeFormatOptions {
                    year: Some(NumericStyle::Numeric),
                    month: Some(MonthStyle::Short),
                    day: Some(NumericStyle::Numeric),
                    ..Default::default()
                },
                Rendering::Date,
            )?,
            Some("long") => self.render(
                now,
                Locale::EnUs,
                DateTimeFormatOptions {
                    weekday: Some(TextStyle::Long),
                    year: Some(NumericStyle::Numeric),
                    month: Some(MonthStyle::Long),
                    day: Some(NumericStyle::Numeric),
                    ..Default::default()
                },
                Rendering::Date,
            )?,
            Some("custom") => self.custom_date(now, input.custom_format.as_ref()),
            _ => iso_date(now),
        };

        if !is_local(timezone) && format != Some("custom") {
            let timezone = label(timezone, LOCAL_TIMEZONE);
            let options = DateTimeFormatOptions {
                year: Some(NumericStyle::Numeric),
                month: Some(MonthStyle::TwoDigit),
                day: Some(NumericStyle::TwoDigit),
                ..Default::default()
            }
            .in_time_zone(timezone.as_str());
            match self.render(now, Locale::EnCa, options, Rendering::Date) {
                Ok(zoned) => date_string = zoned,
                Err(e) => {
                    tracing::debug!("Falling back to local date: {}", e);
                    date_string.push_str(&invalid_zone_note(&timezone));
                }
            }
        }

        Ok(format!(
            "Current date ({}): {}",
            label(input.format.as_ref(), DEFAULT_FORMAT),
            date_string
        ))
    }

    pub fn get_datetime_info(&self, input: GetDatetimeInfoInput) -> Result<String> {
        let now = self.clock.now();
        let host = self.formatter.to_host_time(now);

        let mut info = DatetimeInfo {
            timestamp: now.timestamp_millis(),
            iso: iso_string(now),
            local: self.host_default(now, Rendering::DateTime)?,
            utc: utc_string(now),
            unix: unix_seconds(now),
            year: host.year(),
            month: host.month(),
            day: host.day(),
            hour: host.hour(),
            minute: host.minute(),
            second: host.second(),
            day_of_week: weekday_name(host.weekday()).to_string(),
            timezone: self.formatter.resolved_time_zone(),
            timezone_specific: None,
            requested_timezone: None,
            timezone_error: None,
        };

        if !is_local(input.timezone.as_ref()) {
            let timezone = label(input.timezone.as_ref(), LOCAL_TIMEZONE);
            let options = DateTimeFormatOptions::default().in_time_zone(timezone.as_str());
            match self.render(now, Locale::EnUs, options, Rendering::DateTime) {
                Ok(zoned) => {
                    info.timezone_specific = Some(zoned);
                    info.requested_timezone = Some(timezone);
                }
                Err(_) => info.timezone_error = Some(format!("Invalid timezone: {}", timezone)),
            }
        }

        Ok(format!(
            "Date/Time Information:\n{}",
            serde_json::to_string_pretty(&info)?
        ))
    }

    pub fn format_timestamp(&self, input: FormatTimestampInput) -> Result<String> {
        let instant = parse_timestamp(input.timestamp.as_ref())?;
        let timezone = input.timezone.as_ref();

        let formatted = match choice(input.format.as_ref(), DEFAULT_FORMAT) {
            Some("local") => self.host_default(instant, Rendering::DateTime)?,
            Some("utc") => utc_string(instant),
            Some("custom") if !is_local(timezone) => {
                let timezone = label(timezone, LOCAL_TIMEZONE);
                let options = DateTimeFormatOptions::default().in_time_zone(timezone.as_str());
                match self.render(instant, Locale::EnUs, options, Rendering::DateTime) {
                    Ok(zoned) => zoned,
                    Err(_) => format!(
                        "{} (Invalid timezone: {})",
                        self.host_default(instant, Rendering::DateTime)?,
                        timezone
                    ),
                }
            }
            Some("custom") => self.host_default(instant, Rendering::DateTime)?,
            _ => iso_string(instant),
        };

        Ok(format!("Formatted timestamp: {}", formatted))
    }

    fn custom_date(&self, now: DateTime<Utc>, custom_format: Option<&Value>) -> String {
        let Some(raw) = custom_format.filter(|raw| is_truthy(raw)) else {
            return "Custom format requires customFormat parameter".to_string();
        };
        DateTimeFormatOptions::parse(&js_string(raw))
            .and_then(|options| self.render(now, Locale::EnUs, options, Rendering::Date))
            .unwrap_or_else(|e| format!("Error parsing custom format: {}", e))
    }

    /// Host locale, host zone, no explicit options.
    fn host_default(&self, instant: DateTime<Utc>, rendering: Rendering) -> Result<String> {
        self.render(
            instant,
            Locale::default(),
            DateTimeFormatOptions::default(),
            rendering,
        )
    }

    fn render(
        &self,
        instant: DateTime<Utc>,
        locale: Locale,
        options: DateTimeFormatOptions,
        rendering: Rendering,
    ) -> Result<String> {
        let resolved = options.resolve(rendering)?;
        self.formatter.format_instant(instant, locale, &resolved)
    }
}

impl Default for TimeTools {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(LocaleFormatter::default()))
    }
}

// Keyword an argument selects. Absent means the default; anything that is
// not a string matches no keyword.
fn choice<'a>(value: Option<&'a Value>, default: &'a str) -> Option<&'a str> {
    value.map_or(Some(default), Value::as_str)
}

// Argument as echoed back to the caller and handed to the zone lookup.
fn label(value: Option<&Value>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), js_string)
}

fn is_local(timezone: Option<&Value>) -> bool {
    choice(timezone, LOCAL_TIMEZONE) == Some(LOCAL_TIMEZONE)
}

// Date half of the ISO rendering, so expanded years stay consistent.
fn iso_date(instant: DateTime<Utc>) -> String {
    let iso = iso_string(instant);
    match iso.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => iso,
    }
}

fn invalid_zone_note(timezone: &str) -> String {
    format!(
        " (Note: Invalid timezone '{}', showing in local time)",
        timezone
    )
}
