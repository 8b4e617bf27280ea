use super::options::{DateTimeFormatOptions, FormatStyle, MonthStyle, NumericStyle, TextStyle};
use super::Locale;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// ISO-8601 with millisecond precision and a `Z` suffix. Years outside
/// 0..=9999 use the expanded six-digit signed form.
pub fn iso_string(instant: DateTime<Utc>) -> String {
    let year = instant.year();
    let rest = instant.format("%m-%dT%H:%M:%S%.3fZ");
    if (0..=9999).contains(&year) {
        format!("{:04}-{}", year, rest)
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{}{:06}-{}", sign, year.unsigned_abs(), rest)
    }
}

/// RFC-1123 style, e.g. `Fri, 05 Jan 2024 15:04:05 GMT`.
pub fn utc_string(instant: DateTime<Utc>) -> String {
    let year = instant.year();
    let year = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    };
    format!(
        "{}, {:02} {} {} {:02}:{:02}:{:02} GMT",
        short_name(weekday_name(instant.weekday())),
        instant.day(),
        short_name(MONTHS[instant.month0() as usize]),
        year,
        instant.hour(),
        instant.minute(),
        instant.second()
    )
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

// Components actually emitted, after styles have been expanded.
struct Fields {
    weekday: Option<TextStyle>,
    year: Option<NumericStyle>,
    month: Option<MonthStyle>,
    day: Option<NumericStyle>,
    hour: Option<NumericStyle>,
    minute: Option<NumericStyle>,
    second: Option<NumericStyle>,
    hour12: bool,
    zone_name: bool,
    joiner: &'static str,
}

impl Fields {
    fn from_options(options: &DateTimeFormatOptions) -> Self {
        let mut fields = Fields {
            weekday: options.weekday,
            year: options.year,
            month: options.month,
            day: options.day,
            hour: options.hour,
            minute: options.minute,
            second: options.second,
            hour12: options.hour12.unwrap_or(true),
            zone_name: options.time_zone_name.is_some(),
            joiner: ", ",
        };

        if let Some(style) = options.date_style {
            fields.day = Some(NumericStyle::Numeric);
            fields.year = Some(NumericStyle::Numeric);
            match style {
                FormatStyle::Full => {
                    fields.weekday = Some(TextStyle::Long);
                    fields.month = Some(MonthStyle::Long);
                    fields.joiner = " at ";
                }
                FormatStyle::Long => {
                    fields.month = Some(MonthStyle::Long);
                    fields.joiner = " at ";
                }
                FormatStyle::Medium => fields.month = Some(MonthStyle::Short),
                FormatStyle::Short => {
                    fields.month = Some(MonthStyle::Numeric);
                    fields.year = Some(NumericStyle::TwoDigit);
                }
            }
        }

        if let Some(style) = options.time_style {
            fields.hour = Some(NumericStyle::Numeric);
            fields.minute = Some(NumericStyle::TwoDigit);
            if style != FormatStyle::Short {
                fields.second = Some(NumericStyle::TwoDigit);
            }
            if matches!(style, FormatStyle::Full | FormatStyle::Long) {
                fields.zone_name = true;
            }
        }

        fields
    }

    fn has_clock(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}

/// Renders `local` (already shifted into its zone) using the locale's
/// patterns. Options must have been resolved for a rendering entry point.
pub fn render<Tz: TimeZone>(
    local: &DateTime<Tz>,
    zone_name: &str,
    locale: Locale,
    options: &DateTimeFormatOptions,
) -> String {
    let fields = Fields::from_options(options);
    let date = date_part(local, &fields, locale);
    let mut time = time_part(local, &fields, locale);

    if fields.zone_name {
        match time.as_mut() {
            Some(time) => {
                time.push(' ');
                time.push_str(zone_name);
            }
            None => time = Some(zone_name.to_string()),
        }
    }

    match (date, time) {
        (Some(date), Some(time)) => {
            let joiner = if fields.zone_name && !fields.has_clock() {
                ", "
            } else {
                fields.joiner
            };
            format!("{}{}{}", date, joiner, time)
        }
        (Some(date), None) => date,
        (None, Some(time)) => time,
        (None, None) => String::new(),
    }
}

fn date_part<Tz: TimeZone>(local: &DateTime<Tz>, fields: &Fields, locale: Locale) -> Option<String> {
    let weekday = fields
        .weekday
        .map(|style| text(weekday_name(local.weekday()), style));
    let day = fields.day.map(|style| numeric(local.day(), style));
    let year = fields.year.map(|style| year_text(local.year(), style));

    let body = match fields.month {
        Some(MonthStyle::Narrow) | Some(MonthStyle::Short) | Some(MonthStyle::Long) => {
            let style = match fields.month {
                Some(MonthStyle::Narrow) => TextStyle::Narrow,
                Some(MonthStyle::Short) => TextStyle::Short,
                _ => TextStyle::Long,
            };
            let name = text(MONTHS[local.month0() as usize], style);
            Some(match (day, year) {
                (Some(day), Some(year)) => format!("{} {}, {}", name, day, year),
                (Some(day), None) => format!("{} {}", name, day),
                (None, Some(year)) => format!("{} {}", name, year),
                (None, None) => name,
            })
        }
        numeric_month => {
            let month = numeric_month.map(|style| match style {
                MonthStyle::TwoDigit => format!("{:02}", local.month()),
                _ => local.month().to_string(),
            });
            let (ordered, separator) = match locale {
                Locale::EnUs => ([month, day, year], "/"),
                Locale::EnCa => ([year, month, day], "-"),
            };
            let parts: Vec<String> = ordered.into_iter().flatten().collect();
            (!parts.is_empty()).then(|| parts.join(separator))
        }
    };

    match (weekday, body) {
        (Some(weekday), Some(body)) => Some(format!("{}, {}", weekday, body)),
        (Some(weekday), None) => Some(weekday),
        (None, body) => body,
    }
}

fn time_part<Tz: TimeZone>(local: &DateTime<Tz>, fields: &Fields, locale: Locale) -> Option<String> {
    if !fields.has_clock() {
        return None;
    }

    let Some(hour_style) = fields.hour else {
        return Some(match (fields.minute, fields.second) {
            (Some(_), Some(_)) => format!("{:02}:{:02}", local.minute(), local.second()),
            (Some(style), None) => numeric(local.minute(), style),
            (None, Some(style)) => numeric(local.second(), style),
            (None, None) => String::new(),
        });
    };

    let mut parts = Vec::with_capacity(3);
    if fields.hour12 {
        let hour = match local.hour() % 12 {
            0 => 12,
            h => h,
        };
        parts.push(numeric(hour, hour_style));
    } else {
        parts.push(format!("{:02}", local.hour()));
    }
    if fields.minute.is_some() || fields.second.is_some() {
        parts.push(format!("{:02}", local.minute()));
    }
    if fields.second.is_some() {
        parts.push(format!("{:02}", local.second()));
    }

    let mut out = parts.join(":");
    if fields.hour12 {
        out.push(' ');
        out.push_str(day_period(local.hour() < 12, locale));
    }
    Some(out)
}

fn day_period(morning: bool, locale: Locale) -> &'static str {
    match (locale, morning) {
        (Locale::EnUs, true) => "AM",
        (Locale::EnUs, false) => "PM",
        (Locale::EnCa, true) => "a.m.",
        (Locale::EnCa, false) => "p.m.",
    }
}

fn numeric(value: u32, style: NumericStyle) -> String {
    match style {
        NumericStyle::Numeric => value.to_string(),
        NumericStyle::TwoDigit => format!("{:02}", value % 100),
    }
}

fn year_text(year: i32, style: NumericStyle) -> String {
    match style {
        NumericStyle::Numeric => year.to_string(),
        NumericStyle::TwoDigit => format!("{:02}", year.rem_euclid(100)),
    }
}

fn text(name: &'static str, style: TextStyle) -> String {
    match style {
        TextStyle::Long => name.to_string(),
        TextStyle::Short => short_name(name).to_string(),
        TextStyle::Narrow => name[..1].to_string(),
    }
}

fn short_name(name: &'static str) -> &'static str {
    &name[..3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intl::options::{Rendering, ZoneNameStyle};

    // Friday, 5 January 2024, 15:04:05.123 UTC
    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 5).unwrap() + chrono::Duration::milliseconds(123)
    }

    fn render_us(options: DateTimeFormatOptions, rendering: Rendering) -> String {
        let resolved = options.resolve(rendering).unwrap();
        render(&instant(), "UTC", Locale::EnUs, &resolved)
    }

    #[test]
    fn fixed_formats() {
        assert_eq!(iso_string(instant()), "2024-01-05T15:04:05.123Z");
        assert_eq!(utc_string(instant()), "Fri, 05 Jan 2024 15:04:05 GMT");
        let ancient = DateTime::<Utc>::from_timestamp_millis(-100_000_000_000_000).unwrap();
        assert_eq!(utc_string(ancient), "Thu, 15 Feb -1199 14:13:20 GMT");
        assert_eq!(
            iso_string(DateTime::<Utc>::from_timestamp_millis(0).unwrap()),
            "1970-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn expanded_years_in_iso() {
        let far = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(iso_string(far), "+012000-01-01T00:00:00.000Z");
    }

    #[test]
    fn default_renderings() {
        let none = DateTimeFormatOptions::default();
        assert_eq!(render_us(none.clone(), Rendering::Date), "1/5/2024");
        assert_eq!(render_us(none.clone(), Rendering::Time), "3:04:05 PM");
        assert_eq!(render_us(none, Rendering::DateTime), "1/5/2024, 3:04:05 PM");
    }

    #[test]
    fn textual_months() {
        let short = DateTimeFormatOptions {
            year: Some(NumericStyle::Numeric),
            month: Some(MonthStyle::Short),
            day: Some(NumericStyle::Numeric),
            ..Default::default()
        };
        assert_eq!(render_us(short, Rendering::Date), "Jan 5, 2024");

        let long = DateTimeFormatOptions {
            weekday: Some(TextStyle::Long),
            year: Some(NumericStyle::Numeric),
            month: Some(MonthStyle::Long),
            day: Some(NumericStyle::Numeric),
            ..Default::default()
        };
        assert_eq!(render_us(long, Rendering::Date), "Friday, January 5, 2024");

        let month_year = DateTimeFormatOptions {
            year: Some(NumericStyle::Numeric),
            month: Some(MonthStyle::Long),
            ..Default::default()
        };
        assert_eq!(render_us(month_year, Rendering::Date), "January 2024");
    }

    #[test]
    fn weekday_only() {
        let options = DateTimeFormatOptions {
            weekday: Some(TextStyle::Long),
            ..Default::default()
        };
        assert_eq!(render_us(options, Rendering::Date), "Friday");
    }

    #[test]
    fn canadian_numeric_dates() {
        let options = DateTimeFormatOptions {
            year: Some(NumericStyle::Numeric),
            month: Some(MonthStyle::TwoDigit),
            day: Some(NumericStyle::TwoDigit),
            ..Default::default()
        }
        .resolve(Rendering::Date)
        .unwrap();
        assert_eq!(render(&instant(), "UTC", Locale::EnCa, &options), "2024-01-05");
    }

    #[test]
    fn time_styles() {
        let medium = DateTimeFormatOptions {
            time_style: Some(FormatStyle::Medium),
            ..Default::default()
        };
        assert_eq!(render_us(medium, Rendering::Time), "3:04:05 PM");

        let short = DateTimeFormatOptions {
            time_style: Some(FormatStyle::Short),
            ..Default::default()
        };
        assert_eq!(render_us(short, Rendering::Time), "3:04 PM");

        let long = DateTimeFormatOptions {
            date_style: Some(FormatStyle::Long),
            time_style: Some(FormatStyle::Long),
            ..Default::default()
        };
        assert_eq!(
            render_us(long, Rendering::DateTime),
            "January 5, 2024 at 3:04:05 PM UTC"
        );
    }

    #[test]
    fn twenty_four_hour_clock() {
        let options = DateTimeFormatOptions {
            hour: Some(NumericStyle::Numeric),
            minute: Some(NumericStyle::Numeric),
            hour12: Some(false),
            ..Default::default()
        };
        assert_eq!(render_us(options, Rendering::Time), "15:04");
    }

    #[test]
    fn zone_name_after_date_only() {
        let options = DateTimeFormatOptions {
            time_zone_name: Some(ZoneNameStyle::Short),
            ..Default::default()
        };
        assert_eq!(render_us(options, Rendering::Date), "1/5/2024, UTC");
    }
}
