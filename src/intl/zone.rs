use super::options::ZoneNameStyle;
use crate::error::{Result, TimeError};
use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

/// Abbreviations en-US shows as-is; other zones are named by GMT offset.
const US_ABBREVIATIONS: &[&str] = &[
    "UTC", "EST", "EDT", "CST", "CDT", "MST", "MDT", "PST", "PDT", "AKST", "AKDT", "HST", "HDT",
];

const LONG_NAMES: &[(&str, &str)] = &[
    ("UTC", "Coordinated Universal Time"),
    ("GMT", "Greenwich Mean Time"),
    ("EST", "Eastern Standard Time"),
    ("EDT", "Eastern Daylight Time"),
    ("CST", "Central Standard Time"),
    ("CDT", "Central Daylight Time"),
    ("MST", "Mountain Standard Time"),
    ("MDT", "Mountain Daylight Time"),
    ("PST", "Pacific Standard Time"),
    ("PDT", "Pacific Daylight Time"),
    ("AKST", "Alaska Standard Time"),
    ("AKDT", "Alaska Daylight Time"),
    ("HST", "Hawaii-Aleutian Standard Time"),
    ("HDT", "Hawaii-Aleutian Daylight Time"),
    ("BST", "British Summer Time"),
    ("WET", "Western European Standard Time"),
    ("WEST", "Western European Summer Time"),
    ("CET", "Central European Standard Time"),
    ("CEST", "Central European Summer Time"),
    ("EET", "Eastern European Standard Time"),
    ("EEST", "Eastern European Summer Time"),
    ("JST", "Japan Standard Time"),
    ("KST", "Korean Standard Time"),
    ("AEST", "Australian Eastern Standard Time"),
    ("AEDT", "Australian Eastern Daylight Time"),
    ("ACST", "Australian Central Standard Time"),
    ("ACDT", "Australian Central Daylight Time"),
    ("AWST", "Australian Western Standard Time"),
    ("NZST", "New Zealand Standard Time"),
    ("NZDT", "New Zealand Daylight Time"),
    ("SAST", "South Africa Standard Time"),
];

/// The zone an instant is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Whatever the host operating system considers local time.
    Host,
    Iana(Tz),
}

impl Zone {
    /// Looks up an IANA zone name. Matching is case-insensitive, so
    /// `america/new_york` resolves like `America/New_York`. Surrounding
    /// whitespace is not ignored.
    pub fn parse(name: &str) -> Result<Self> {
        Tz::from_str_insensitive(name)
            .map(Zone::Iana)
            .map_err(|_| TimeError::InvalidTimeZone(name.to_string()))
    }

    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Host => instant.with_timezone(&Local).fixed_offset(),
            Zone::Iana(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }

    /// The zone name shown for `timeZoneName`, e.g. `EST` / `GMT+1` in short
    /// form and `Eastern Standard Time` / `GMT+01:00` in long form.
    pub fn display_name(&self, instant: DateTime<Utc>, style: ZoneNameStyle) -> String {
        let offset = self.localize(instant).offset().local_minus_utc();
        let tz = self.database_zone();
        let abbreviation = tz.map(|tz| instant.with_timezone(&tz).format("%Z").to_string());
        let abbreviation = abbreviation.as_deref().unwrap_or_default();

        match style {
            ZoneNameStyle::Short if US_ABBREVIATIONS.contains(&abbreviation) => {
                abbreviation.to_string()
            }
            ZoneNameStyle::Short => gmt_offset(offset, false),
            ZoneNameStyle::Long => {
                let zone_name = tz.map(|tz| tz.name()).unwrap_or_default();
                long_name(abbreviation, zone_name)
                    .map(str::to_string)
                    .unwrap_or_else(|| gmt_offset(offset, true))
            }
        }
    }

    /// IANA identifier of the zone; the host zone falls back to `UTC` when
    /// the platform does not expose one.
    pub fn id(&self) -> String {
        match self {
            Zone::Host => iana_time_zone::get_timezone().unwrap_or_else(|e| {
                tracing::debug!("Could not resolve host time zone: {}", e);
                "UTC".to_string()
            }),
            Zone::Iana(tz) => tz.name().to_string(),
        }
    }

    // The host zone only has names when its id is in the tz database.
    fn database_zone(&self) -> Option<Tz> {
        match self {
            Zone::Host => iana_time_zone::get_timezone()
                .ok()
                .and_then(|id| id.parse::<Tz>().ok()),
            Zone::Iana(tz) => Some(*tz),
        }
    }
}

// A few abbreviations mean different zones in different regions.
fn long_name(abbreviation: &str, zone_name: &str) -> Option<&'static str> {
    match (abbreviation, zone_name) {
        ("CST", zone) if zone.starts_with("Asia/") => Some("China Standard Time"),
        ("IST", "Asia/Kolkata" | "Asia/Calcutta") => Some("India Standard Time"),
        ("IST", "Europe/Dublin") => Some("Irish Standard Time"),
        ("IST", "Asia/Jerusalem" | "Asia/Tel_Aviv") => Some("Israel Standard Time"),
        _ => LONG_NAMES
            .iter()
            .find(|(short, _)| *short == abbreviation)
            .map(|(_, long)| *long),
    }
}

fn gmt_offset(seconds: i32, long: bool) -> String {
    if seconds == 0 {
        return "GMT".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if long {
        format!("GMT{}{:02}:{:02}", sign, hours, minutes)
    } else if minutes == 0 {
        format!("GMT{}{}", sign, hours)
    } else {
        format!("GMT{}{}:{:02}", sign, hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(
            Zone::parse("america/new_york").unwrap(),
            Zone::Iana(chrono_tz::America::New_York)
        );
        assert_eq!(Zone::parse("UTC").unwrap(), Zone::Iana(chrono_tz::UTC));
    }

    #[test]
    fn rejects_unknown_names() {
        let err = Zone::parse("Not/AZone").unwrap_err();
        assert_eq!(err.to_string(), "Invalid time zone specified: Not/AZone");
    }

    #[test]
    fn rejects_padded_names() {
        assert!(Zone::parse(" UTC ").is_err());
        assert!(Zone::parse("America/New_York\n").is_err());
    }

    #[test]
    fn localizes_with_dst_offsets() {
        let zone = Zone::parse("Europe/London").unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(zone.localize(summer).hour(), 13);
        assert_eq!(zone.localize(winter).hour(), 12);
        assert_eq!(zone.id(), "Europe/London");
    }

    #[test]
    fn names_zones_like_en_us() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 5).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let new_york = Zone::Iana(chrono_tz::America::New_York);
        let london = Zone::Iana(chrono_tz::Europe::London);
        let kolkata = Zone::Iana(chrono_tz::Asia::Kolkata);

        assert_eq!(new_york.display_name(winter, ZoneNameStyle::Short), "EST");
        assert_eq!(
            new_york.display_name(summer, ZoneNameStyle::Long),
            "Eastern Daylight Time"
        );
        assert_eq!(london.display_name(winter, ZoneNameStyle::Short), "GMT");
        assert_eq!(london.display_name(summer, ZoneNameStyle::Short), "GMT+1");
        assert_eq!(
            london.display_name(summer, ZoneNameStyle::Long),
            "British Summer Time"
        );
        assert_eq!(
            Zone::Iana(chrono_tz::UTC).display_name(winter, ZoneNameStyle::Long),
            "Coordinated Universal Time"
        );
        assert_eq!(kolkata.display_name(winter, ZoneNameStyle::Short), "GMT+5:30");
        assert_eq!(
            kolkata.display_name(winter, ZoneNameStyle::Long),
            "India Standard Time"
        );
        assert_eq!(
            Zone::Iana(chrono_tz::Asia::Dubai).display_name(winter, ZoneNameStyle::Long),
            "GMT+04:00"
        );
    }

    #[test]
    fn host_zone_is_never_a_bare_offset() {
        let name = Zone::Host.display_name(Utc::now(), ZoneNameStyle::Short);
        assert!(!name.starts_with('+') && !name.starts_with('-'), "{name}");
    }
}
