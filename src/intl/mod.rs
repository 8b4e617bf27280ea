//! Locale-aware rendering of instants.
//!
//! The tools only talk to [`InstantFormatter`]; [`LocaleFormatter`] is the
//! built-in implementation backed by `chrono` and the `chrono-tz` zone data.

pub mod options;
pub mod render;
pub mod zone;

use crate::config::LocaleConfig;
use crate::error::Result;
use chrono::{DateTime, FixedOffset, Utc};

use options::{FormatStyle, ZoneNameStyle};

pub use options::{DateTimeFormatOptions, Rendering};
pub use render::{iso_string, utc_string, weekday_name};
pub use zone::Zone;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// US English; also used wherever the host default locale is wanted.
    #[default]
    EnUs,
    /// Canadian English, which orders numeric dates year-month-day.
    EnCa,
}

pub trait InstantFormatter: Send + Sync {
    /// Renders `instant` with already-resolved `options`. The instant is
    /// shown in `options.time_zone` when set, otherwise in the host zone.
    fn format_instant(
        &self,
        instant: DateTime<Utc>,
        locale: Locale,
        options: &DateTimeFormatOptions,
    ) -> Result<String>;

    /// `instant` as wall-clock time in the host zone.
    fn to_host_time(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset>;

    /// IANA identifier of the host zone.
    fn resolved_time_zone(&self) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    host_zone: Zone,
}

impl LocaleFormatter {
    pub fn new(host_zone: Zone) -> Self {
        Self { host_zone }
    }

    pub fn from_config(config: &LocaleConfig) -> Result<Self> {
        let host_zone = match config.local_timezone.as_deref() {
            Some(name) => Zone::parse(name)?,
            None => Zone::Host,
        };
        Ok(Self::new(host_zone))
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new(Zone::Host)
    }
}

impl InstantFormatter for LocaleFormatter {
    fn format_instant(
        &self,
        instant: DateTime<Utc>,
        locale: Locale,
        options: &DateTimeFormatOptions,
    ) -> Result<String> {
        let zone = match options.time_zone.as_deref() {
            Some(name) => Zone::parse(name)?,
            None => self.host_zone,
        };
        let local = zone.localize(instant);
        // Full time style spells the zone out; long abbreviates it.
        let name_style = options.time_zone_name.or(match options.time_style {
            Some(FormatStyle::Full) => Some(ZoneNameStyle::Long),
            Some(FormatStyle::Long) => Some(ZoneNameStyle::Short),
            _ => None,
        });
        let zone_name = name_style
            .map(|style| zone.display_name(instant, style))
            .unwrap_or_default();
        Ok(render::render(&local, &zone_name, locale, options))
    }

    fn to_host_time(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        self.host_zone.localize(instant)
    }

    fn resolved_time_zone(&self) -> String {
        self.host_zone.id()
    }
}
