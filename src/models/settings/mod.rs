// Settings module
// User-facing configuration of the time grid, stored as TOML

use serde::{Deserialize, Serialize};

use crate::models::day_range::{validate_granularity, validate_hour_window, DEFAULT_GRANULARITY_MINUTES};
use crate::models::timezone::TimezoneSpec;
use crate::utils::date::TimePoint;

/// Default pixel width of one timezone ruler.
pub const DEFAULT_TIMES_WIDTH: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGridSettings {
    /// Width in pixels of one timezone's hour labels
    pub times_width: f64,
    pub granularity_minutes: u32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub start_day_of_week: u8,
    /// Hide Saturday and Sunday columns
    pub workweek: bool,
    /// Give weekend columns half the width of weekdays
    pub narrow_weekend: bool,
    pub hour_start: u32,
    pub hour_end: u32,
    pub timezones_collapsed: bool,
    /// Displayed timezones, primary first. Empty means the local offset only.
    pub timezones: Vec<TimezoneSetting>,
}

impl Default for TimeGridSettings {
    fn default() -> Self {
        Self {
            times_width: DEFAULT_TIMES_WIDTH,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            start_day_of_week: 0, // Sunday
            workweek: false,
            narrow_weekend: false,
            hour_start: 0,
            hour_end: 24,
            timezones_collapsed: false,
            timezones: Vec::new(),
        }
    }
}

/// A timezone entry in the settings file: either an IANA zone or a fixed offset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneSetting {
    pub zone: Option<String>,
    pub offset_minutes: Option<i32>,
    pub display_label: Option<String>,
    pub tooltip: Option<String>,
}

impl TimezoneSetting {
    /// Resolve to a spec using the offset in effect at `at`.
    pub fn resolve(&self, at: TimePoint) -> crate::error::Result<TimezoneSpec> {
        let mut spec = match (&self.zone, self.offset_minutes) {
            (Some(zone), _) => TimezoneSpec::from_iana(zone, at)?,
            (None, Some(minutes)) => TimezoneSpec::from_offset_minutes(minutes)?,
            (None, None) => TimezoneSpec::local(at),
        };
        if self.display_label.is_some() {
            spec.display_label = self.display_label.clone();
        }
        if self.tooltip.is_some() {
            spec.tooltip = self.tooltip.clone();
        }
        Ok(spec)
    }
}

impl TimeGridSettings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), String> {
        if !self.times_width.is_finite() || self.times_width < 0.0 {
            return Err(format!("times_width must be a non-negative number, got {}", self.times_width));
        }

        validate_granularity(self.granularity_minutes).map_err(|e| e.to_string())?;
        validate_hour_window(self.hour_start, self.hour_end).map_err(|e| e.to_string())?;
        let window_minutes = (self.hour_end - self.hour_start) * 60;
        if self.granularity_minutes > window_minutes {
            return Err(format!(
                "granularity_minutes {} does not fit in the {}:00-{}:00 window",
                self.granularity_minutes, self.hour_start, self.hour_end
            ));
        }

        if self.start_day_of_week > 6 {
            return Err(format!(
                "start_day_of_week must be 0-6, got {}",
                self.start_day_of_week
            ));
        }

        for timezone in &self.timezones {
            if timezone.zone.is_none() && timezone.offset_minutes.is_none() && timezone.display_label.is_none() {
                return Err("Each timezone needs a zone, an offset or a label".to_string());
            }
        }

        Ok(())
    }

    /// Resolve configured timezones at `at`; never empty.
    ///
    /// Entries that fail to resolve are skipped with a warning.
    pub fn resolve_timezones(&self, at: TimePoint) -> Vec<TimezoneSpec> {
        let mut specs: Vec<TimezoneSpec> = self
            .timezones
            .iter()
            .filter_map(|setting| match setting.resolve(at) {
                Ok(spec) => Some(spec),
                Err(e) => {
                    log::warn!("Skipping timezone {:?}: {}", setting, e);
                    None
                }
            })
            .collect();

        if specs.is_empty() {
            specs.push(TimezoneSpec::local(at));
        }
        specs
    }

    pub fn is_full_day(&self) -> bool {
        self.hour_start == 0 && self.hour_end == 24
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn noon() -> TimePoint {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap().fixed_offset()
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = TimeGridSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.times_width, 120.0);
        assert_eq!(settings.granularity_minutes, 30);
        assert!(settings.is_full_day());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = TimeGridSettings {
            granularity_minutes: 7,
            ..TimeGridSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.granularity_minutes = 15;
        settings.start_day_of_week = 7;
        assert!(settings.validate().is_err());

        settings.start_day_of_week = 1;
        settings.hour_start = 20;
        settings.hour_end = 8;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_granularity_longer_than_window() {
        let mut settings = TimeGridSettings {
            hour_start: 8,
            hour_end: 9,
            granularity_minutes: 90,
            ..TimeGridSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.hour_end = 18;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_resolve_timezones_skips_unknown_and_keeps_order() {
        let settings = TimeGridSettings {
            timezones: vec![
                TimezoneSetting {
                    zone: Some("Asia/Seoul".to_string()),
                    ..TimezoneSetting::default()
                },
                TimezoneSetting {
                    zone: Some("Nowhere/Special".to_string()),
                    ..TimezoneSetting::default()
                },
                TimezoneSetting {
                    offset_minutes: Some(-300),
                    display_label: Some("EST".to_string()),
                    ..TimezoneSetting::default()
                },
            ],
            ..TimeGridSettings::default()
        };

        let specs = settings.resolve_timezones(noon());
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].offset_minutes, 540);
        assert_eq!(specs[1].label(), "EST");
    }

    #[test]
    fn test_resolve_timezones_never_empty() {
        let specs = TimeGridSettings::default().resolve_timezones(noon());
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: TimeGridSettings = toml::from_str("granularity_minutes = 15\nworkweek = true\n").unwrap();
        assert_eq!(settings.granularity_minutes, 15);
        assert!(settings.workweek);
        assert_eq!(settings.times_width, DEFAULT_TIMES_WIDTH);
    }
}
