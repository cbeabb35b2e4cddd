// Timezone module
// One timezone shown as a ruler of hour labels

use chrono::{FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeGridError};
use crate::utils::date::TimePoint;

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// A displayed timezone. The first spec in a list is the primary timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneSpec {
    pub offset_minutes: i32,
    #[serde(default)]
    pub display_label: Option<String>,
    #[serde(default)]
    pub tooltip: Option<String>,
}

impl TimezoneSpec {
    pub fn from_offset_minutes(offset_minutes: i32) -> Result<Self> {
        if offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(TimeGridError::InvalidOffset(offset_minutes));
        }
        Ok(Self {
            offset_minutes,
            display_label: None,
            tooltip: None,
        })
    }

    /// Resolve an IANA zone (e.g. `Asia/Seoul`) to the offset in effect at `at`.
    ///
    /// The zone name becomes the tooltip and its abbreviation the label.
    pub fn from_iana(name: &str, at: TimePoint) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| TimeGridError::UnknownTimezone(name.to_string()))?;
        let local = tz.from_utc_datetime(&at.naive_utc());
        let offset_minutes = local.offset().fix().local_minus_utc() / 60;

        Ok(Self {
            offset_minutes,
            display_label: Some(local.format("%Z").to_string()),
            tooltip: Some(name.to_string()),
        })
    }

    /// The machine's local offset at `at`.
    pub fn local(at: TimePoint) -> Self {
        let offset = chrono::Local.offset_from_utc_datetime(&at.naive_utc());
        Self {
            offset_minutes: offset.local_minus_utc() / 60,
            display_label: None,
            tooltip: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.offset_minutes * 60).unwrap_or(Utc.fix())
    }

    /// Label text: the display label if set, otherwise `UTC+hh:mm`.
    pub fn label(&self) -> String {
        if let Some(label) = self.display_label.as_deref().filter(|l| !l.is_empty()) {
            return label.to_string();
        }
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let minutes = self.offset_minutes.abs();
        format!("UTC{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
    }

    /// Express `instant` in this timezone's civil time.
    pub fn localize(&self, instant: TimePoint) -> TimePoint {
        instant.with_timezone(&self.offset())
    }
}
