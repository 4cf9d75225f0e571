//! Time-of-day bucket sent with the personalized message request.

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Before noon.
    Morning,
    /// Noon until 17:00.
    Afternoon,
    /// 17:00 onwards.
    Evening,
}

impl TimeOfDay {
    /// Bucket an hour of the day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 17 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }

    /// Bucket a timestamp by its hour in its own timezone.
    pub fn at<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self::from_hour(time.hour())
    }

    /// Bucket the current local time.
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    /// Query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn bucket_boundaries() {
        assert_eq!(TimeOfDay::from_hour(0), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(16), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Evening);
    }

    #[test]
    fn bucket_uses_the_timestamps_own_offset() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        assert_eq!(TimeOfDay::at(&utc), TimeOfDay::Morning);

        let plus_eight = utc.with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap());
        assert_eq!(TimeOfDay::at(&plus_eight), TimeOfDay::Evening);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TimeOfDay::Afternoon).unwrap(),
            "\"afternoon\""
        );
        assert_eq!(TimeOfDay::Evening.to_string(), "evening");
    }
}
