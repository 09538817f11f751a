//! Weekly recurring availability
//!
//! Rules are stored in the host's local wall-clock time, one per day of
//! week, and localized to UTC per calendar date at query time.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::impl_domain_status_conversions;
use crate::utils::wall_clock::hhmm;

/// Day of week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl_domain_status_conversions!(DayOfWeek {
    Monday => "monday",
    Tuesday => "tuesday",
    Wednesday => "wednesday",
    Thursday => "thursday",
    Friday => "friday",
    Saturday => "saturday",
    Sunday => "sunday",
});

impl DayOfWeek {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub const fn to_weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
            Self::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

// The client exchanges days as "MONDAY".."SUNDAY" but older payloads used
// other casings, so parsing goes through FromStr.
impl Serialize for DayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string().to_uppercase())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Persisted availability rule for one day of week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub end_time: NaiveTime,
    pub enabled: bool,
}

/// One entry of a replace-all availability save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRuleInput {
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub end_time: NaiveTime,
    #[serde(default = "default_enabled", alias = "isAvailable")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl AvailabilityRuleInput {
    /// Materialize into a stored rule for `owner_id`.
    pub fn into_rule(self, owner_id: Uuid) -> AvailabilityRule {
        AvailabilityRule {
            id: Uuid::now_v7(),
            owner_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            enabled: self.enabled,
        }
    }
}
