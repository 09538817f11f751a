//! Bookable meeting templates

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_DURATION_MINUTES, DEFAULT_EVENT_COLOR, MAX_BUFFER_MINUTES, MAX_DURATION_MINUTES,
    MAX_EVENT_NAME_LENGTH,
};
use crate::errors::{Result, SchedulrError};
use crate::impl_domain_status_conversions;

/// Where the meeting takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// Free-form location taken from `location_details`.
    #[default]
    Custom,
    Zoom,
    GoogleMeet,
}

impl_domain_status_conversions!(LocationType {
    Custom => "custom",
    Zoom => "zoom",
    GoogleMeet => "google_meet",
});

impl LocationType {
    /// Video providers get a meeting link provisioned after commit.
    pub const fn is_video_provider(self) -> bool {
        matches!(self, Self::Zoom | Self::GoogleMeet)
    }
}

/// Bookable meeting definition owned by a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: u32,
    #[serde(rename = "bufferBefore")]
    pub buffer_before_minutes: u32,
    #[serde(rename = "bufferAfter")]
    pub buffer_after_minutes: u32,
    pub location_type: LocationType,
    pub location_details: Option<String>,
    pub active: bool,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventType {
    /// Build a new, active event type from a validated draft.
    ///
    /// # Errors
    /// Returns `SchedulrError::Validation` if the draft is malformed.
    pub fn from_draft(owner_id: Uuid, draft: EventTypeDraft, now: DateTime<Utc>) -> Result<Self> {
        let fields = draft.validate()?;
        Ok(Self {
            id: Uuid::now_v7(),
            owner_id,
            name: fields.name,
            description: fields.description,
            duration_minutes: fields.duration_minutes,
            buffer_before_minutes: fields.buffer_before_minutes,
            buffer_after_minutes: fields.buffer_after_minutes,
            location_type: fields.location_type,
            location_details: fields.location_details,
            active: true,
            color: fields.color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the editable fields from a draft, keeping identity and the
    /// active flag.
    ///
    /// # Errors
    /// Returns `SchedulrError::Validation` if the draft is malformed.
    pub fn apply_draft(&mut self, draft: EventTypeDraft, now: DateTime<Utc>) -> Result<()> {
        let fields = draft.validate()?;
        self.name = fields.name;
        self.description = fields.description;
        self.duration_minutes = fields.duration_minutes;
        self.buffer_before_minutes = fields.buffer_before_minutes;
        self.buffer_after_minutes = fields.buffer_after_minutes;
        self.location_type = fields.location_type;
        self.location_details = fields.location_details;
        self.color = fields.color;
        self.updated_at = now;
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn buffer_before(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_before_minutes))
    }

    pub fn buffer_after(&self) -> Duration {
        Duration::minutes(i64::from(self.buffer_after_minutes))
    }
}

/// Create/update payload for an event type
///
/// Numeric fields are signed so that negative input surfaces as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EventTypeDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    #[serde(default, rename = "bufferBefore")]
    pub buffer_before_minutes: i32,
    #[serde(default, rename = "bufferAfter")]
    pub buffer_after_minutes: i32,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(default)]
    pub location_details: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[allow(clippy::cast_possible_wrap)]
const fn default_duration() -> i32 {
    DEFAULT_DURATION_MINUTES as i32
}

struct ValidatedDraft {
    name: String,
    description: Option<String>,
    duration_minutes: u32,
    buffer_before_minutes: u32,
    buffer_after_minutes: u32,
    location_type: LocationType,
    location_details: Option<String>,
    color: String,
}

impl EventTypeDraft {
    /// Draft with defaults for everything but the name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            duration_minutes: default_duration(),
            buffer_before_minutes: 0,
            buffer_after_minutes: 0,
            location_type: LocationType::Custom,
            location_details: None,
            color: None,
        }
    }

    fn validate(self) -> Result<ValidatedDraft> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SchedulrError::Validation("event type name must not be empty".into()));
        }
        if name.chars().count() > MAX_EVENT_NAME_LENGTH {
            return Err(SchedulrError::Validation(format!(
                "event type name exceeds {MAX_EVENT_NAME_LENGTH} characters"
            )));
        }

        let duration_minutes =
            bounded_minutes("duration", self.duration_minutes, 1, MAX_DURATION_MINUTES)?;
        let buffer_before_minutes =
            bounded_minutes("buffer before", self.buffer_before_minutes, 0, MAX_BUFFER_MINUTES)?;
        let buffer_after_minutes =
            bounded_minutes("buffer after", self.buffer_after_minutes, 0, MAX_BUFFER_MINUTES)?;

        let color = match self.color.map(|c| c.trim().to_string()) {
            None => DEFAULT_EVENT_COLOR.to_string(),
            Some(c) if c.is_empty() => DEFAULT_EVENT_COLOR.to_string(),
            Some(c) if is_hex_color(&c) => c,
            Some(c) => {
                return Err(SchedulrError::Validation(format!("invalid color: {c}")));
            }
        };

        Ok(ValidatedDraft {
            name,
            description: non_blank(self.description),
            duration_minutes,
            buffer_before_minutes,
            buffer_after_minutes,
            location_type: self.location_type,
            location_details: non_blank(self.location_details),
            color,
        })
    }
}

fn bounded_minutes(field: &str, value: i32, min: i32, max: i32) -> Result<u32> {
    if value < min || value > max {
        return Err(SchedulrError::Validation(format!(
            "{field} must be between {min} and {max} minutes, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| SchedulrError::Validation(format!("{field} must not be negative")))
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value.chars().skip(1).all(|c| c.is_ascii_hexdigit())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
