//! Host (calendar owner) types

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::Result;
use crate::utils::timezone::parse_timezone;

/// Account that owns availability, event types and bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Host {
    pub id: Uuid,
    /// Lowercase, unique; used in public booking URLs.
    pub username: String,
    pub name: String,
    pub email: String,
    /// IANA timezone identifier availability rules are expressed in.
    pub timezone: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Host {
    /// Resolve the host's timezone.
    ///
    /// # Errors
    /// Returns `SchedulrError::Validation` if the stored identifier is unknown.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Public projection without contact details.
    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            username: self.username.clone(),
            name: self.name.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

/// What a guest may see about a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub username: String,
    pub name: String,
    pub timezone: String,
}
