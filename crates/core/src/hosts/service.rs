//! Host service - registration, profile maintenance and public lookup

use std::sync::Arc;

use schedulr_domain::{
    is_plausible_email, parse_timezone, Host, PublicProfile, Result, SchedulrError,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ports::HostRepository;
use crate::clock::Clock;

const MAX_USERNAME_LENGTH: usize = 50;

/// Registration payload for a host account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHost {
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Profile changes; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Host service
pub struct HostService {
    repository: Arc<dyn HostRepository>,
    clock: Arc<dyn Clock>,
    default_timezone: String,
}

impl HostService {
    pub fn new(
        repository: Arc<dyn HostRepository>,
        clock: Arc<dyn Clock>,
        default_timezone: impl Into<String>,
    ) -> Self {
        Self { repository, clock, default_timezone: default_timezone.into() }
    }

    /// Get a host by ID
    pub async fn get(&self, id: Uuid) -> Result<Host> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| SchedulrError::NotFound(format!("host {id}")))
    }

    /// Active host by username (case-insensitive)
    pub async fn get_active_by_username(&self, username: &str) -> Result<Host> {
        self.repository
            .get_by_username(&username.trim().to_lowercase())
            .await?
            .filter(|host| host.active)
            .ok_or_else(|| SchedulrError::NotFound(format!("host {username}")))
    }

    /// Name and timezone of a host; never the email address.
    pub async fn public_profile(&self, username: &str) -> Result<PublicProfile> {
        Ok(self.get_active_by_username(username).await?.public_profile())
    }

    /// Register a new host.
    ///
    /// Usernames are stored lowercase and must be made of ASCII letters,
    /// digits, `-` or `_`. A missing timezone falls back to the configured
    /// default.
    pub async fn register(&self, new_host: NewHost) -> Result<Host> {
        let username = new_host.username.trim().to_lowercase();
        validate_username(&username)?;

        let name = validate_name(&new_host.name)?;

        let email = new_host.email.trim().to_lowercase();
        if !is_plausible_email(&email) {
            return Err(SchedulrError::Validation(format!("invalid email: {email}")));
        }

        let timezone = new_host
            .timezone
            .map(|tz| tz.trim().to_string())
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| self.default_timezone.clone());
        parse_timezone(&timezone)?;

        let host = Host {
            id: Uuid::now_v7(),
            username,
            name,
            email,
            timezone,
            active: true,
            created_at: self.clock.now(),
        };
        self.repository.create(host.clone()).await?;

        info!(host_id = %host.id, username = %host.username, "Registered host");
        Ok(host)
    }

    /// Change name, username or timezone of the owner's profile.
    ///
    /// A new timezone takes effect on the next slot computation; existing
    /// bookings keep their UTC instants.
    ///
    /// # Errors
    /// `NotFound` for an unknown owner, `Validation` for a malformed field
    /// or a username held by another host.
    pub async fn update_profile(&self, owner_id: Uuid, update: HostProfileUpdate) -> Result<Host> {
        let mut host = self.get(owner_id).await?;

        if let Some(name) = update.name {
            host.name = validate_name(&name)?;
        }

        if let Some(username) = update.username {
            let username = username.trim().to_lowercase();
            validate_username(&username)?;
            if username != host.username {
                let taken = self
                    .repository
                    .get_by_username(&username)
                    .await?
                    .is_some_and(|other| other.id != owner_id);
                if taken {
                    return Err(SchedulrError::Validation(format!(
                        "username already taken: {username}"
                    )));
                }
                host.username = username;
            }
        }

        if let Some(timezone) = update.timezone {
            let timezone = timezone.trim().to_string();
            parse_timezone(&timezone)?;
            host.timezone = timezone;
        }

        self.repository.update(host.clone()).await?;

        info!(
            host_id = %host.id,
            username = %host.username,
            timezone = %host.timezone,
            "Updated host profile"
        );
        Ok(host)
    }

    /// Flip the active flag. Inactive hosts vanish from public pages and
    /// cannot be booked.
    ///
    /// # Errors
    /// `NotFound` for an unknown host.
    pub async fn toggle_active(&self, id: Uuid) -> Result<Host> {
        let mut host = self.get(id).await?;
        host.active = !host.active;

        if !self.repository.set_active(id, host.active).await? {
            return Err(SchedulrError::NotFound(format!("host {id}")));
        }

        info!(host_id = %id, active = host.active, "Toggled host");
        Ok(host)
    }

    /// Every host, oldest first
    pub async fn list_all(&self) -> Result<Vec<Host>> {
        self.repository.list().await
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SchedulrError::Validation("name must not be empty".into()));
    }
    Ok(name.to_string())
}

fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        return Err(SchedulrError::Validation(format!(
            "username must be 1-{MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(SchedulrError::Validation(format!(
            "username may only contain letters, digits, '-' and '_': {username}"
        )));
    }
    Ok(())
}
