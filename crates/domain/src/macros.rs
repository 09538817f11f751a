//! Macro for implementing Display and FromStr for domain enums
//!
//! Enums such as booking status, location type and day of week are persisted
//! and exchanged as short lowercase strings. The macro provides both
//! directions from a single mapping table so storage and parsing never drift
//! apart.
//!
//! # Example
//!
//! ```rust
//! use schedulr_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Sms,
//! }
//!
//! impl_domain_status_conversions!(Channel {
//!     Email => "email",
//!     Sms => "sms",
//! });
//!
//! assert_eq!(Channel::Sms.to_string(), "sms");
//! assert_eq!("EMAIL".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements Display and FromStr traits for domain enums
///
/// - Display writes the mapped string
/// - FromStr parses case-insensitively and accepts `-` for `_`
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase().replace('-', "_");
                match normalized.as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Provider {
        GoogleMeet,
        Zoom,
    }

    impl_domain_status_conversions!(Provider {
        GoogleMeet => "google_meet",
        Zoom => "zoom",
    });

    #[test]
    fn display_uses_mapped_string() {
        assert_eq!(Provider::GoogleMeet.to_string(), "google_meet");
        assert_eq!(Provider::Zoom.to_string(), "zoom");
    }

    #[test]
    fn parsing_ignores_case_and_dashes() {
        assert_eq!(Provider::from_str("GOOGLE_MEET").unwrap(), Provider::GoogleMeet);
        assert_eq!(Provider::from_str("google-meet").unwrap(), Provider::GoogleMeet);
        assert_eq!(Provider::from_str(" Zoom ").unwrap(), Provider::Zoom);
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        let err = Provider::from_str("teams").unwrap_err();
        assert!(err.contains("Invalid Provider: teams"));
        assert!(Provider::from_str("").is_err());
    }
}
