use std::{env, time::Duration};

use salonbook_core::schedule::AvailabilityRules;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "salonbook.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Distance between two offered start times (default: 15)
    pub slot_step_minutes: u32,
    /// Minimum delay between now and a slot offered for today (default: 30)
    pub booking_lead_minutes: u32,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "salonbook.db")
    /// - `SLOT_STEP_MINUTES` - Slot grid step (default: 15)
    /// - `BOOKING_LEAD_MINUTES` - Lead time for same-day bookings (default: 30)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "salonbook.db".to_string()),
            slot_step_minutes: env::var("SLOT_STEP_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(15),
            booking_lead_minutes: env::var("BOOKING_LEAD_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Slot scan tunables.
    pub fn availability_rules(&self) -> AvailabilityRules {
        AvailabilityRules {
            step_minutes: self.slot_step_minutes,
            lead_minutes: self.booking_lead_minutes,
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_values() {
        let config = Config {
            sqlite_path: "test.db".to_string(),
            slot_step_minutes: 30,
            booking_lead_minutes: 60,
            request_timeout_seconds: 5,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.availability_rules(),
            AvailabilityRules {
                step_minutes: 30,
                lead_minutes: 60,
            }
        );
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("SQLITE_PATH");
        env::remove_var("SLOT_STEP_MINUTES");
        env::remove_var("BOOKING_LEAD_MINUTES");
        env::remove_var("REQUEST_TIMEOUT_SECONDS");

        let config = Config::from_env();

        assert_eq!(config.sqlite_path, "salonbook.db");
        assert_eq!(config.slot_step_minutes, 15);
        assert_eq!(config.booking_lead_minutes, 30);
        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.availability_rules(), AvailabilityRules::default());
    }
}
