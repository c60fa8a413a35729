//! Planner configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use chrono::{DateTime, Utc};
use tourney::schedule::{Court, DEFAULT_MIN_REST_MINUTES, ScheduleOptions, SlotPlan};

/// Most courts a grid may have
pub const MAX_COURTS: usize = 64;

/// Longest match, buffer or rest period: one day
pub const MAX_MINUTES: u32 = 24 * 60;

/// Most slots per court
pub const MAX_SLOTS_PER_COURT: usize = 500;

/// Complete planner configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Court/time grid
    pub slots: SlotPlan,
    /// Scheduler settings
    pub schedule: ScheduleOptions,
}

/// Values given on the command line; each one wins over its env var
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerOverrides {
    pub courts: Option<usize>,
    pub start: Option<DateTime<Utc>>,
    pub match_minutes: Option<u32>,
    pub buffer_minutes: Option<u32>,
    pub slots_per_court: Option<usize>,
    pub min_rest_minutes: Option<u32>,
    /// `--strict`; only ever turns strict dependencies on
    pub strict_dependencies: bool,
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values from CLI args
    ///
    /// # Errors
    ///
    /// Returns error if the start time is missing or not RFC 3339
    pub fn from_env(overrides: PlannerOverrides) -> Result<Self, ConfigError> {
        let start = match overrides.start {
            Some(start) => start,
            None => {
                let raw = std::env::var("PLANNER_START").map_err(|_| ConfigError::MissingRequired {
                    var: "PLANNER_START".to_string(),
                    hint: "Pass --start or set an RFC 3339 time, e.g. 2025-06-01T09:00:00Z"
                        .to_string(),
                })?;
                parse_start(&raw)?
            }
        };

        let courts = overrides
            .courts
            .unwrap_or_else(|| parse_env_or("PLANNER_COURTS", 4));

        let slots = SlotPlan {
            courts: Court::numbered(courts),
            start,
            match_minutes: overrides
                .match_minutes
                .unwrap_or_else(|| parse_env_or("PLANNER_MATCH_MINUTES", 15)),
            buffer_minutes: overrides
                .buffer_minutes
                .unwrap_or_else(|| parse_env_or("PLANNER_BUFFER_MINUTES", 5)),
            slots_per_court: overrides
                .slots_per_court
                .unwrap_or_else(|| parse_env_or("PLANNER_SLOTS_PER_COURT", 12)),
        };

        let schedule = ScheduleOptions {
            min_rest_minutes: overrides.min_rest_minutes.unwrap_or_else(|| {
                parse_env_or("PLANNER_MIN_REST_MINUTES", DEFAULT_MIN_REST_MINUTES)
            }),
            require_placed_dependencies: overrides.strict_dependencies
                || parse_env_or("PLANNER_STRICT_DEPENDENCIES", false),
        };

        Ok(PlannerConfig { slots, schedule })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.courts.is_empty() {
            return Err(ConfigError::Invalid {
                var: "PLANNER_COURTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.slots.match_minutes == 0 {
            return Err(ConfigError::Invalid {
                var: "PLANNER_MATCH_MINUTES".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.slots.slots_per_court == 0 {
            return Err(ConfigError::Invalid {
                var: "PLANNER_SLOTS_PER_COURT".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        at_most("PLANNER_COURTS", self.slots.courts.len(), MAX_COURTS)?;
        at_most("PLANNER_MATCH_MINUTES", self.slots.match_minutes, MAX_MINUTES)?;
        at_most("PLANNER_BUFFER_MINUTES", self.slots.buffer_minutes, MAX_MINUTES)?;
        at_most(
            "PLANNER_SLOTS_PER_COURT",
            self.slots.slots_per_court,
            MAX_SLOTS_PER_COURT,
        )?;
        at_most(
            "PLANNER_MIN_REST_MINUTES",
            self.schedule.min_rest_minutes,
            MAX_MINUTES,
        )?;

        Ok(())
    }
}

fn at_most<T>(var: &str, value: T, max: T) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value > max {
        return Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: format!("Must be at most {max}, got {value}"),
        });
    }
    Ok(())
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an RFC 3339 start time
pub fn parse_start(raw: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ConfigError::Invalid {
            var: "PLANNER_START".to_string(),
            reason: format!("Not an RFC 3339 time ({e}): {raw}"),
        })
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn full_overrides() -> PlannerOverrides {
        PlannerOverrides {
            courts: Some(2),
            start: Some(nine_am()),
            match_minutes: Some(20),
            buffer_minutes: Some(10),
            slots_per_court: Some(6),
            min_rest_minutes: Some(30),
            strict_dependencies: true,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "PLANNER_START".to_string(),
            hint: "Pass --start".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PLANNER_START"));
        assert!(msg.contains("Pass --start"));
    }

    #[test]
    fn test_overrides_win() {
        let config = PlannerConfig::from_env(full_overrides()).unwrap();
        assert_eq!(config.slots.courts.len(), 2);
        assert_eq!(config.slots.start, nine_am());
        assert_eq!(config.slots.match_minutes, 20);
        assert_eq!(config.slots.buffer_minutes, 10);
        assert_eq!(config.slots.slots_per_court, 6);
        assert_eq!(config.schedule.min_rest_minutes, 30);
        assert!(config.schedule.require_placed_dependencies);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_start() {
        assert_eq!(parse_start("2025-06-01T09:00:00Z").unwrap(), nine_am());
        assert_eq!(parse_start("2025-06-01T11:00:00+02:00").unwrap(), nine_am());
        assert!(matches!(
            parse_start("tomorrow morning"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_config_validation_zero_courts() {
        let mut overrides = full_overrides();
        overrides.courts = Some(0);
        let config = PlannerConfig::from_env(overrides).unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "PLANNER_COURTS"));
    }

    #[test]
    fn test_config_validation_zero_match_length() {
        let mut overrides = full_overrides();
        overrides.match_minutes = Some(0);
        let config = PlannerConfig::from_env(overrides).unwrap();

        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { ref var, .. } if var == "PLANNER_MATCH_MINUTES")
        );
    }

    #[test]
    fn test_config_validation_zero_slots() {
        let mut overrides = full_overrides();
        overrides.slots_per_court = Some(0);
        let config = PlannerConfig::from_env(overrides).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_upper_bounds() {
        let cases = [
            ("PLANNER_COURTS", PlannerOverrides {
                courts: Some(MAX_COURTS + 1),
                ..full_overrides()
            }),
            ("PLANNER_MATCH_MINUTES", PlannerOverrides {
                match_minutes: Some(u32::MAX),
                ..full_overrides()
            }),
            ("PLANNER_BUFFER_MINUTES", PlannerOverrides {
                buffer_minutes: Some(MAX_MINUTES + 1),
                ..full_overrides()
            }),
            ("PLANNER_SLOTS_PER_COURT", PlannerOverrides {
                slots_per_court: Some(5000),
                ..full_overrides()
            }),
            ("PLANNER_MIN_REST_MINUTES", PlannerOverrides {
                min_rest_minutes: Some(u32::MAX),
                ..full_overrides()
            }),
        ];

        for (expected, overrides) in cases {
            let config = PlannerConfig::from_env(overrides).unwrap();
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { ref var, .. } if var == expected),
                "expected {expected} to be rejected, got {err}"
            );
        }
    }

    #[test]
    fn test_config_validation_accepts_limits() {
        let config = PlannerConfig::from_env(PlannerOverrides {
            courts: Some(MAX_COURTS),
            match_minutes: Some(MAX_MINUTES),
            buffer_minutes: Some(MAX_MINUTES),
            slots_per_court: Some(MAX_SLOTS_PER_COURT),
            min_rest_minutes: Some(MAX_MINUTES),
            ..full_overrides()
        })
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
