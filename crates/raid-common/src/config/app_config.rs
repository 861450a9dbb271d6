//! Application configuration structs
//!
//! Loads configuration from built-in defaults, an optional config file and
//! `RAID__`-prefixed environment variables.

use serde::Deserialize;

/// Config file looked up relative to the working directory (any format
/// the `config` crate understands)
pub const CONFIG_FILE: &str = "config/raid-planner";

/// Prefix for environment overrides, e.g. `RAID__ROSTER__GROUP_SIZE=4`
pub const ENV_PREFIX: &str = "RAID";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub roster: RosterConfig,
    pub calendar: CalendarConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Roster sizing and listing rules
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Slots created for a raid that names no template
    #[serde(default = "default_slot_count")]
    pub default_slot_count: usize,
    /// Upper bound accepted for `number_of_slots`
    #[serde(default = "default_max_slot_count")]
    pub max_slot_count: usize,
    /// Party size used when splitting the roster into groups
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    /// How long after its start a raid is still listed as upcoming
    #[serde(default = "default_listing_grace_hours")]
    pub listing_grace_hours: i64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            default_slot_count: default_slot_count(),
            max_slot_count: default_max_slot_count(),
            group_size: default_group_size(),
            listing_grace_hours: default_listing_grace_hours(),
        }
    }
}

/// Calendar export settings
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
    /// Hour of day (UTC) a new raid is proposed at
    #[serde(default = "default_raid_hour")]
    pub default_raid_hour: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            uid_domain: default_uid_domain(),
            default_raid_hour: default_raid_hour(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "raid-planner".to_string()
}

fn default_slot_count() -> usize {
    10
}

fn default_max_slot_count() -> usize {
    100
}

fn default_group_size() -> usize {
    5
}

fn default_listing_grace_hours() -> i64 {
    5
}

fn default_uid_domain() -> String {
    "raids.example.org".to_string()
}

fn default_raid_hour() -> u32 {
    18
}

impl AppConfig {
    /// Load configuration from the config file and environment
    ///
    /// A `.env` file is read first if present. Missing sources are fine;
    /// every setting has a default.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or a value is out of range
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    ///
    /// # Errors
    /// Returns the first setting that is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roster = &self.roster;
        if roster.group_size == 0 {
            return Err(ConfigError::InvalidValue(
                "roster.group_size",
                "must be at least 1".to_string(),
            ));
        }
        if roster.max_slot_count == 0 {
            return Err(ConfigError::InvalidValue(
                "roster.max_slot_count",
                "must be at least 1".to_string(),
            ));
        }
        if roster.default_slot_count > roster.max_slot_count {
            return Err(ConfigError::InvalidValue(
                "roster.default_slot_count",
                format!("exceeds max_slot_count ({})", roster.max_slot_count),
            ));
        }
        if roster.listing_grace_hours < 0 {
            return Err(ConfigError::InvalidValue(
                "roster.listing_grace_hours",
                "must not be negative".to_string(),
            ));
        }
        if self.calendar.default_raid_hour > 23 {
            return Err(ConfigError::InvalidValue(
                "calendar.default_raid_hour",
                format!("{} is not an hour of the day", self.calendar.default_raid_hour),
            ));
        }
        if self.calendar.uid_domain.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "calendar.uid_domain",
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
