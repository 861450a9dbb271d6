//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CalendarConfig, ConfigError, Environment, RosterConfig,
    SnowflakeConfig, CONFIG_FILE, ENV_PREFIX,
};
