//! Server configuration types and loading.

use bugle_core::User;
use bugle_cron::{DayTime, ScheduleResult};
use bugle_error::{BugleResult, ConfigError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use typed_builder::TypedBuilder;

/// Listening address for the HTTP boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct ServerConfig {
    /// Interface the server binds to.
    #[builder(default = "0.0.0.0".to_string())]
    #[serde(default = "default_host")]
    host: String,

    /// Port the server listens on.
    #[builder(default = 8080)]
    #[serde(default = "default_port")]
    port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Chat platform credentials and delivery targets.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct ChatConfig {
    /// API token presented to the chat platform.
    token: String,

    /// Channel the rota summary and fallback deliveries go to.
    broadcast_channel: String,

    /// Override for the platform API base URL.
    #[builder(default)]
    #[serde(default)]
    base_url: Option<String>,
}

/// On-call provider credentials and schedule.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct OncallConfig {
    /// API key presented to the on-call provider.
    api_key: String,

    /// Schedule queried for duty periods.
    schedule_id: String,

    /// Override for the provider API base URL.
    #[builder(default)]
    #[serde(default)]
    base_url: Option<String>,
}

/// Issue tracker credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct TrackerConfig {
    /// Base URL of the tracker instance.
    base_url: String,

    /// API token presented to the tracker.
    token: String,
}

/// Settings for the `duty` command.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct CommandConfig {
    /// Verification token the platform sends with the command.
    token: String,

    /// How long a computed reply stays answerable from cache, in seconds.
    #[builder(default = 60)]
    #[serde(default = "default_cache_ttl_secs")]
    cache_ttl_secs: u64,
}

/// Settings for the `timelogs` command.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct TimelogConfig {
    /// Verification token the platform sends with the command.
    token: String,

    /// How long a computed reply stays answerable from cache, in seconds.
    #[builder(default = 60)]
    #[serde(default = "default_cache_ttl_secs")]
    cache_ttl_secs: u64,

    /// Logged minutes per day under which a member gets flagged.
    #[builder(default = 360)]
    #[serde(default = "default_minimum_minutes")]
    minimum_minutes: u64,
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_minimum_minutes() -> u64 {
    360
}

/// Per-command settings.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct CommandsConfig {
    /// Settings for the `duty` command.
    duty: CommandConfig,

    /// Settings for the `timelogs` command.
    timelogs: TimelogConfig,
}

/// Top-level configuration loaded from `bugle.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct Config {
    /// Local time of day the duty call goes out, as `"HH:MM"`.
    daily_call_time: String,

    /// Listening address for the HTTP boundary.
    #[builder(default)]
    #[serde(default)]
    server: ServerConfig,

    /// Chat platform credentials and delivery targets.
    chat: ChatConfig,

    /// On-call provider credentials and schedule.
    oncall: OncallConfig,

    /// Issue tracker credentials.
    tracker: TrackerConfig,

    /// Per-command settings.
    commands: CommandsConfig,

    /// Roster translating provider names into platform logins.
    #[builder(default)]
    #[serde(default)]
    team: Vec<User>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, the TOML fails to
    /// parse, or `daily_call_time` is not a valid `"HH:MM"` time.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> BugleResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from file");

        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::new(format!("Failed to parse config file: {}", e)))?;

        config
            .call_time()
            .map_err(|e| ConfigError::new(format!("Invalid daily_call_time: {}", e)))?;

        if config.team.is_empty() {
            tracing::warn!("Team roster is empty, reminders and timelogs have nobody to cover");
        }

        tracing::info!(
            host = %config.server.host,
            port = config.server.port,
            members = config.team.len(),
            daily_call_time = %config.daily_call_time,
            "Loaded configuration"
        );

        Ok(config)
    }

    /// The time of day the duty call fires, parsed from `daily_call_time`.
    ///
    /// # Errors
    ///
    /// Fails when the configured value is not a valid `"HH:MM"` time.
    pub fn call_time(&self) -> ScheduleResult<DayTime> {
        self.daily_call_time.parse()
    }
}
