use std::path::PathBuf;

use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_PRODID, DEFAULT_STORE_PATH, DEFAULT_UID_DOMAIN, ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};
use crate::types::OccurrenceOrder;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// `PRODID` written into exported calendars.
    pub prodid: String,
    /// Domain suffix for exported `UID` values.
    pub uid_domain: String,
    pub order: OccurrenceOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `cadence.toml` and `CADENCE__*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or validating it fails.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
                .add_source(
                    config::Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("__")
                        .separator("__")
                        .ignore_empty(true)
                        .try_parsing(true),
                ),
        )
    }

    /// ## Summary
    /// Applies defaults to `builder`, then deserializes and validates the result.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .set_default("logging.level", "debug")?
            .set_default("calendar.prodid", DEFAULT_PRODID)?
            .set_default("calendar.uid_domain", DEFAULT_UID_DOMAIN)?
            .set_default("calendar.order", OccurrenceOrder::default().as_str())?
            .set_default("store.path", DEFAULT_STORE_PATH)?
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` for an empty `PRODID` or `UID` domain.
    pub fn validate(&self) -> CoreResult<()> {
        if self.calendar.prodid.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "calendar.prodid must not be empty".to_string(),
            ));
        }
        if self.calendar.uid_domain.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "calendar.uid_domain must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` file and `cadence.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(
        order = %settings.calendar.order,
        store = %settings.store.path.display(),
        "Settings loaded"
    );
    Ok(settings)
}
