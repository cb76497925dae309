/// Product identity shared across crates
pub const PRODUCT_NAME: &str = "Cadence";
pub const DEFAULT_PRODID: &str = const_str::concat!("-//", PRODUCT_NAME, "//Event Scheduler//EN");

/// Domain suffix for exported `UID` values
pub const DEFAULT_UID_DOMAIN: &str = "eventscheduler.com";

pub const DEFAULT_STORE_PATH: &str = "cadence.json";
pub const CONFIG_FILE_NAME: &str = "cadence";
pub const ENV_PREFIX: &str = "CADENCE";
