//! Postdeck configuration
//!
//! Settings come from built-in defaults, an optional TOML file and
//! `POSTDECK_*` environment variables, later sources overriding earlier ones.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::{ConfigSource, PostdeckConfig};
