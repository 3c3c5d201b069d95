pub mod config;

pub use config::{apply_env_overrides, config_path, load_config, read_config, ConfigError};
