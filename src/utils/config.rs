//! 配置加载
//!
//! 加载顺序：
//! 1. `CONTACTBOOK_CONFIG` 指定的 TOML 文件，否则当前目录下的 `contactbook.toml`
//! 2. 文件不存在时使用默认配置
//! 3. 环境变量覆盖（`CONTACTBOOK_HOST` 等）

use crate::models::{AppConfig, LogLevel};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "CONTACTBOOK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "contactbook.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("读取配置文件失败: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析配置文件失败: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("配置项 {key} 的值无效: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// 配置文件路径
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// 读取配置文件（若文件不存在返回 Ok(None)）
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(config))
}

/// 加载最终生效的配置
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = config_path();
    let mut config = read_config(&path)?.unwrap_or_default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// 用环境变量覆盖配置
///
/// `lookup` 便于测试时注入变量来源。
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("CONTACTBOOK_HOST") {
        config.server.host = host;
    }

    if let Some(port) = lookup("CONTACTBOOK_PORT") {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: "CONTACTBOOK_PORT",
            value: port.clone(),
        })?;
    }

    if let Some(dir) = lookup("CONTACTBOOK_DATA_DIR") {
        config.store.data_dir = PathBuf::from(dir);
    }

    // 空字符串表示关闭静态文件服务
    if let Some(dir) = lookup("CONTACTBOOK_PUBLIC_DIR") {
        config.server.public_dir = if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        };
    }

    if let Some(level) = lookup("CONTACTBOOK_LOG_LEVEL") {
        config.log.level = LogLevel::parse(&level).ok_or(ConfigError::InvalidValue {
            key: "CONTACTBOOK_LOG_LEVEL",
            value: level.clone(),
        })?;
    }

    Ok(())
}
