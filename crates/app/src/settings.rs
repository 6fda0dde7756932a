use config::{Config, Environment, File, Map};
use dipscan_core::config::AppConfig;
use std::path::Path;
use thiserror::Error;

/// 未指定 `--config` 时尝试读取的配置文件 (扩展名由 config 自动探测)
pub const DEFAULT_CONFIG_FILE: &str = "dipscan";

/// 环境变量前缀，例如 `DIPSCAN__SCREEN__CAPITAL=250000`
pub const ENV_PREFIX: &str = "DIPSCAN";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// # Summary
/// 从默认值、配置文件和环境变量加载配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层来源。
/// 2. 指定路径时该文件必须存在；否则尝试可选的 `dipscan.*`。
/// 3. `DIPSCAN__` 前缀的环境变量覆盖前两者。
pub fn load(path: Option<&Path>) -> Result<AppConfig, SettingsError> {
    load_with_env(path, None)
}

/// 与 `load` 相同，但可以注入环境变量表，`None` 表示读取进程环境
pub fn load_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<AppConfig, SettingsError> {
    let defaults = Config::try_from(&AppConfig::default())?;

    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config = Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
