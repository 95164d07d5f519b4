//! Bridge 配置：内置默认值 → config/bridge.toml → 环境变量
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `CLAW__*` 覆盖（双下划线表示嵌套，如
//! `CLAW__BRIDGE__POLL_INTERVAL_SECS=30`），最后 `MMO_CLAW_GATEWAY_URL` 覆盖网关地址。
//! 进程启动时解析一次，运行期间不变。

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// 网关地址环境变量（编排器启动 sidecar 时注入）
pub const GATEWAY_URL_ENV: &str = "MMO_CLAW_GATEWAY_URL";

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3717";

/// 配置根（对应 config/bridge.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
}

/// [bridge] 段：网关地址、轮询间隔、请求超时
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// 两次轮询之间的固定间隔（秒），失败时不退避
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// 单次 /status 请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_poll_interval_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BridgeConfig {
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            ..Self::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 间隔与超时必须大于 0（0 间隔会空转轮询，0 超时会让每次请求失败）
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(config::ConfigError::Message(
                "bridge.poll_interval_secs must be greater than 0".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "bridge.request_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// `{gateway_url}/status`，容忍末尾斜杠
    pub fn status_url(&self) -> String {
        format!("{}/status", self.gateway_url.trim_end_matches('/'))
    }
}

/// 从 config 目录加载配置，环境变量可覆盖
///
/// 1. 按顺序查找 config/bridge.toml、../config/bridge.toml、bridge.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 叠加环境变量 CLAW__*（双下划线表示嵌套键）
/// 4. MMO_CLAW_GATEWAY_URL 最后覆盖 bridge.gateway_url
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let gateway_url = std::env::var(GATEWAY_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());
    load_config_with(config_path, gateway_url)
}

/// 与 [`load_config`] 相同，但网关地址覆盖由调用方给出（不读 MMO_CLAW_GATEWAY_URL）
pub fn load_config_with(
    config_path: Option<PathBuf>,
    gateway_url: Option<String>,
) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/bridge", "../config/bridge", "bridge"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("CLAW")
            .separator("__")
            .try_parsing(true),
    );

    builder = builder.set_override_option("bridge.gateway_url", gateway_url)?;

    let c = builder.build()?;
    let cfg: AppConfig = c.try_deserialize()?;
    cfg.bridge.validate()?;
    Ok(cfg)
}
