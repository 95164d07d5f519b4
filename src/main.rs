//! Claw Bridge - PocketPaw 网关 sidecar
//!
//! 每隔固定间隔请求 `GET {gateway}/status`，把结果以 `[POCKETPAW]` 行写到 stdout；
//! 失败只记录，进程一直运行直到被外部终止。
//!
//! 环境变量:
//! - MMO_CLAW_GATEWAY_URL: 网关地址 (默认 http://127.0.0.1:3717)
//! - CLAW__BRIDGE__POLL_INTERVAL_SECS / CLAW__BRIDGE__REQUEST_TIMEOUT_SECS: 覆盖间隔与超时
//! - RUST_LOG: 诊断日志级别（stderr）

use anyhow::Context;
use claw::bridge::Bridge;
use claw::config::load_config;
use claw::observability::{self, BRIDGE_DEFAULT_DIRECTIVE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    observability::init(BRIDGE_DEFAULT_DIRECTIVE);

    let cfg = load_config(None).context("Failed to load bridge config")?;
    let bridge = Bridge::from_config(&cfg.bridge).context("Failed to create status client")?;

    tracing::info!(
        gateway = %cfg.bridge.gateway_url,
        interval_secs = cfg.bridge.poll_interval_secs,
        "PocketPaw bridge polling"
    );

    let mut stdout = std::io::stdout();
    let never = bridge
        .run(&mut stdout)
        .await
        .context("Bridge output closed")?;
    match never {}
}
