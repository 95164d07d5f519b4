//! PocketPaw 网关桥接：固定间隔轮询 /status 并以 `[POCKETPAW]` 行转发
//!
//! 单轮（[`Bridge::tick`]）只负责拉取与报告；[`Bridge::run`] 负责无限循环与固定间隔休眠。
//! 拉取失败只记录不传播，循环永不因失败退出；只有 stdout 写失败才会返回。
//! panic 不在捕获范围内。

pub mod status;

use std::convert::Infallible;
use std::io::{self, Write};
use std::time::Duration;

use crate::config::BridgeConfig;
use crate::core::FetchError;

pub use status::{StatusClient, StatusSnapshot, StatusSource};

/// bridge 输出行前缀
pub const BRIDGE_PREFIX: &str = "[POCKETPAW]";

/// 单轮结果
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Reported(StatusSnapshot),
    Failed(String),
}

impl TickOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TickOutcome::Failed(_))
    }
}

pub struct Bridge<S> {
    source: S,
    interval: Duration,
}

impl Bridge<StatusClient> {
    pub fn from_config(config: &BridgeConfig) -> Result<Self, FetchError> {
        Ok(Self::new(StatusClient::new(config)?, config.poll_interval()))
    }
}

impl<S: StatusSource> Bridge<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// 执行一轮：拉取状态并写一行结果
    pub async fn tick<W: Write>(&self, out: &mut W) -> io::Result<TickOutcome> {
        match self.source.fetch().await {
            Ok(snapshot) => {
                tracing::debug!(source = %self.source.describe(), "status fetched");
                emit(out, &format!("status {}", snapshot))?;
                Ok(TickOutcome::Reported(snapshot))
            }
            Err(err) => {
                let description = err.to_string();
                emit(out, &format!("bridge error {}", description))?;
                Ok(TickOutcome::Failed(description))
            }
        }
    }

    /// 无限轮询；正常情况下永不返回
    pub async fn run<W: Write>(&self, out: &mut W) -> io::Result<Infallible> {
        emit(out, "bridge started")?;
        let mut consecutive_failures: u64 = 0;
        loop {
            match self.tick(out).await? {
                TickOutcome::Reported(_) => consecutive_failures = 0,
                TickOutcome::Failed(error) => {
                    consecutive_failures += 1;
                    tracing::warn!(
                        source = %self.source.describe(),
                        consecutive_failures,
                        %error,
                        "status poll failed"
                    );
                }
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// 写一行 `[POCKETPAW] <message>` 并立即 flush
pub fn emit<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", BRIDGE_PREFIX, message)?;
    out.flush()
}
