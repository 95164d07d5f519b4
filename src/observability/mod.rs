//! 可观测性：tracing 输出到 stderr
//!
//! stdout 留给 `[CLAW:*]` / `[POCKETPAW]` 协议行，诊断日志一律写 stderr。
//! 默认级别由调用方给出，可通过 RUST_LOG 覆盖。

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// actor 默认只输出 warn 以上（编排器把 stderr 视为错误日志）
pub const ACTOR_DEFAULT_DIRECTIVE: &str = "claw=warn";

pub const BRIDGE_DEFAULT_DIRECTIVE: &str = "claw=info";

pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    // 重复初始化（如测试中）时忽略
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
