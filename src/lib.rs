//! Claw - actor 执行契约与 PocketPaw 网关桥接
//!
//! 模块划分：
//! - **actor**: actor 运行时（五阶段状态机）与内置 actor（template / instagram-uploader / tiktok-poster）
//! - **bridge**: 网关 /status 轮询循环（固定间隔、失败不退出）
//! - **config**: bridge 配置加载（TOML + 环境变量）
//! - **core**: 错误类型
//! - **observability**: tracing 初始化（stderr）
//! - **payload**: CLAW_INPUT 解码与带默认值的字段读取
//! - **protocol**: `[CLAW:LEVEL]` 行格式、解析与日志内 JSON 展示格式

pub mod actor;
pub mod bridge;
pub mod config;
pub mod core;
pub mod observability;
pub mod payload;
pub mod protocol;

pub use actor::{Actor, ActorRunner};
pub use bridge::Bridge;
pub use payload::{decode, Payload};
pub use protocol::{ClawLog, LogLine, Severity};
