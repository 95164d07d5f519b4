//! 错误类型：actor 侧（致命）与 bridge 侧（逐轮吞掉）
//!
//! ClawError 终止 actor 进程（入口输出一行 ERROR 后以非零码退出）；
//! FetchError 只在 bridge 循环内记录，不会向外传播。

use thiserror::Error;

/// Actor 调用过程中的致命错误
#[derive(Error, Debug)]
pub enum ClawError {
    /// CLAW_INPUT 不是合法 JSON，或顶层不是对象
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// stdout 写失败（如管道关闭）
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClawError {
    /// 进程退出码：所有失败统一为 1
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// 单次 /status 拉取失败（网络、超时、状态码、响应体解析）
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Invalid status body: {0}")]
    Decode(String),
}

impl FetchError {
    /// 由 reqwest 错误归类；timeout_secs 仅用于错误描述
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout_secs)
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}
