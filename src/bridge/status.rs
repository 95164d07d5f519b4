//! Status Fetcher：单次 `GET {gateway}/status`，带超时，不重试
//!
//! 重试策略属于调用方（见 [`crate::bridge::Bridge`]）。

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::core::FetchError;
use crate::protocol::to_display_json;

/// 网关 /status 的响应体；对 bridge 不透明，只要求是合法 JSON
#[derive(Clone, Debug, PartialEq)]
pub struct StatusSnapshot(Value);

impl StatusSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_display_json(&self.0))
    }
}

/// 状态来源（生产为 HTTP，测试可替换）
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError>;

    /// 用于日志描述
    fn describe(&self) -> String;
}

/// 基于 reqwest 的 /status 客户端
pub struct StatusClient {
    client: Client,
    status_url: String,
    timeout_secs: u64,
}

impl StatusClient {
    pub fn new(config: &BridgeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Request(format!("Build client: {}", e)))?;
        Ok(Self {
            client,
            status_url: config.status_url(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self) -> Result<StatusSnapshot, FetchError> {
        let resp = self
            .client
            .get(&self.status_url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_secs))?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_secs))?;
        let value: Value =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(StatusSnapshot::new(value))
    }

    fn describe(&self) -> String {
        self.status_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_display() {
        let snap = StatusSnapshot::new(json!({"ok": true, "queue": 2}));
        assert_eq!(snap.to_string(), r#"{"ok": true, "queue": 2}"#);
    }

    #[test]
    fn test_client_targets_status_path() {
        let client = StatusClient::new(&BridgeConfig::new("http://127.0.0.1:3717/")).unwrap();
        assert_eq!(client.status_url(), "http://127.0.0.1:3717/status");
        assert_eq!(client.describe(), "http://127.0.0.1:3717/status");
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_fetch_error() {
        // 端口 1 通常无人监听：连接被拒绝
        let client = StatusClient::new(&BridgeConfig::new("http://127.0.0.1:1")).unwrap();
        let err = client.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Connect(_) | FetchError::Request(_) | FetchError::Timeout(_)
        ));
    }
}
