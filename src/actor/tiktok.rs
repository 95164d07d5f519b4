//! TikTok 发布 actor（模拟发布，默认 dry-run）

use std::time::Duration;

use crate::actor::{Actor, SideEffect, ASSET_PATH_KEY, UNKNOWN_ASSET, UPLOAD};
use crate::payload::Payload;

pub struct TikTokPoster;

impl Actor for TikTokPoster {
    fn name(&self) -> &'static str {
        "tiktok-poster"
    }

    fn started_message(&self) -> &'static str {
        "TikTok poster started"
    }

    fn describe(&self, payload: &Payload) -> Vec<String> {
        let mut lines = vec![format!(
            "Asset: {}",
            payload.str_or(ASSET_PATH_KEY, UNKNOWN_ASSET)
        )];
        // 只报告长度（按字符计），不回显文案
        if let Some(caption) = payload.non_empty("caption") {
            lines.push(format!("Caption length: {}", caption.chars().count()));
        }
        lines
    }

    fn latency(&self) -> Duration {
        Duration::from_millis(200)
    }

    fn side_effect(&self) -> Option<SideEffect> {
        Some(UPLOAD)
    }

    fn finished_message(&self) -> &'static str {
        "TikTok poster done"
    }
}
