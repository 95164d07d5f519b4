//! Instagram 上传 actor（模拟上传，默认 dry-run）

use std::time::Duration;

use crate::actor::{Actor, SideEffect, ASSET_PATH_KEY, UNKNOWN_ASSET, UPLOAD};
use crate::payload::Payload;

pub struct InstagramUploader;

impl Actor for InstagramUploader {
    fn name(&self) -> &'static str {
        "instagram-uploader"
    }

    fn started_message(&self) -> &'static str {
        "Instagram uploader started"
    }

    fn describe(&self, payload: &Payload) -> Vec<String> {
        let mut lines = vec![format!(
            "Asset: {}",
            payload.str_or(ASSET_PATH_KEY, UNKNOWN_ASSET)
        )];
        if let Some(hashtags) = payload.non_empty("hashtags") {
            lines.push(format!("Hashtags: {hashtags}"));
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
        "Instagram uploader done"
    }
}
