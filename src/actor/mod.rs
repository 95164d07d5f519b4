//! Actor 运行时：固定五阶段状态机
//!
//! 每个 actor 只描述自己的文案与参数（启动/结束语、输入摘要、模拟耗时、副作用），
//! 步骤顺序由 [`ActorRunner`] 统一执行：
//! Started → LoggedInput → Working → BranchReported → Done，线性推进，无重试、无取消。
//!
//! Runner 只接收显式的 [`Payload`] 与输出流；读取环境变量只发生在 [`run_main`]。

pub mod instagram;
pub mod template;
pub mod tiktok;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use tracing::Instrument;

use crate::core::ClawError;
use crate::payload::{decode, Payload};
use crate::protocol::ClawLog;

pub use instagram::InstagramUploader;
pub use template::TemplateActor;
pub use tiktok::TikTokPoster;

/// dry-run 开关字段名；缺失时默认开启（不显式关闭就不执行真实动作）
pub const DRY_RUN_KEY: &str = "dryRun";

/// 资产路径字段名与缺省值
pub const ASSET_PATH_KEY: &str = "assetPath";
pub const UNKNOWN_ASSET: &str = "unknown-asset";

/// 副作用分支的两种报告文案
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideEffect {
    /// dry-run 时输出（WARN）
    pub skipped: &'static str,
    /// 实际执行（模拟）时输出（INFO）
    pub performed: &'static str,
}

/// 上传类 actor 共用的副作用文案
pub const UPLOAD: SideEffect = SideEffect {
    skipped: "Dry-run enabled, upload skipped",
    performed: "Upload simulated",
};

/// Actor 描述：只提供文案与参数，不控制步骤顺序
pub trait Actor: Send + Sync {
    /// 注册名（与 actors/ 目录名一致）
    fn name(&self) -> &'static str;

    fn started_message(&self) -> &'static str;

    /// 输入摘要（DEBUG 行）；可选字段为空时不产生对应行
    fn describe(&self, payload: &Payload) -> Vec<String>;

    /// 模拟 I/O 的固定耗时
    fn latency(&self) -> Duration;

    /// 有副作用的 actor 返回 Some，按 dryRun 分支报告
    fn side_effect(&self) -> Option<SideEffect> {
        None
    }

    fn finished_message(&self) -> &'static str;
}

/// 执行阶段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Started,
    LoggedInput,
    Working,
    BranchReported,
    Done,
}

/// 按固定顺序驱动 actor
#[derive(Debug, Clone)]
pub struct ActorRunner {
    simulate_latency: bool,
}

impl Default for ActorRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorRunner {
    pub fn new() -> Self {
        Self {
            simulate_latency: true,
        }
    }

    /// 跳过模拟耗时（测试用；输出内容不变）
    pub fn without_latency(mut self) -> Self {
        self.simulate_latency = false;
        self
    }

    /// 执行一次调用；返回时处于 Done 阶段
    pub async fn run<W: Write>(
        &self,
        actor: &dyn Actor,
        payload: &Payload,
        log: &mut ClawLog<W>,
    ) -> Result<Phase, ClawError> {
        log.info(actor.started_message())?;
        trace_phase(actor, Phase::Started);

        for line in actor.describe(payload) {
            log.debug(&line)?;
        }
        trace_phase(actor, Phase::LoggedInput);

        trace_phase(actor, Phase::Working);
        if self.simulate_latency {
            tokio::time::sleep(actor.latency()).await;
        }

        if let Some(effect) = actor.side_effect() {
            if payload.flag_or(DRY_RUN_KEY, true) {
                log.warn(effect.skipped)?;
            } else {
                log.info(effect.performed)?;
            }
        }
        trace_phase(actor, Phase::BranchReported);

        log.info(actor.finished_message())?;
        trace_phase(actor, Phase::Done);
        Ok(Phase::Done)
    }
}

fn trace_phase(actor: &dyn Actor, phase: Phase) {
    tracing::debug!(actor = actor.name(), ?phase, "actor phase");
}

/// 解码 + 执行 + 失败映射，返回进程退出码
///
/// `raw_input` 为 None 表示环境变量缺失（按 `{}` 处理）。任何错误都尽力输出一行
/// `[CLAW:ERROR]` 后返回非零码。
pub async fn invoke<W: Write>(
    runner: &ActorRunner,
    actor: &dyn Actor,
    raw_input: Option<&str>,
    out: W,
) -> u8 {
    invoke_with(runner, actor, decode(raw_input.unwrap_or("{}")), out).await
}

/// 与 [`invoke`] 相同，但输入已由调用方解码（解码错误同样映射为 ERROR 行）
pub async fn invoke_with<W: Write>(
    runner: &ActorRunner,
    actor: &dyn Actor,
    input: Result<Payload, ClawError>,
    out: W,
) -> u8 {
    let mut log = ClawLog::new(out);
    let result = match input {
        Ok(payload) => runner.run(actor, &payload, &mut log).await.map(|_| ()),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(actor = actor.name(), error = %err, "actor failed");
            // stdout 本身可能已不可写，ERROR 行尽力而为
            let _ = log.error(&err.to_string());
            err.exit_code()
        }
    }
}

/// 编排器注入的调用上下文（只进入 tracing span，不影响 stdout）
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    pub task_id: Option<String>,
    pub workspace_id: Option<String>,
}

impl InvocationContext {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            task_id: non_empty("CLAW_TASK_ID"),
            workspace_id: non_empty("CLAW_WORKSPACE_ID"),
        }
    }
}

/// actor 二进制的入口：读取 CLAW_INPUT、执行、写 stdout
pub async fn run_main(actor: &dyn Actor) -> ExitCode {
    let ctx = InvocationContext::from_env();
    let span = tracing::info_span!(
        "actor",
        actor = actor.name(),
        task_id = ctx.task_id.as_deref().unwrap_or("-"),
        workspace_id = ctx.workspace_id.as_deref().unwrap_or("-"),
    );
    let code = invoke_with(&ActorRunner::new(), actor, Payload::from_env(), io::stdout())
        .instrument(span)
        .await;
    ExitCode::from(code)
}

static TEMPLATE: TemplateActor = TemplateActor;
static INSTAGRAM_UPLOADER: InstagramUploader = InstagramUploader;
static TIKTOK_POSTER: TikTokPoster = TikTokPoster;

/// 按注册名查找内置 actor
pub fn by_name(name: &str) -> Option<&'static dyn Actor> {
    match name {
        "template" | "_template" => Some(&TEMPLATE),
        "instagram-uploader" => Some(&INSTAGRAM_UPLOADER),
        "tiktok-poster" => Some(&TIKTOK_POSTER),
        _ => None,
    }
}

/// 全部内置 actor
pub fn builtin() -> [&'static dyn Actor; 3] {
    [&TEMPLATE, &INSTAGRAM_UPLOADER, &TIKTOK_POSTER]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Actor for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn started_message(&self) -> &'static str {
            "probe started"
        }

        fn describe(&self, payload: &Payload) -> Vec<String> {
            vec![format!("keys: {}", payload.len())]
        }

        fn latency(&self) -> Duration {
            Duration::from_millis(10)
        }

        fn side_effect(&self) -> Option<SideEffect> {
            Some(UPLOAD)
        }

        fn finished_message(&self) -> &'static str {
            "probe done"
        }
    }

    async fn run_probe(raw: Option<&str>) -> (u8, String) {
        let mut out = Vec::new();
        let code = invoke(&ActorRunner::new().without_latency(), &Probe, raw, &mut out).await;
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_sequence_order_dry_run_default() {
        let (code, out) = run_probe(Some("{}")).await;
        assert_eq!(code, 0);
        assert_eq!(
            out,
            "[CLAW:INFO] probe started\n\
             [CLAW:DEBUG] keys: 0\n\
             [CLAW:WARN] Dry-run enabled, upload skipped\n\
             [CLAW:INFO] probe done\n"
        );
    }

    #[tokio::test]
    async fn test_dry_run_false_performs() {
        let (code, out) = run_probe(Some(r#"{"dryRun":false}"#)).await;
        assert_eq!(code, 0);
        assert!(out.contains("[CLAW:INFO] Upload simulated\n"));
        assert!(!out.contains("WARN"));
    }

    #[tokio::test]
    async fn test_absent_input_is_empty_object() {
        let (code, out) = run_probe(None).await;
        assert_eq!(code, 0);
        assert!(out.contains("[CLAW:DEBUG] keys: 0\n"));
    }

    #[tokio::test]
    async fn test_malformed_payload_maps_to_error_line() {
        let (code, out) = run_probe(Some("[1, 2]")).await;
        assert_eq!(code, 1);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("[CLAW:ERROR] Malformed payload:"));
    }

    #[tokio::test]
    async fn test_decode_error_from_caller_maps_to_exit_code() {
        let mut out = Vec::new();
        let input = Err(ClawError::MalformedPayload("CLAW_INPUT is not valid UTF-8".into()));
        let code = invoke_with(&ActorRunner::new().without_latency(), &Probe, input, &mut out).await;
        assert_eq!(code, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[CLAW:ERROR] Malformed payload: CLAW_INPUT is not valid UTF-8\n"
        );
    }

    #[tokio::test]
    async fn test_latency_is_observed() {
        let mut log = ClawLog::new(Vec::new());
        let payload = Payload::default();
        let started = std::time::Instant::now();
        let phase = ActorRunner::new().run(&Probe, &payload, &mut log).await.unwrap();
        assert_eq!(phase, Phase::Done);
        assert!(started.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("template").map(|a| a.name()), Some("template"));
        assert_eq!(by_name("_template").map(|a| a.name()), Some("template"));
        assert_eq!(
            by_name("instagram-uploader").map(|a| a.name()),
            Some("instagram-uploader")
        );
        assert_eq!(by_name("tiktok-poster").map(|a| a.name()), Some("tiktok-poster"));
        assert!(by_name("youtube").is_none());
        assert_eq!(builtin().len(), 3);
    }
}
