//! Instagram 上传 actor（默认 dry-run）
//!
//! 输入: CLAW_INPUT（JSON 对象，缺失视为 {}）；输出: stdout 上的 [CLAW:LEVEL] 行；成功退出码 0。

use std::process::ExitCode;

use claw::actor::{run_main, InstagramUploader};
use claw::observability::{self, ACTOR_DEFAULT_DIRECTIVE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    observability::init(ACTOR_DEFAULT_DIRECTIVE);
    run_main(&InstagramUploader).await
}
