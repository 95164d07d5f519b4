//! Actor 输出协议：`[CLAW:<LEVEL>] <message>` 行格式
//!
//! stdout 是与编排器之间的协议通道：每行一条日志，写完立即 flush，编排器逐行实时读取。
//! 诊断信息走 tracing（stderr），不得混入 stdout。

pub mod json;

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;

use regex::Regex;

pub use json::to_display_json;

/// 日志严重级别（大写标签即协议中的 LEVEL）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Debug,
    Warn,
    /// 仅用于失败路径（入口把错误映射为一行 ERROR + 非零退出码）
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// 按协议标签解析（大小写敏感，与编排器一致）
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "INFO" => Some(Severity::Info),
            "DEBUG" => Some(Severity::Debug),
            "WARN" => Some(Severity::Warn),
            "ERROR" => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一行结构化日志；只在写出时短暂存在
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogLine {
    pub level: Severity,
    pub message: String,
}

static CLAW_LINE_RE: OnceLock<Regex> = OnceLock::new();

impl LogLine {
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// 编排器侧的逆操作：解析 actor 输出的一行，非协议行返回 None
    pub fn parse(line: &str) -> Option<Self> {
        let re = CLAW_LINE_RE.get_or_init(|| {
            Regex::new(r"^\[CLAW:(INFO|WARN|ERROR|DEBUG)\]\s*(.*)$").unwrap()
        });
        let caps = re.captures(line.trim())?;
        let level = Severity::from_tag(caps.get(1)?.as_str())?;
        let message = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        Some(Self::new(level, message))
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[CLAW:{}] {}", self.level, self.message)
    }
}

/// Log Framer：把 (级别, 消息) 写成一行并立即 flush
///
/// 写失败（如管道已关闭）直接返回 `io::Error`，由入口终止进程，不做重试。
pub struct ClawLog<W: Write> {
    out: W,
}

impl<W: Write> ClawLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn emit(&mut self, level: Severity, message: &str) -> io::Result<()> {
        writeln!(self.out, "[CLAW:{}] {}", level, message)?;
        self.out.flush()
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.emit(Severity::Info, message)
    }

    pub fn debug(&mut self, message: &str) -> io::Result<()> {
        self.emit(Severity::Debug, message)
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        self.emit(Severity::Warn, message)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.emit(Severity::Error, message)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
