//! Payload 解码：CLAW_INPUT 环境变量 → JSON 对象
//!
//! 没有必填字段，所有读取都带默认值；未知字段忽略。解码后不可变。

use std::env::VarError;

use serde_json::{Map, Value};

use crate::core::ClawError;
use crate::protocol::to_display_json;

/// 编排器传入 payload 的环境变量名
pub const INPUT_ENV: &str = "CLAW_INPUT";

/// 一次 actor 调用的输入（字符串键 → JSON 值）
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

/// 解码原始字符串；空串（或纯空白）视为 `{}`
pub fn decode(raw: &str) -> Result<Payload, ClawError> {
    if raw.trim().is_empty() {
        return Ok(Payload::default());
    }
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ClawError::MalformedPayload(e.to_string()))?;
    match value {
        Value::Object(fields) => Ok(Payload { fields }),
        other => Err(ClawError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON 值的真值判定：null、false、0、空串、空数组、空对象为假
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// 值的文本形式：字符串原样，其它类型用展示 JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_display_json(other),
    }
}

impl Payload {
    /// 读取 CLAW_INPUT 并解码（变量缺失按 `{}` 处理）
    pub fn from_env() -> Result<Self, ClawError> {
        Self::from_var(std::env::var(INPUT_ENV))
    }

    /// 只有「未设置」视为 `{}`；已设置但不是 UTF-8 属于格式错误
    pub fn from_var(var: Result<String, VarError>) -> Result<Self, ClawError> {
        match var {
            Ok(raw) => decode(&raw),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ClawError::MalformedPayload(format!(
                "{} is not valid UTF-8",
                INPUT_ENV
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// 字段文本；缺失时返回 default
    pub fn str_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map(display_value)
            .unwrap_or_else(|| default.to_string())
    }

    /// 字段存在且为真时返回其文本，否则 None（用于「空则不输出」的可选字段）
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| is_truthy(v)).map(display_value)
    }

    /// 布尔开关；缺失时取 default，存在时按真值判定
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        self.get(key).map(is_truthy).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
