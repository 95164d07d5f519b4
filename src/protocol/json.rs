//! 日志中嵌入 JSON 的展示格式
//!
//! 与编排器历史输出保持一致：分隔符为 `", "` 与 `": "`，非 ASCII 字符转义为 `\uXXXX`
//! （BMP 以外用代理对），DEL（0x7f）同样转义为 `\u007f`，键顺序保持输入顺序。
//! 例如 `{"ok":true}` 输出为 `{"ok": true}`。
//!
//! 已知差异：浮点数按 serde_json 的最短表示输出，指数不补零（`1e-7`，而非 `1e-07`）。

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;

#[derive(Debug, Default)]
struct DisplayFormatter;

impl Formatter for DisplayFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            if start < i {
                writer.write_all(&bytes[start..i])?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}

/// 将 JSON 值渲染为单行展示文本（纯 ASCII）
pub fn to_display_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, DisplayFormatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}
