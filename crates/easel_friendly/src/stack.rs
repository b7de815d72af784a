//! Stack Traces
//!
//! 可选的调用栈解析，只用于给拼写错误消息补充源码位置。
//! 没有解析器或解析不出帧时，消息省略位置。

use crate::native::NativeError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// V8: `    at setup (http://localhost/sketch.js:5:3)` 或 `    at http://localhost/sketch.js:5:3`
static V8_FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*at\s+(?:(.+?)\s+\()?(.+?):(\d+):(\d+)\)?\s*$").expect("valid V8 frame regex")
});

/// Gecko / WebKit: `setup@http://localhost/sketch.js:5:3`
static GECKO_FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(.*?)@(.+?):(\d+):(\d+)\s*$").expect("valid Gecko frame regex")
});

/// 调用栈中的一帧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// 函数名（匿名帧为空）
    pub function: Option<String>,
    /// 文件 URL 或路径
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl StackFrame {
    /// 文件名（去掉目录和查询串）
    pub fn file_name(&self) -> &str {
        let path = self.file.split(['?', '#']).next().unwrap_or(&self.file);
        path.rsplit('/').next().unwrap_or(path)
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// 调用栈解析器
pub trait StackParser {
    /// 从错误中解析出有序的栈帧，最内层在前
    fn parse(&self, error: &NativeError) -> Vec<StackFrame>;
}

/// 支持 V8 与 Gecko/WebKit 格式的解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStackParser;

impl DefaultStackParser {
    /// 解析单行，无法识别时返回 `None`
    pub fn parse_line(line: &str) -> Option<StackFrame> {
        let caps = V8_FRAME
            .captures(line)
            .or_else(|| GECKO_FRAME.captures(line))?;

        let function = caps
            .get(1)
            .map(|m| m.as_str().trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Some(StackFrame {
            function,
            file: caps[2].to_string(),
            line: caps[3].parse().ok()?,
            column: caps[4].parse().ok()?,
        })
    }
}

impl StackParser for DefaultStackParser {
    fn parse(&self, error: &NativeError) -> Vec<StackFrame> {
        error
            .stack
            .as_deref()
            .map(|stack| stack.lines().filter_map(Self::parse_line).collect())
            .unwrap_or_default()
    }
}
