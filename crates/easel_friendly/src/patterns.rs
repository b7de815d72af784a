//! Error Pattern Table
//!
//! 已知的原生错误消息模板，按错误类别分组。不同浏览器引擎对同一错误的措辞
//! 不同，所以同一类别下会有多条模板。
//!
//! 模板占位符：
//! - `{{}}`  主占位符，编译为捕获组，匹配出错的标识符
//! - `{{.}}` 次占位符，编译为非捕获通配

use crate::error::{read_file, FriendlyError, FriendlyResult};
use crate::native::ErrorClass;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 内置模式表
const BUILTIN_PATTERNS: &str = include_str!("../data/error_patterns.json");

/// 主占位符
pub const PRIMARY_PLACEHOLDER: &str = "{{}}";
/// 次占位符
pub const SECONDARY_PLACEHOLDER: &str = "{{.}}";

/// 主占位符匹配的"裸"标识符
const IDENTIFIER_PATTERN: &str = "([A-Za-z0-9_$]+)";
const WILDCARD_PATTERN: &str = "(?:.+?)";

/// 一条错误模板
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPatternEntry {
    /// 含占位符的消息模板
    pub template: String,
    /// 细分类型，例如 `NOTDEFINED`
    pub kind: String,
    /// 产生该措辞的浏览器，`all` 表示通用
    #[serde(default = "all_browsers")]
    pub browser: String,
}

fn all_browsers() -> String {
    "all".to_string()
}

impl ErrorPatternEntry {
    pub fn new(template: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            kind: kind.into(),
            browser: all_browsers(),
        }
    }

    /// 模板是否含有主占位符（即能提取标识符）
    pub fn captures_identifier(&self) -> bool {
        self.template.contains(PRIMARY_PLACEHOLDER)
    }

    /// 模板对应的正则源码
    pub fn regex_source(&self) -> String {
        let mut source = String::new();
        let mut rest = self.template.as_str();

        loop {
            let primary = rest.find(PRIMARY_PLACEHOLDER);
            let secondary = rest.find(SECONDARY_PLACEHOLDER);
            let (at, placeholder, replacement) = match (primary, secondary) {
                (Some(p), Some(s)) if s < p => (s, SECONDARY_PLACEHOLDER, WILDCARD_PATTERN),
                (Some(p), _) => (p, PRIMARY_PLACEHOLDER, IDENTIFIER_PATTERN),
                (None, Some(s)) => (s, SECONDARY_PLACEHOLDER, WILDCARD_PATTERN),
                (None, None) => break,
            };
            source.push_str(&regex::escape(&rest[..at]));
            source.push_str(replacement);
            rest = &rest[at + placeholder.len()..];
        }

        source.push_str(&regex::escape(rest));
        source
    }

    /// 编译为正则（不锚定，允许消息带前缀如 `Uncaught ReferenceError: `）
    pub fn compile(&self) -> FriendlyResult<Regex> {
        Regex::new(&self.regex_source()).map_err(|source| FriendlyError::InvalidTemplate {
            template: self.template.clone(),
            source,
        })
    }
}

/// 错误模式表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPatternTable {
    groups: BTreeMap<String, Vec<ErrorPatternEntry>>,
}

impl ErrorPatternTable {
    /// 空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置表
    pub fn builtin() -> FriendlyResult<Self> {
        Self::from_json(BUILTIN_PATTERNS)
    }

    /// 从 JSON 文本解析
    pub fn from_json(json: &str) -> FriendlyResult<Self> {
        serde_json::from_str(json).map_err(|e| FriendlyError::json("error pattern table", e))
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> FriendlyResult<Self> {
        Self::from_json(&read_file(path.as_ref())?)
    }

    /// 添加一条模板
    pub fn with_entry(mut self, class: ErrorClass, entry: ErrorPatternEntry) -> Self {
        self.groups
            .entry(class.name().to_string())
            .or_default()
            .push(entry);
        self
    }

    /// 某个类别下的所有模板（按表中顺序）
    pub fn entries(&self, class: &ErrorClass) -> &[ErrorPatternEntry] {
        self.groups
            .get(class.name())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 表中出现的所有类别
    pub fn classes(&self) -> impl Iterator<Item = ErrorClass> + '_ {
        self.groups.keys().map(|name| ErrorClass::from_name(name))
    }

    /// 模板总数
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
