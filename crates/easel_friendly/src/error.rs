//! Friendly Error Types
//!
//! 本子系统只在"加载配置"时会失败：清单、模式表或设置文件无法读取/解析，
//! 或者模式模板无法编译。所有面向宿主的入口点都不会返回错误。

use std::path::PathBuf;
use thiserror::Error;

/// 加载与构建阶段的错误
#[derive(Debug, Error)]
pub enum FriendlyError {
    /// 文件读取失败
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("invalid {what} JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// 错误模式模板无法编译为正则
    #[error("error pattern template '{template}' does not compile: {source}")]
    InvalidTemplate {
        template: String,
        #[source]
        source: regex::Error,
    },
}

impl FriendlyError {
    pub(crate) fn json(what: &'static str, source: serde_json::Error) -> Self {
        Self::Json { what, source }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// 加载结果类型
pub type FriendlyResult<T> = Result<T, FriendlyError>;

/// 读取文件为字符串
pub(crate) fn read_file(path: &std::path::Path) -> FriendlyResult<String> {
    std::fs::read_to_string(path).map_err(|e| FriendlyError::io(path, e))
}
