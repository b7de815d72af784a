//! Diagnostic - 友好消息
//!
//! 表示一条准备输出给初学者的诊断消息

use crate::tone::Tone;

/// 修复建议
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// 建议消息
    pub message: String,
}

impl Suggestion {
    /// 创建新的建议
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 主要消息
    pub message: String,
    /// 颜色（可选，未指定时使用回退色）
    pub tone: Option<Tone>,
    /// 补充说明，每条单独一行（例如文档链接）
    pub notes: Vec<String>,
    /// 修复建议
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    /// 创建新的诊断
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// 设置颜色
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// 设置可选颜色
    pub fn maybe_tone(mut self, tone: Option<Tone>) -> Self {
        self.tone = tone;
        self
    }

    /// 添加注释
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 添加文档链接
    pub fn reference(self, url: impl Into<String>) -> Self {
        self.with_note(url)
    }

    /// 添加建议
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// 添加简单建议（仅消息）
    pub fn suggest(self, message: impl Into<String>) -> Self {
        self.with_suggestion(Suggestion::new(message))
    }
}
