//! Top-Level Misuse Detection
//!
//! 初学者常在生命周期函数之外（例如 `setup()` 之前的顶层代码）调用库函数，
//! 此时宿主会抛出"未定义"之类的错误。这里在错误消息中寻找以整词形式出现的
//! 目录符号。

use crate::catalog::SymbolCatalog;
use crate::symbol::Symbol;
use tracing::debug;

/// 误用检测
#[derive(Debug, Clone, Copy)]
pub struct TopLevelMisuseDetector<'a> {
    catalog: &'a SymbolCatalog,
}

impl<'a> TopLevelMisuseDetector<'a> {
    pub fn new(catalog: &'a SymbolCatalog) -> Self {
        Self { catalog }
    }

    /// 返回第一个以整词出现在消息中的符号
    ///
    /// 按目录顺序（名称由长到短）检查，子串关系中更具体的符号先被命中。
    pub fn detect(&self, message: &str) -> Option<&'a Symbol> {
        let found = self
            .catalog
            .iter()
            .find(|symbol| contains_whole_word(message, &symbol.name));
        if let Some(symbol) = found {
            debug!(symbol = %symbol.name, "detected top-level misuse");
        }
        found
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `word` 是否在 `haystack` 中以整词出现（两侧是非单词字符或字符串边界）
pub fn contains_whole_word(haystack: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    haystack.match_indices(word).any(|(at, _)| {
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + word.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}
