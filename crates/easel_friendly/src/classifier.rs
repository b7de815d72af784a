//! Error Classifier
//!
//! 从原生错误消息中提取出错的标识符。只处理"未定义引用"类错误，
//! 其余类别一律不匹配。

use crate::error::FriendlyResult;
use crate::native::{ErrorClass, NativeError};
use crate::patterns::{ErrorPatternEntry, ErrorPatternTable};
use regex::Regex;
use tracing::{debug, trace};

/// 已编译的模板
#[derive(Debug, Clone)]
struct CompiledPattern {
    entry: ErrorPatternEntry,
    regex: Regex,
}

/// 匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    /// 提取到的标识符
    pub identifier: String,
    /// 命中的模板
    pub entry: &'a ErrorPatternEntry,
}

/// 错误分类器
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    patterns: Vec<CompiledPattern>,
}

impl ErrorClassifier {
    /// 分类器处理的错误类别
    pub const HANDLED_CLASS: ErrorClass = ErrorClass::ReferenceError;

    /// 编译模式表中该类别下能提取标识符的模板
    ///
    /// 模板无法编译时返回错误。
    pub fn new(table: &ErrorPatternTable) -> FriendlyResult<Self> {
        let patterns = table
            .entries(&Self::HANDLED_CLASS)
            .iter()
            .filter(|entry| entry.captures_identifier())
            .map(|entry| {
                Ok(CompiledPattern {
                    entry: entry.clone(),
                    regex: entry.compile()?,
                })
            })
            .collect::<FriendlyResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// 提取标识符
    pub fn classify(&self, error: &NativeError) -> Option<String> {
        self.classify_match(error).map(|c| c.identifier)
    }

    /// 提取标识符并返回命中的模板
    ///
    /// 按表中顺序尝试，第一个命中的模板胜出。
    pub fn classify_match(&self, error: &NativeError) -> Option<Classification<'_>> {
        if error.class != Self::HANDLED_CLASS {
            trace!(class = %error.class, "error class not handled");
            return None;
        }

        let found = self.patterns.iter().find_map(|pattern| {
            let caps = pattern.regex.captures(&error.message)?;
            let identifier = caps.get(1)?.as_str().to_string();
            Some(Classification {
                identifier,
                entry: &pattern.entry,
            })
        });

        match &found {
            Some(c) => debug!(identifier = %c.identifier, kind = %c.entry.kind, "classified error"),
            None => debug!(message = %error.message, "no pattern matched"),
        }
        found
    }

    /// 已编译的模板数量
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ErrorClassifier {
        ErrorClassifier::new(&ErrorPatternTable::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_not_defined() {
        let classifier = builtin();
        let err = NativeError::reference("Uncaught ReferenceError: creatCanvas is not defined");
        assert_eq!(classifier.classify(&err).as_deref(), Some("creatCanvas"));
    }

    #[test]
    fn test_safari_phrasing() {
        let classifier = builtin();
        let err = NativeError::reference("Can't find variable: backgrund");
        let found = classifier.classify_match(&err).unwrap();
        assert_eq!(found.identifier, "backgrund");
        assert_eq!(found.entry.browser, "Safari");
        assert_eq!(found.entry.kind, "NOTDEFINED");
    }

    #[test]
    fn test_other_classes_ignored() {
        let classifier = builtin();
        let err = NativeError::new(ErrorClass::TypeError, "creatCanvas is not defined");
        assert_eq!(classifier.classify(&err), None);
    }

    #[test]
    fn test_unmatched_message() {
        let classifier = builtin();
        let err = NativeError::reference("Cannot access 'x' before initialization");
        assert_eq!(classifier.classify(&err), None);
    }

    #[test]
    fn test_first_template_wins() {
        let table = ErrorPatternTable::new()
            .with_entry(ErrorClass::ReferenceError, ErrorPatternEntry::new("{{}} is not defined", "FIRST"))
            .with_entry(ErrorClass::ReferenceError, ErrorPatternEntry::new("{{}} is not {{.}}", "SECOND"));
        let classifier = ErrorClassifier::new(&table).unwrap();

        let err = NativeError::reference("fil is not defined");
        assert_eq!(classifier.classify_match(&err).unwrap().entry.kind, "FIRST");
        let err = NativeError::reference("fil is not ready");
        assert_eq!(classifier.classify_match(&err).unwrap().entry.kind, "SECOND");
    }

    #[test]
    fn test_only_capturing_templates_compiled() {
        assert_eq!(builtin().len(), 2);
        let empty = ErrorClassifier::new(&ErrorPatternTable::new()).unwrap();
        assert!(empty.is_empty());
    }
}
