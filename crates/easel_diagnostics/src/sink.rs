//! DiagnosticSink - 输出收集器
//!
//! 作为日志覆盖函数使用时，收集每次报告输出的完整文本。
//! 主要用于测试环境和需要二次处理输出的宿主。

use std::cell::RefCell;
use std::rc::Rc;

/// 输出收集器
///
/// 克隆得到的句柄共享同一份记录。
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    /// 收集的输出
    entries: Rc<RefCell<Vec<String>>>,
}

impl DiagnosticSink {
    /// 创建新的收集器
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条输出
    pub fn push(&self, text: &str) {
        self.entries.borrow_mut().push(text.to_string());
    }

    /// 生成一个写入本收集器的日志函数
    pub fn logger(&self) -> impl Fn(&str) + 'static {
        let entries = Rc::clone(&self.entries);
        move |text: &str| entries.borrow_mut().push(text.to_string())
    }

    /// 获取所有输出（拷贝）
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// 最后一条输出
    pub fn last(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }

    /// 是否有某条输出包含给定文本
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.borrow().iter().any(|e| e.contains(needle))
    }

    /// 清空所有输出
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// 获取输出数量
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_creation() {
        let sink = DiagnosticSink::new();
        assert_eq!(sink.len(), 0);
        assert!(sink.is_empty());
        assert_eq!(sink.last(), None);
    }

    #[test]
    fn test_logger_shares_entries() {
        let sink = DiagnosticSink::new();
        let log = sink.logger();

        log("first");
        sink.clone().push("second");

        assert_eq!(sink.entries(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(sink.last().as_deref(), Some("second"));
        assert!(sink.contains("fir"));
        assert!(!sink.contains("third"));
    }

    #[test]
    fn test_clear() {
        let sink = DiagnosticSink::new();
        sink.push("a");
        sink.push("b");
        assert_eq!(sink.len(), 2);

        sink.clear();

        assert!(sink.is_empty());
    }
}
