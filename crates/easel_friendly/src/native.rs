//! Native Errors
//!
//! 宿主运行时抛出的原生错误的描述：错误类别、消息文本、可选的调用栈文本，
//! 以及产生错误的库实例（为空表示全局模式）。

use std::fmt;

/// 原生错误类别
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// 未定义的引用
    ReferenceError,
    TypeError,
    SyntaxError,
    RangeError,
    /// 其他类别，保留原始名称
    Other(String),
}

impl ErrorClass {
    /// 由类别名称构造
    pub fn from_name(name: &str) -> Self {
        match name {
            "ReferenceError" => Self::ReferenceError,
            "TypeError" => Self::TypeError,
            "SyntaxError" => Self::SyntaxError,
            "RangeError" => Self::RangeError,
            other => Self::Other(other.to_string()),
        }
    }

    /// 类别名称
    pub fn name(&self) -> &str {
        match self {
            Self::ReferenceError => "ReferenceError",
            Self::TypeError => "TypeError",
            Self::SyntaxError => "SyntaxError",
            Self::RangeError => "RangeError",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 原生错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    /// 错误类别
    pub class: ErrorClass,
    /// 错误消息
    pub message: String,
    /// 原始调用栈文本（可选）
    pub stack: Option<String>,
    /// 产生错误的库实例名称；`None` 表示全局模式
    pub instance: Option<String>,
}

impl NativeError {
    /// 创建新的原生错误
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
            stack: None,
            instance: None,
        }
    }

    /// 未定义引用错误
    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::ReferenceError, message)
    }

    /// 附加调用栈文本
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// 标记产生错误的库实例
    pub fn in_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// 是否在全局模式下产生
    pub fn is_global(&self) -> bool {
        self.instance.is_none()
    }

    /// 解析控制台风格的一行错误文本
    ///
    /// 支持 `Uncaught ReferenceError: x is not defined` 与 `TypeError: ...`；
    /// 无法识别类别时整行作为消息，类别为 `Other("Error")`。
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let line = line.strip_prefix("Uncaught ").unwrap_or(line);

        if let Some((head, rest)) = line.split_once(": ") {
            let looks_like_class = !head.is_empty()
                && head.chars().all(|c| c.is_ascii_alphanumeric())
                && head.ends_with("Error");
            if looks_like_class {
                return Self::new(ErrorClass::from_name(head), rest.trim());
            }
        }

        Self::new(ErrorClass::Other("Error".to_string()), line)
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class, self.message)
    }
}
