//! Symbol Definitions
//!
//! 库对外公开的标识符。种类在目录构建时一次性确定，之后不再推断。

use std::fmt;

/// 符号种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Constant,
    Variable,
}

impl SymbolKind {
    /// 由导出清单的元数据推断种类
    ///
    /// - 可调用 → 函数
    /// - 名称全为大写（至少含一个字母）→ 常量
    /// - 其余 → 变量
    pub fn infer(name: &str, callable: bool) -> Self {
        if callable {
            Self::Function
        } else if is_upper_case(name) {
            Self::Constant
        } else {
            Self::Variable
        }
    }

    /// 种类名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Constant => "constant",
            Self::Variable => "variable",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_upper_case(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}

/// 符号
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// 面向用户的写法，函数带上 `()`
    pub fn display_name(&self) -> String {
        match self.kind {
            SymbolKind::Function => format!("{}()", self.name),
            _ => self.name.clone(),
        }
    }

    /// 名称字符数
    pub fn len(&self) -> usize {
        self.name.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_kind() {
        assert_eq!(SymbolKind::infer("createCanvas", true), SymbolKind::Function);
        assert_eq!(SymbolKind::infer("PI", false), SymbolKind::Constant);
        assert_eq!(SymbolKind::infer("HALF_PI", false), SymbolKind::Constant);
        assert_eq!(SymbolKind::infer("P2D", false), SymbolKind::Constant);
        assert_eq!(SymbolKind::infer("mouseX", false), SymbolKind::Variable);
        assert_eq!(SymbolKind::infer("__", false), SymbolKind::Variable);
        // 可调用优先于大写
        assert_eq!(SymbolKind::infer("RGB", true), SymbolKind::Function);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Symbol::new("fill", SymbolKind::Function).display_name(), "fill()");
        assert_eq!(Symbol::new("PI", SymbolKind::Constant).display_name(), "PI");
        assert_eq!(SymbolKind::Variable.to_string(), "variable");
    }
}
