//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化为文本，并输出到标准错误

use crate::diagnostic::Diagnostic;
use crate::tone::Palette;
use colored::*;

/// 诊断输出器
#[derive(Debug, Clone)]
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
    /// 调色板
    palette: Palette,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的输出器
    pub fn new() -> Self {
        Self {
            use_colors: true,
            palette: Palette::default(),
        }
    }

    /// 创建无颜色的输出器
    pub fn without_colors() -> Self {
        Self {
            use_colors: false,
            palette: Palette::default(),
        }
    }

    /// 是否使用颜色
    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// 按输出器的颜色设置渲染
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        if self.use_colors {
            self.render_colored(diagnostic)
        } else {
            render_plain(diagnostic)
        }
    }

    /// 输出单个诊断到标准错误
    pub fn emit(&self, diagnostic: &Diagnostic) {
        eprintln!("{}", self.render(diagnostic));
    }

    /// 输出任意文本（例如欢迎横幅）
    pub fn emit_text(&self, text: &str) {
        eprintln!("{}", text);
    }

    /// 渲染带颜色的诊断
    fn render_colored(&self, diagnostic: &Diagnostic) -> String {
        let color = self.palette.resolve(diagnostic.tone);
        let mut lines = vec![diagnostic.message.color(color).bold().to_string()];

        // 注释
        for note in &diagnostic.notes {
            lines.push(note.color(color).to_string());
        }

        // 建议
        for suggestion in &diagnostic.suggestions {
            lines.push(format!(
                "  {} {}",
                "=".green().bold(),
                format!("help: {}", suggestion.message).green()
            ));
        }

        lines.join("\n")
    }
}

/// 渲染纯文本诊断
///
/// 日志覆盖函数（测试环境）总是收到这一格式。
pub fn render_plain(diagnostic: &Diagnostic) -> String {
    let mut lines = vec![diagnostic.message.clone()];

    for note in &diagnostic.notes {
        lines.push(note.clone());
    }

    for suggestion in &diagnostic.suggestions {
        lines.push(format!("  = help: {}", suggestion.message));
    }

    lines.join("\n")
}
