//! Easel Diagnostics
//!
//! 友好错误消息的展示层：负责把诊断内容排版、着色并输出。
//! 消息本身由 `easel_friendly` 决定，这里只关心"怎么显示"。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 一条待输出的友好消息
//! - [`Tone`] / [`Palette`] - 消息颜色（显式颜色或按错误类别索引调色板）
//! - [`Emitter`] - 诊断输出器（纯文本或彩色）
//! - [`DiagnosticSink`] - 收集输出文本的日志接收器（测试常用）
//!
//! # 示例
//!
//! ```rust
//! use easel_diagnostics::{Diagnostic, Emitter, Tone};
//!
//! let diag = Diagnostic::new("fill() was expecting a number")
//!     .tone(Tone::Kind(1))
//!     .reference("https://easel.dev/reference/#/easel/fill");
//!
//! let text = Emitter::without_colors().render(&diag);
//! assert!(text.contains("fill() was expecting a number"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod sink;
pub mod tone;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, Suggestion};
pub use emitter::Emitter;
pub use sink::DiagnosticSink;
pub use tone::{Palette, Tone};
