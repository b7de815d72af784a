//! Easel Friendly Errors
//!
//! 面向初学者的运行时诊断层：拦截原生运行时错误和常见误用，
//! 把它们改写成可操作的、易读的提示。
//!
//! # 组成
//!
//! - [`distance`] - 大小写不敏感替换代价的编辑距离
//! - [`SymbolCatalog`] - 从导出清单构建的公开符号目录（长名称在前）
//! - [`ErrorPatternTable`] / [`ErrorClassifier`] - 从原生错误消息中提取标识符
//! - [`MisspellingResolver`] - 找出最可能想写的符号
//! - [`TopLevelMisuseDetector`] - 识别在生命周期之外使用库符号
//! - [`Reporter`] - 一次性横幅、文档链接与全局关闭开关
//! - [`FriendlyErrors`] - 把以上部分组合起来的服务对象
//!
//! # 示例
//!
//! ```rust
//! use easel_diagnostics::DiagnosticSink;
//! use easel_friendly::{FriendlyErrors, NativeError, SymbolManifest};
//!
//! let sink = DiagnosticSink::new();
//! let friendly = FriendlyErrors::builder()
//!     .manifest(SymbolManifest::new().function("createCanvas"))
//!     .logger(sink.logger())
//!     .build()
//!     .unwrap();
//!
//! let found = friendly
//!     .monitor_error(&NativeError::reference("creatCanvas is not defined"))
//!     .unwrap();
//! assert_eq!(found.symbol.name, "createCanvas");
//! assert!(sink.contains("createCanvas()"));
//! ```

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod distance;
pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod manifest;
pub mod misuse;
pub mod native;
pub mod patterns;
pub mod report;
pub mod resolver;
pub mod service;
pub mod stack;
pub mod symbol;
pub mod translate;

// 重新导出核心类型
pub use catalog::SymbolCatalog;
pub use classifier::{Classification, ErrorClassifier};
pub use config::{Logger, ReportConfig, Settings};
pub use distance::distance;
pub use error::{FriendlyError, FriendlyResult};
pub use hooks::{
    attach_misuse_detector, attach_monitor, DiagnosticHooks, ErrorChannel, ErrorSource,
    SilentHooks, SubscriptionId,
};
pub use lifecycle::{find_miscapitalized, Miscapitalization, ScopeObject, ScopeProperty};
pub use manifest::{ManifestEntry, SymbolManifest};
pub use misuse::TopLevelMisuseDetector;
pub use native::{ErrorClass, NativeError};
pub use patterns::{ErrorPatternEntry, ErrorPatternTable};
pub use report::Reporter;
pub use resolver::{FuzzyMatch, MisspellingResolver, MAX_SUGGESTION_DISTANCE};
pub use service::{FriendlyErrors, FriendlyErrorsBuilder};
pub use stack::{DefaultStackParser, StackFrame, StackParser};
pub use symbol::{Symbol, SymbolKind};
pub use translate::{EnglishTranslator, Translator};
