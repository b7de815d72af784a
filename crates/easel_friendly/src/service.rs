//! Friendly Errors Service
//!
//! 友好错误系统的服务对象。启动时构建一次，以引用（或 `Rc`）交给各个入口点；
//! 符号目录在第一次使用时构建并缓存，`reset()` 之后重新构建。

use crate::catalog::SymbolCatalog;
use crate::classifier::ErrorClassifier;
use crate::config::{Logger, ReportConfig, Settings};
use crate::error::FriendlyResult;
use crate::lifecycle::{find_miscapitalized, Miscapitalization, ScopeObject};
use crate::manifest::SymbolManifest;
use crate::misuse::TopLevelMisuseDetector;
use crate::native::NativeError;
use crate::patterns::ErrorPatternTable;
use crate::report::Reporter;
use crate::resolver::{FuzzyMatch, MisspellingResolver};
use crate::stack::{DefaultStackParser, StackParser};
use crate::symbol::Symbol;
use crate::translate::{EnglishTranslator, Translator};
use easel_diagnostics::{Diagnostic, Tone};
use once_cell::unsync::OnceCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// 友好错误服务
pub struct FriendlyErrors {
    manifest: SymbolManifest,
    catalog: OnceCell<SymbolCatalog>,
    classifier: ErrorClassifier,
    translator: Box<dyn Translator>,
    stack_parser: Option<Box<dyn StackParser>>,
    reporter: Reporter,
    config: ReportConfig,
}

impl FriendlyErrors {
    /// 使用内置清单、内置模式表和默认设置
    pub fn new() -> FriendlyResult<Self> {
        Self::builder().build()
    }

    pub fn builder() -> FriendlyErrorsBuilder {
        FriendlyErrorsBuilder::new()
    }

    /// 符号目录，首次访问时构建
    pub fn catalog(&self) -> &SymbolCatalog {
        self.catalog
            .get_or_init(|| SymbolCatalog::build(&self.manifest))
    }

    /// 目录是否已经构建
    pub fn catalog_built(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// 丢弃缓存的目录并重新允许欢迎横幅（测试隔离用）
    pub fn reset(&mut self) {
        self.catalog.take();
        self.reporter.reset();
    }

    /// 运行期配置
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.config.set_disabled(disabled);
    }

    pub fn is_disabled(&self) -> bool {
        self.config.is_disabled()
    }

    /// 设置日志覆盖函数，所有入口点都改为输出到它
    pub fn set_logger(&self, logger: impl Fn(&str) + 'static) {
        self.config.set_logger(logger);
    }

    pub fn clear_logger(&self) {
        self.config.clear_logger();
    }

    /// 欢迎横幅是否已经输出
    pub fn banner_shown(&self) -> bool {
        self.reporter.banner_shown()
    }

    /// 文档链接
    pub fn docs_url(&self, context: &str) -> String {
        self.reporter.docs_url(context)
    }

    /// 通用报告入口，库中任何例程都可以直接调用
    pub fn report_friendly_error(
        &self,
        message: &str,
        context: Option<&str>,
        tone: Option<Tone>,
    ) -> bool {
        self.reporter
            .report(&self.config, self.translator.as_ref(), message, context, tone)
    }

    /// 提取并纠正未定义的标识符
    pub fn suggest(&self, identifier: &str) -> Option<FuzzyMatch> {
        MisspellingResolver::new(self.catalog()).resolve(identifier)
    }

    /// 未捕获错误的入口：分类 → 纠正 → 报告
    ///
    /// 返回找到的纠正结果；无法分类或没有足够接近的符号时静默返回 `None`。
    pub fn monitor_error(&self, error: &NativeError) -> Option<FuzzyMatch> {
        if self.is_disabled() {
            return None;
        }

        let identifier = self.classifier.classify(error)?;
        let resolver = MisspellingResolver::new(self.catalog());
        let found = resolver.resolve(&identifier)?;
        let alternatives = resolver.alternatives(&identifier, &found);

        let message = self.translator.translate(
            "fes.misspelling",
            &[
                ("name", identifier.clone()),
                ("actualName", found.symbol.display_name()),
                ("type", found.symbol.kind.name().to_string()),
                ("location", self.locate(error)),
            ],
        );

        let mut diagnostic = Diagnostic::new(message);
        if !alternatives.is_empty() {
            let names = alternatives
                .iter()
                .map(|s| s.display_name())
                .collect::<Vec<_>>()
                .join(", ");
            diagnostic = diagnostic.suggest(
                self.translator
                    .translate("fes.misspelling_alternatives", &[("names", names)]),
            );
        }

        self.reporter.emit(
            &self.config,
            self.translator.as_ref(),
            diagnostic,
            Some(&found.symbol.name),
            None,
        );
        Some(found)
    }

    /// 检查作用域上大小写写错的生命周期回调，并逐个报告
    pub fn check_defined_lifecycle_functions(
        &self,
        scope: &(impl ScopeObject + ?Sized),
    ) -> Vec<Miscapitalization> {
        if self.is_disabled() {
            return Vec::new();
        }

        let found = find_miscapitalized(scope);
        for miscapitalized in &found {
            let message = self.translator.translate(
                "fes.lifecycle_miscapitalized",
                &[
                    ("name", miscapitalized.written.clone()),
                    ("actualName", miscapitalized.intended.to_string()),
                ],
            );
            self.report_friendly_error(&message, Some(miscapitalized.intended), None);
        }
        found
    }

    /// 识别在生命周期之外使用库符号的错误
    ///
    /// 给出 `logger` 时消息写入它，而不是配置中的输出。
    pub fn detect_top_level_misuse(
        &self,
        error: &NativeError,
        logger: Option<&dyn Fn(&str)>,
    ) -> Option<Symbol> {
        if self.is_disabled() {
            return None;
        }

        let symbol = TopLevelMisuseDetector::new(self.catalog())
            .detect(&error.message)?
            .clone();

        let mut substitutions = vec![
            ("symbolName", symbol.display_name()),
            ("symbolType", symbol.kind.name().to_string()),
        ];
        let key = match &error.instance {
            Some(instance) => {
                substitutions.push(("instance", instance.clone()));
                "fes.misused_top_level.instance"
            }
            None => "fes.misused_top_level.global",
        };
        debug!(symbol = %symbol.name, global = error.is_global(), "reporting top-level misuse");

        let message = self.translator.translate(key, &substitutions);
        self.reporter.emit(
            &self.config,
            self.translator.as_ref(),
            Diagnostic::new(message),
            Some(&symbol.name),
            logger,
        );
        Some(symbol)
    }

    /// 错误的源码位置文本，没有解析器或栈帧时为空
    fn locate(&self, error: &NativeError) -> String {
        let Some(parser) = &self.stack_parser else {
            return String::new();
        };
        let Some(frame) = parser.parse(error).into_iter().next() else {
            return String::new();
        };
        self.translator.translate(
            "fes.location",
            &[
                ("line", frame.line.to_string()),
                ("column", frame.column.to_string()),
                ("file", frame.file_name().to_string()),
                ("url", frame.file.clone()),
            ],
        )
    }
}

impl fmt::Debug for FriendlyErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FriendlyErrors")
            .field("catalog_built", &self.catalog_built())
            .field("patterns", &self.classifier.len())
            .field("stack_parser", &self.stack_parser.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// 服务构建器
pub struct FriendlyErrorsBuilder {
    manifest: Option<SymbolManifest>,
    patterns: Option<ErrorPatternTable>,
    translator: Box<dyn Translator>,
    stack_parser: Option<Box<dyn StackParser>>,
    settings: Settings,
    logger: Option<Logger>,
}

impl Default for FriendlyErrorsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FriendlyErrorsBuilder {
    pub fn new() -> Self {
        Self {
            manifest: None,
            patterns: None,
            translator: Box::new(EnglishTranslator),
            stack_parser: Some(Box::new(DefaultStackParser)),
            settings: Settings::default(),
            logger: None,
        }
    }

    /// 宿主库的导出清单（默认使用内置清单）
    pub fn manifest(mut self, manifest: SymbolManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// 错误模式表（默认使用内置表）
    pub fn patterns(mut self, patterns: ErrorPatternTable) -> Self {
        self.patterns = Some(patterns);
        self
    }

    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn stack_parser(mut self, parser: impl StackParser + 'static) -> Self {
        self.stack_parser = Some(Box::new(parser));
        self
    }

    /// 不解析调用栈，消息中省略位置
    pub fn without_stack_parser(mut self) -> Self {
        self.stack_parser = None;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn logger(mut self, logger: impl Fn(&str) + 'static) -> Self {
        self.logger = Some(Rc::new(logger));
        self
    }

    /// 构建服务
    ///
    /// 只在内置清单/模式表无法解析或模板无法编译时失败。
    pub fn build(self) -> FriendlyResult<FriendlyErrors> {
        let manifest = match self.manifest {
            Some(manifest) => manifest,
            None => SymbolManifest::builtin()?,
        };
        let patterns = match self.patterns {
            Some(patterns) => patterns,
            None => ErrorPatternTable::builtin()?,
        };

        let config = ReportConfig::new(self.settings.disabled);
        if let Some(logger) = self.logger {
            config.set_logger(move |text| logger(text));
        }

        Ok(FriendlyErrors {
            manifest,
            catalog: OnceCell::new(),
            classifier: ErrorClassifier::new(&patterns)?,
            translator: self.translator,
            stack_parser: self.stack_parser,
            reporter: Reporter::new(&self.settings),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ScopeProperty;
    use crate::symbol::SymbolKind;
    use easel_diagnostics::DiagnosticSink;

    fn service() -> (FriendlyErrors, DiagnosticSink) {
        let sink = DiagnosticSink::new();
        let service = FriendlyErrors::builder()
            .manifest(
                SymbolManifest::new()
                    .function("createCanvas")
                    .function("color")
                    .function("fill")
                    .value("width")
                    .constant("PI"),
            )
            .logger(sink.logger())
            .build()
            .unwrap();
        (service, sink)
    }

    #[test]
    fn test_catalog_is_lazy() {
        let (mut service, _) = service();
        assert!(!service.catalog_built());
        assert_eq!(service.catalog().len(), 5);
        assert!(service.catalog_built());

        service.reset();
        assert!(!service.catalog_built());
    }

    #[test]
    fn test_monitor_error_reports_misspelling() {
        let (service, sink) = service();
        let err = NativeError::reference("creatCanvas is not defined")
            .with_stack("ReferenceError: creatCanvas is not defined\n    at setup (http://localhost/sketch.js:3:5)");

        let found = service.monitor_error(&err).unwrap();
        assert_eq!(found.symbol.name, "createCanvas");
        assert_eq!(found.distance, 1);

        let text = sink.last().unwrap();
        assert!(text.contains(
            "you may have accidentally written \"creatCanvas\" instead of \"createCanvas()\""
        ));
        assert!(text.contains("(on line 3 in sketch.js [http://localhost/sketch.js:3:5])"));
        assert!(text.contains("use the function from easel"));
        assert!(text.contains("+ More info: https://easel.dev/reference/#/easel/createCanvas"));
    }

    #[test]
    fn test_monitor_error_names_equally_close_matches() {
        let sink = DiagnosticSink::new();
        let service = FriendlyErrors::builder()
            .manifest(SymbolManifest::new().function("fill").function("file").value("film"))
            .logger(sink.logger())
            .build()
            .unwrap();

        let found = service
            .monitor_error(&NativeError::reference("fil is not defined"))
            .unwrap();
        assert_eq!(found.symbol.name, "fill");

        let text = sink.last().unwrap();
        assert!(text.contains("instead of \"fill()\""));
        assert!(text.contains("  = help: You may also have meant: file(), film"));
    }

    #[test]
    fn test_docs_url_for_suggestion() {
        let (service, _) = service();
        let found = service.suggest("colr").unwrap();
        assert_eq!(
            service.docs_url(&found.symbol.name),
            "https://easel.dev/reference/#/easel/color"
        );
    }

    #[test]
    fn test_monitor_error_without_stack_parser() {
        let sink = DiagnosticSink::new();
        let service = FriendlyErrors::builder()
            .manifest(SymbolManifest::new().function("fill"))
            .without_stack_parser()
            .logger(sink.logger())
            .build()
            .unwrap();
        let err = NativeError::reference("fil is not defined").with_stack("    at sketch.js:1:1");

        assert!(service.monitor_error(&err).is_some());
        assert!(sink.last().unwrap().contains("instead of \"fill()\". Please"));
    }

    #[test]
    fn test_monitor_error_silent_cases() {
        let (service, sink) = service();
        assert_eq!(service.monitor_error(&NativeError::reference("xyz123 is not defined")), None);
        assert_eq!(service.monitor_error(&NativeError::reference("something else")), None);
        assert_eq!(service.monitor_error(&NativeError::reference("fill is not defined")), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_detect_top_level_misuse_global_and_instance() {
        let (service, sink) = service();

        let global = NativeError::reference("PI is not defined");
        let symbol = service.detect_top_level_misuse(&global, None).unwrap();
        assert_eq!(symbol, Symbol::new("PI", SymbolKind::Constant));
        assert!(sink.last().unwrap().contains("easel's PI constant"));
        assert!(sink.last().unwrap().contains("your sketch's setup() function"));

        let instance = NativeError::reference("fill is not defined").in_instance("left");
        service.detect_top_level_misuse(&instance, None).unwrap();
        assert!(sink.last().unwrap().contains("easel's fill() function"));
        assert!(sink.last().unwrap().contains("setup() function of the \"left\" sketch"));
    }

    #[test]
    fn test_detect_top_level_misuse_explicit_logger() {
        let (service, configured) = service();
        let explicit = DiagnosticSink::new();
        let log = explicit.logger();
        let log: &dyn Fn(&str) = &log;

        service.detect_top_level_misuse(&NativeError::reference("width is not defined"), Some(log));
        assert!(configured.is_empty());
        assert!(explicit.contains("easel's width variable"));
    }

    #[test]
    fn test_lifecycle_check() {
        let (service, sink) = service();
        let scope = vec![ScopeProperty::function("Draw"), ScopeProperty::function("setup")];

        let found = service.check_defined_lifecycle_functions(&scope);
        assert_eq!(found.len(), 1);
        assert!(sink.last().unwrap().contains("accidentally written Draw instead of draw"));
    }

    #[test]
    fn test_disabled_entry_points() {
        let (service, sink) = service();
        service.set_disabled(true);

        assert!(!service.report_friendly_error("hello", None, None));
        assert_eq!(service.monitor_error(&NativeError::reference("fil is not defined")), None);
        assert_eq!(service.detect_top_level_misuse(&NativeError::reference("PI is not defined"), None), None);
        assert!(service
            .check_defined_lifecycle_functions(&vec![ScopeProperty::function("SETUP")])
            .is_empty());
        assert!(sink.is_empty());
        assert!(!service.banner_shown());
    }
}
