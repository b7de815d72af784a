//! Reporter
//!
//! 最终的输出环节：全局关闭开关、一次性欢迎横幅、文档链接、重复抑制，
//! 然后交给日志覆盖函数或默认的 [`Emitter`]。

use crate::config::{ReportConfig, Settings};
use crate::translate::Translator;
use easel_diagnostics::emitter::render_plain;
use easel_diagnostics::{Diagnostic, Emitter, Tone};
use std::cell::{Cell, RefCell};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// 资源加载类上下文的前缀，这类消息原样输出
const LOADING_PREFIX: &str = "load";

/// 重复计数最多跟踪的不同消息数，超出时整体清空重新计数
const MAX_TRACKED_MESSAGES: usize = 1024;

/// 报告器
#[derive(Debug)]
pub struct Reporter {
    emitter: Emitter,
    docs_base_url: String,
    root_section: String,
    repeat_limit: Option<usize>,
    banner_shown: Cell<bool>,
    repeats: RefCell<HashMap<u64, usize>>,
}

impl Reporter {
    pub fn new(settings: &Settings) -> Self {
        let emitter = if settings.use_colors {
            Emitter::new()
        } else {
            Emitter::without_colors()
        };
        Self {
            emitter,
            docs_base_url: settings.docs_base_url.clone(),
            root_section: settings.root_section.clone(),
            repeat_limit: settings.repeat_limit,
            banner_shown: Cell::new(false),
            repeats: RefCell::new(HashMap::new()),
        }
    }

    /// 上下文是否为资源加载操作
    pub fn is_resource_loading(context: &str) -> bool {
        context.starts_with(LOADING_PREFIX)
    }

    /// 由点分上下文名称构造文档链接
    ///
    /// - `easel.Vector.add` → 分区 `easel.Vector`，锚点 `add`
    /// - `fill` → 分区为根分区，锚点 `fill`
    pub fn docs_url(&self, context: &str) -> String {
        let parts: Vec<&str> = context.split('.').collect();
        let (section, anchor) = if parts.len() > 1 {
            (parts[..2].join("."), parts[2..].join("/"))
        } else {
            (self.root_section.clone(), context.to_string())
        };
        format!("{}{}/{}", self.docs_base_url, section, anchor)
    }

    /// 横幅是否已经输出过
    pub fn banner_shown(&self) -> bool {
        self.banner_shown.get()
    }

    /// 报告一条纯文本消息
    pub fn report(
        &self,
        config: &ReportConfig,
        translator: &dyn Translator,
        message: &str,
        context: Option<&str>,
        tone: Option<Tone>,
    ) -> bool {
        let diagnostic = Diagnostic::new(message).maybe_tone(tone);
        self.emit(config, translator, diagnostic, context, None)
    }

    /// 报告一条诊断，返回是否真的输出了
    ///
    /// `logger` 优先于配置中的日志覆盖函数。
    pub fn emit(
        &self,
        config: &ReportConfig,
        translator: &dyn Translator,
        diagnostic: Diagnostic,
        context: Option<&str>,
        logger: Option<&dyn Fn(&str)>,
    ) -> bool {
        if config.is_disabled() {
            trace!("friendly errors disabled, dropping report");
            return false;
        }

        if !self.admit(&diagnostic.message) {
            debug!(message = %diagnostic.message, "repeat limit reached");
            return false;
        }

        let diagnostic = self.decorate(translator, diagnostic, context);
        let banner = (!self.banner_shown.replace(true))
            .then(|| translator.translate("fes.welcome", &[]));

        let configured = config.logger();
        match logger.or(configured.as_deref()) {
            Some(log) => {
                let body = render_plain(&diagnostic);
                match banner {
                    Some(banner) => log(&format!("{}\n\n{}", banner, body)),
                    None => log(&body),
                }
            }
            None => {
                if let Some(banner) = banner {
                    self.emitter.emit_text(&banner);
                }
                self.emitter.emit(&diagnostic);
            }
        }
        true
    }

    /// 清除横幅与重复计数
    pub fn reset(&self) {
        self.banner_shown.set(false);
        self.repeats.borrow_mut().clear();
    }

    fn admit(&self, message: &str) -> bool {
        let Some(limit) = self.repeat_limit else {
            return true;
        };
        let key = message_key(message);
        let mut repeats = self.repeats.borrow_mut();
        if repeats.len() >= MAX_TRACKED_MESSAGES && !repeats.contains_key(&key) {
            debug!(tracked = repeats.len(), "repeat table full, clearing");
            repeats.clear();
        }
        let count = repeats.entry(key).or_insert(0);
        if *count >= limit {
            return false;
        }
        *count += 1;
        true
    }

    fn decorate(
        &self,
        translator: &dyn Translator,
        mut diagnostic: Diagnostic,
        context: Option<&str>,
    ) -> Diagnostic {
        match context {
            Some(context) if Self::is_resource_loading(context) => diagnostic,
            Some(context) => {
                diagnostic.message = pre(translator, &diagnostic.message);
                let url = self.docs_url(context);
                diagnostic.reference(translator.translate("fes.further_details", &[("url", url)]))
            }
            None => {
                diagnostic.message = pre(translator, &diagnostic.message);
                diagnostic
            }
        }
    }
}

fn message_key(message: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    message.hash(&mut hasher);
    hasher.finish()
}

fn pre(translator: &dyn Translator, message: &str) -> String {
    translator.translate("fes.pre", &[("message", message.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::EnglishTranslator;
    use easel_diagnostics::DiagnosticSink;

    fn reporter() -> Reporter {
        Reporter::new(&Settings::default())
    }

    fn captured() -> (ReportConfig, DiagnosticSink) {
        let config = ReportConfig::new(false);
        let sink = DiagnosticSink::new();
        config.set_logger(sink.logger());
        (config, sink)
    }

    #[test]
    fn test_docs_url() {
        let reporter = reporter();
        assert_eq!(reporter.docs_url("fill"), "https://easel.dev/reference/#/easel/fill");
        assert_eq!(
            reporter.docs_url("easel.Vector.add"),
            "https://easel.dev/reference/#/easel.Vector/add"
        );
        assert_eq!(
            reporter.docs_url("easel.Table.rows.get"),
            "https://easel.dev/reference/#/easel.Table/rows/get"
        );
        assert_eq!(reporter.docs_url("easel.Vector"), "https://easel.dev/reference/#/easel.Vector/");
    }

    #[test]
    fn test_banner_once() {
        let reporter = reporter();
        let (config, sink) = captured();

        assert!(reporter.report(&config, &EnglishTranslator, "first", Some("fill"), None));
        assert!(reporter.report(&config, &EnglishTranslator, "second", Some("fill"), None));
        assert!(reporter.report(&config, &EnglishTranslator, "third", None, Some(Tone::Kind(1))));

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].starts_with("Welcome!"));
        assert!(entries.iter().skip(1).all(|e| !e.contains("Welcome!")));
        assert!(reporter.banner_shown());
    }

    #[test]
    fn test_message_with_url() {
        let reporter = reporter();
        let (config, sink) = captured();
        reporter.report(&config, &EnglishTranslator, "banner", None, None);

        reporter.report(&config, &EnglishTranslator, "fill() was expecting a number", Some("fill"), None);
        assert_eq!(
            sink.last().unwrap(),
            "🌸 easel says: fill() was expecting a number\n+ More info: https://easel.dev/reference/#/easel/fill"
        );
    }

    #[test]
    fn test_loading_context_emitted_as_is() {
        let reporter = reporter();
        let (config, sink) = captured();
        reporter.report(&config, &EnglishTranslator, "banner", None, None);

        reporter.report(&config, &EnglishTranslator, "Could not load image cat.png", Some("loadImage"), None);
        assert_eq!(sink.last().unwrap(), "Could not load image cat.png");
    }

    #[test]
    fn test_disabled_has_no_effect() {
        let reporter = reporter();
        let (config, sink) = captured();
        config.set_disabled(true);

        assert!(!reporter.report(&config, &EnglishTranslator, "anything", Some("fill"), None));
        assert!(sink.is_empty());
        assert!(!reporter.banner_shown());
    }

    #[test]
    fn test_explicit_logger_wins() {
        let reporter = reporter();
        let (config, configured) = captured();
        let explicit = DiagnosticSink::new();
        let log = explicit.logger();
        let log: &dyn Fn(&str) = &log;

        reporter.emit(&config, &EnglishTranslator, Diagnostic::new("hi"), None, Some(log));
        assert!(configured.is_empty());
        assert_eq!(explicit.len(), 1);
    }

    #[test]
    fn test_repeat_limit() {
        let settings = Settings {
            repeat_limit: Some(2),
            ..Settings::default()
        };
        let reporter = Reporter::new(&settings);
        let (config, sink) = captured();

        for _ in 0..5 {
            reporter.report(&config, &EnglishTranslator, "same", None, None);
        }
        reporter.report(&config, &EnglishTranslator, "other", None, None);
        assert_eq!(sink.len(), 3);

        reporter.reset();
        assert!(reporter.report(&config, &EnglishTranslator, "same", None, None));
        assert!(sink.last().unwrap().starts_with("Welcome!"));
    }

    #[test]
    fn test_repeat_table_is_bounded() {
        let settings = Settings {
            repeat_limit: Some(1),
            ..Settings::default()
        };
        let reporter = Reporter::new(&settings);
        let (config, sink) = captured();

        assert!(reporter.report(&config, &EnglishTranslator, "m0", None, None));
        assert!(!reporter.report(&config, &EnglishTranslator, "m0", None, None));
        for i in 1..MAX_TRACKED_MESSAGES {
            assert!(reporter.report(&config, &EnglishTranslator, &format!("m{}", i), None, None));
        }
        assert_eq!(reporter.repeats.borrow().len(), MAX_TRACKED_MESSAGES);

        // 新消息让计数表清空，之前被抑制的消息重新允许输出一次
        assert!(reporter.report(&config, &EnglishTranslator, "fresh", None, None));
        assert_eq!(reporter.repeats.borrow().len(), 1);
        assert!(reporter.report(&config, &EnglishTranslator, "m0", None, None));
        assert_eq!(sink.len(), MAX_TRACKED_MESSAGES + 2);
    }
}
