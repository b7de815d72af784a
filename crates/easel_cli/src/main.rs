use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use easel_diagnostics::Tone;
use easel_friendly::{
    ErrorPatternTable, FriendlyErrors, NativeError, ScopeProperty, Settings, SymbolKind,
    SymbolManifest,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "easel 友好错误 - 把运行时错误翻译成初学者看得懂的提示", version)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOptions {
    /// 设置文件 (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 符号导出清单 (JSON，默认使用内置清单)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// 错误模式表 (JSON，默认使用内置表)
    #[arg(long, global = true)]
    patterns: Option<PathBuf>,

    /// 不使用颜色
    #[arg(long, global = true)]
    no_color: bool,

    /// 关闭友好错误
    #[arg(long, global = true)]
    disable: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 诊断一条未捕获的错误，例如 "ReferenceError: creatCanvas is not defined"
    Diagnose {
        /// 错误文本
        error: String,

        /// 调用栈文件
        #[arg(long)]
        stack: Option<PathBuf>,
    },

    /// 检查错误是否来自在 setup() 之前使用库符号
    Misuse {
        /// 错误文本
        error: String,

        /// 实例模式下的实例名称
        #[arg(long)]
        instance: Option<String>,
    },

    /// 检查大小写写错的生命周期回调名
    Lifecycle {
        /// 用户定义的函数名
        names: Vec<String>,
    },

    /// 为一个标识符查找最接近的符号
    Suggest {
        /// 标识符
        identifier: String,
    },

    /// 直接输出一条友好消息
    Report {
        /// 消息
        message: String,

        /// 上下文（点分的函数名）
        #[arg(long)]
        context: Option<String>,

        /// 颜色，`#RRGGBB`
        #[arg(long, conflicts_with = "kind")]
        color: Option<String>,

        /// 错误类别序号（索引调色板）
        #[arg(long)]
        kind: Option<usize>,
    },

    /// 列出符号目录
    Catalog {
        /// 只列出某一种类
        #[arg(long, value_enum)]
        kind: Option<KindFilter>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindFilter {
    Function,
    Constant,
    Variable,
}

impl KindFilter {
    fn matches(self, kind: SymbolKind) -> bool {
        matches!(
            (self, kind),
            (KindFilter::Function, SymbolKind::Function)
                | (KindFilter::Constant, SymbolKind::Constant)
                | (KindFilter::Variable, SymbolKind::Variable)
        )
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let friendly = build_service(&cli.options)?;

    match cli.command {
        Commands::Diagnose { error, stack } => cmd_diagnose(&friendly, &error, stack)?,
        Commands::Misuse { error, instance } => cmd_misuse(&friendly, &error, instance),
        Commands::Lifecycle { names } => cmd_lifecycle(&friendly, names),
        Commands::Suggest { identifier } => cmd_suggest(&friendly, &identifier),
        Commands::Report {
            message,
            context,
            color,
            kind,
        } => cmd_report(&friendly, &message, context.as_deref(), color, kind)?,
        Commands::Catalog { kind } => cmd_catalog(&friendly, kind),
    }

    Ok(())
}

/// 日志输出到标准错误，默认只显示警告
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_service(options: &GlobalOptions) -> Result<FriendlyErrors> {
    let mut settings = match &options.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if options.no_color {
        settings.use_colors = false;
    }
    if options.disable {
        settings.disabled = true;
    }

    let mut builder = FriendlyErrors::builder().settings(settings);
    if let Some(path) = &options.manifest {
        builder = builder.manifest(SymbolManifest::load(path)?);
    }
    if let Some(path) = &options.patterns {
        builder = builder.patterns(ErrorPatternTable::load(path)?);
    }

    let friendly = builder.build()?;
    debug!(?friendly, "friendly errors ready");
    Ok(friendly)
}

/// 诊断命令
fn cmd_diagnose(friendly: &FriendlyErrors, error: &str, stack: Option<PathBuf>) -> Result<()> {
    let mut native = NativeError::parse(error);
    if let Some(path) = stack {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read stack trace {}", path.display()))?;
        native = native.with_stack(text);
    }

    if friendly.monitor_error(&native).is_none() {
        println!("{}", "🔍 没有可给出的提示".bright_black());
    }
    Ok(())
}

/// 误用检测命令
fn cmd_misuse(friendly: &FriendlyErrors, error: &str, instance: Option<String>) {
    let mut native = NativeError::parse(error);
    if let Some(instance) = instance {
        native = native.in_instance(instance);
    }

    if friendly.detect_top_level_misuse(&native, None).is_none() {
        println!("{}", "🔍 消息中没有库符号".bright_black());
    }
}

/// 生命周期检查命令
fn cmd_lifecycle(friendly: &FriendlyErrors, names: Vec<String>) {
    let scope: Vec<ScopeProperty> = names.into_iter().map(ScopeProperty::function).collect();

    if friendly.check_defined_lifecycle_functions(&scope).is_empty() {
        println!("{}", "✅ 回调名都没有问题".green());
    }
}

/// 拼写建议命令
fn cmd_suggest(friendly: &FriendlyErrors, identifier: &str) {
    match friendly.suggest(identifier) {
        Some(found) => {
            println!(
                "{} ({}, distance {})",
                found.symbol.display_name().green().bold(),
                found.symbol.kind,
                found.distance
            );
            println!("  {}", friendly.docs_url(&found.symbol.name).bright_black());
        }
        None => println!("{}", "🔍 没有足够接近的符号".bright_black()),
    }
}

/// 直接报告命令
fn cmd_report(
    friendly: &FriendlyErrors,
    message: &str,
    context: Option<&str>,
    color: Option<String>,
    kind: Option<usize>,
) -> Result<()> {
    let tone = match (color, kind) {
        (Some(color), _) => Some(
            Tone::hex(&color).with_context(|| format!("invalid color '{}', expected #RRGGBB", color))?,
        ),
        (None, Some(kind)) => Some(Tone::Kind(kind)),
        (None, None) => None,
    };

    friendly.report_friendly_error(message, context, tone);
    Ok(())
}

/// 目录命令
fn cmd_catalog(friendly: &FriendlyErrors, filter: Option<KindFilter>) {
    let symbols = friendly
        .catalog()
        .iter()
        .filter(|s| filter.map_or(true, |f| f.matches(s.kind)));

    for symbol in symbols {
        println!("{:<24} {}", symbol.name, symbol.kind.to_string().bright_black());
    }
}
