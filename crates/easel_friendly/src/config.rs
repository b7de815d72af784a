//! Configuration
//!
//! 两层配置：
//! - [`Settings`]：构建服务时读取一次，可从 JSON 文件加载
//! - [`ReportConfig`]：运行期可随时修改的全局开关与日志覆盖函数，每次报告都会读取

use crate::error::{read_file, FriendlyError, FriendlyResult};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// 日志覆盖函数，替代默认的标准错误输出
pub type Logger = Rc<dyn Fn(&str)>;

/// 默认文档地址
pub const DEFAULT_DOCS_BASE_URL: &str = "https://easel.dev/reference/#/";

/// 单段上下文名称所属的文档分区
pub const DEFAULT_ROOT_SECTION: &str = "easel";

/// 构建期设置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 关闭所有友好错误
    pub disabled: bool,
    /// 默认输出是否着色
    pub use_colors: bool,
    /// 文档链接前缀
    pub docs_base_url: String,
    /// 单段名称的文档分区
    pub root_section: String,
    /// 同一条消息最多输出的次数，`None` 表示不限
    pub repeat_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            disabled: false,
            use_colors: true,
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            root_section: DEFAULT_ROOT_SECTION.to_string(),
            repeat_limit: None,
        }
    }
}

impl Settings {
    /// 从 JSON 文本解析，缺省字段取默认值
    pub fn from_json(json: &str) -> FriendlyResult<Self> {
        serde_json::from_str(json).map_err(|e| FriendlyError::json("settings", e))
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> FriendlyResult<Self> {
        Self::from_json(&read_file(path.as_ref())?)
    }
}

/// 运行期报告配置
///
/// 单线程访问，内部可变，不需要加锁。
#[derive(Default)]
pub struct ReportConfig {
    disabled: Cell<bool>,
    logger: RefCell<Option<Logger>>,
}

impl ReportConfig {
    pub fn new(disabled: bool) -> Self {
        Self {
            disabled: Cell::new(disabled),
            logger: RefCell::new(None),
        }
    }

    /// 是否关闭了友好错误
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// 设置日志覆盖函数
    pub fn set_logger(&self, logger: impl Fn(&str) + 'static) {
        *self.logger.borrow_mut() = Some(Rc::new(logger));
    }

    /// 恢复默认输出
    pub fn clear_logger(&self) {
        self.logger.borrow_mut().take();
    }

    /// 当前的日志覆盖函数
    pub fn logger(&self) -> Option<Logger> {
        self.logger.borrow().clone()
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("disabled", &self.disabled.get())
            .field("logger", &self.logger.borrow().is_some())
            .finish()
    }
}
