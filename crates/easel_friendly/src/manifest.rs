//! Symbol Manifest
//!
//! 宿主库的导出清单：实例成员（带"是否可调用"标记）与导出的常量名。
//! 目录从清单构建，不需要在运行时反射宿主对象。

use crate::error::{read_file, FriendlyError, FriendlyResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 内置清单
const BUILTIN_MANIFEST: &str = include_str!("../data/symbols.json");

/// 清单中的一个实例成员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    #[serde(default)]
    pub callable: bool,
}

impl ManifestEntry {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callable: true,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callable: false,
        }
    }
}

/// 导出清单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolManifest {
    /// 实例成员（先于常量合并）
    #[serde(default)]
    pub members: Vec<ManifestEntry>,
    /// 导出的常量名
    #[serde(default)]
    pub constants: Vec<String>,
}

impl SymbolManifest {
    /// 空清单
    pub fn new() -> Self {
        Self::default()
    }

    /// easel 自带的清单
    pub fn builtin() -> FriendlyResult<Self> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    /// 从 JSON 文本解析
    pub fn from_json(json: &str) -> FriendlyResult<Self> {
        serde_json::from_str(json).map_err(|e| FriendlyError::json("symbol manifest", e))
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> FriendlyResult<Self> {
        Self::from_json(&read_file(path.as_ref())?)
    }

    /// 添加可调用成员
    pub fn function(mut self, name: impl Into<String>) -> Self {
        self.members.push(ManifestEntry::function(name));
        self
    }

    /// 添加非调用成员
    pub fn value(mut self, name: impl Into<String>) -> Self {
        self.members.push(ManifestEntry::value(name));
        self
    }

    /// 添加常量名
    pub fn constant(mut self, name: impl Into<String>) -> Self {
        self.constants.push(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.constants.is_empty()
    }
}
