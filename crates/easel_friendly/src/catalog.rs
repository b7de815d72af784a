//! Symbol Catalog
//!
//! 去重、排序后的公开符号目录，模糊匹配与误用检测都基于它。
//!
//! 排序规则：按名称长度降序，长度相同时保持出现顺序。更长、更具体的名称
//! 先被检查，这决定了编辑距离相同时的胜出者，也决定了误用检测时
//! 子串关系中哪一个符号被报告。

use crate::manifest::SymbolManifest;
use crate::symbol::{Symbol, SymbolKind};
use std::collections::HashSet;
use tracing::debug;

/// 私有名称前缀，这些名称不属于初学者会误用的公开接口
pub const PRIVATE_MARKER: char = '_';

/// 符号目录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
}

impl SymbolCatalog {
    /// 从导出清单构建目录
    ///
    /// 实例成员先于常量合并；同名符号只保留第一次出现的那个。
    pub fn build(manifest: &SymbolManifest) -> Self {
        let members = manifest
            .members
            .iter()
            .map(|m| (m.name.as_str(), m.callable));
        let constants = manifest.constants.iter().map(|c| (c.as_str(), false));

        let catalog = Self::from_symbols(
            members
                .chain(constants)
                .map(|(name, callable)| Symbol::new(name, SymbolKind::infer(name, callable))),
        );

        debug!(symbols = catalog.len(), "built symbol catalog");
        catalog
    }

    /// 由已确定种类的符号序列构建（同样过滤、去重并排序）
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut seen = HashSet::new();
        let mut symbols: Vec<Symbol> = symbols
            .into_iter()
            .filter(|s| !s.name.is_empty() && !s.name.starts_with(PRIVATE_MARKER))
            .filter(|s| seen.insert(s.name.clone()))
            .collect();

        // sort_by 是稳定排序，同长度保持出现顺序
        symbols.sort_by(|a, b| b.len().cmp(&a.len()));

        Self { symbols }
    }

    /// 按存储顺序遍历
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// 所有符号
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// 按名称查找（大小写敏感）
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolCatalog {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
