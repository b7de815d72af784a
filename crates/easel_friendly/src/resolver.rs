//! Misspelling Resolver
//!
//! 把一个未定义的标识符与目录中最接近的符号对应起来。

use crate::catalog::SymbolCatalog;
use crate::distance::distance;
use crate::symbol::Symbol;
use tracing::debug;

/// 超过这个距离就认为标识符与任何已知符号无关
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

/// 消息中最多列出的其他候选
pub const MAX_ALTERNATIVES: usize = 3;

/// 模糊匹配结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub symbol: Symbol,
    pub distance: usize,
}

/// 拼写纠正
#[derive(Debug, Clone, Copy)]
pub struct MisspellingResolver<'a> {
    catalog: &'a SymbolCatalog,
}

impl<'a> MisspellingResolver<'a> {
    pub fn new(catalog: &'a SymbolCatalog) -> Self {
        Self { catalog }
    }

    /// 找出最接近的符号
    ///
    /// 距离相同时按目录顺序第一个胜出（目录中更长的名称在前）。
    /// 超过阈值，或与输入逐字相同（包括大小写）时返回 `None`。
    pub fn resolve(&self, identifier: &str) -> Option<FuzzyMatch> {
        let mut best: Option<(&Symbol, usize)> = None;

        for symbol in self.catalog {
            let d = distance(identifier, &symbol.name);
            if best.map_or(true, |(_, min)| d < min) {
                best = Some((symbol, d));
                if d == 0 {
                    break;
                }
            }
        }

        let (symbol, distance) = best?;
        if distance > MAX_SUGGESTION_DISTANCE {
            debug!(identifier, distance, "no symbol close enough");
            return None;
        }
        if symbol.name == identifier {
            debug!(identifier, "identifier matches a symbol exactly");
            return None;
        }

        debug!(identifier, suggestion = %symbol.name, distance, "resolved misspelling");
        Some(FuzzyMatch {
            symbol: symbol.clone(),
            distance,
        })
    }

    /// 与已选结果距离相同的其他符号（目录顺序，至多 [`MAX_ALTERNATIVES`] 个）
    pub fn alternatives(&self, identifier: &str, chosen: &FuzzyMatch) -> Vec<&'a Symbol> {
        self.catalog
            .iter()
            .filter(|s| s.name != chosen.symbol.name && s.name != identifier)
            .filter(|s| distance(identifier, &s.name) == chosen.distance)
            .take(MAX_ALTERNATIVES)
            .collect()
    }
}
