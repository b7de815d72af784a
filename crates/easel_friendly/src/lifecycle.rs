//! Lifecycle Callbacks
//!
//! 检查用户在作用域上定义的回调名是否只是大小写写错了
//! （例如 `setUp`、`mousepressed`），这类函数永远不会被调用。

use crate::manifest::SymbolManifest;

/// 宿主会调用的生命周期回调
pub const LIFECYCLE_HOOKS: [&str; 20] = [
    "preload",
    "setup",
    "draw",
    "keyPressed",
    "keyReleased",
    "keyTyped",
    "mouseMoved",
    "mouseDragged",
    "mousePressed",
    "mouseReleased",
    "mouseClicked",
    "doubleClicked",
    "mouseWheel",
    "touchStarted",
    "touchMoved",
    "touchEnded",
    "deviceMoved",
    "deviceTurned",
    "deviceShaken",
    "windowResized",
];

/// 作用域上的一个自有属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeProperty {
    pub name: String,
    /// 是否为函数
    pub callable: bool,
}

impl ScopeProperty {
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

/// 可被检查的作用域（全局对象或某个实例）
pub trait ScopeObject {
    /// 自有属性，不包括继承来的
    fn own_properties(&self) -> Vec<ScopeProperty>;
}

impl ScopeObject for [ScopeProperty] {
    fn own_properties(&self) -> Vec<ScopeProperty> {
        self.to_vec()
    }
}

impl ScopeObject for Vec<ScopeProperty> {
    fn own_properties(&self) -> Vec<ScopeProperty> {
        self.clone()
    }
}

/// 用户脚本的导出也可以写成清单
impl ScopeObject for SymbolManifest {
    fn own_properties(&self) -> Vec<ScopeProperty> {
        self.members
            .iter()
            .map(|m| ScopeProperty {
                name: m.name.clone(),
                callable: m.callable,
            })
            .collect()
    }
}

/// 大小写写错的回调
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Miscapitalization {
    /// 用户写的名称
    pub written: String,
    /// 应该写的名称
    pub intended: &'static str,
}

/// 找出所有大小写写错的回调（按 [`LIFECYCLE_HOOKS`] 的顺序）
pub fn find_miscapitalized(scope: &(impl ScopeObject + ?Sized)) -> Vec<Miscapitalization> {
    let properties = scope.own_properties();
    let mut found = Vec::new();

    for hook in LIFECYCLE_HOOKS {
        // 正确的名称已经存在时，大小写不同的同名函数视为用户自己的辅助函数
        if properties.iter().any(|p| p.name == hook) {
            continue;
        }
        for property in properties.iter().filter(|p| p.callable) {
            if property.name != hook && property.name.to_lowercase() == hook.to_lowercase() {
                found.push(Miscapitalization {
                    written: property.name.clone(),
                    intended: hook,
                });
            }
        }
    }

    found
}
