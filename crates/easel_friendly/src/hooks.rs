//! Host Hooks
//!
//! 宿主库与友好错误系统之间的接口：
//! - [`DiagnosticHooks`]：宿主显式调用的报告入口
//! - [`ErrorSource`]：宿主运行时的错误通知渠道，按环境各自实现

use crate::lifecycle::ScopeObject;
use crate::native::NativeError;
use crate::service::FriendlyErrors;
use easel_diagnostics::Tone;
use std::rc::Rc;
use tracing::trace;

/// 宿主库持有的报告入口
pub trait DiagnosticHooks {
    fn report_error(&self, message: &str, context: Option<&str>, tone: Option<Tone>);
    fn monitor_error(&self, error: &NativeError);
    fn check_lifecycle_functions(&self, scope: &dyn ScopeObject);
}

impl DiagnosticHooks for FriendlyErrors {
    fn report_error(&self, message: &str, context: Option<&str>, tone: Option<Tone>) {
        self.report_friendly_error(message, context, tone);
    }

    fn monitor_error(&self, error: &NativeError) {
        FriendlyErrors::monitor_error(self, error);
    }

    fn check_lifecycle_functions(&self, scope: &dyn ScopeObject) {
        self.check_defined_lifecycle_functions(scope);
    }
}

/// 什么都不做的入口，用于不带友好错误的精简构建
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentHooks;

impl DiagnosticHooks for SilentHooks {
    fn report_error(&self, _message: &str, _context: Option<&str>, _tone: Option<Tone>) {}
    fn monitor_error(&self, _error: &NativeError) {}
    fn check_lifecycle_functions(&self, _scope: &dyn ScopeObject) {}
}

/// 订阅 ID
pub type SubscriptionId = usize;

/// 错误回调
pub type ErrorCallback = Box<dyn FnMut(&NativeError)>;

/// 错误通知渠道
pub trait ErrorSource {
    /// 订阅，返回用于取消的 ID
    fn subscribe(&mut self, callback: ErrorCallback) -> SubscriptionId;
    /// 取消订阅，ID 不存在时返回 `false`
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// 进程内的错误渠道：宿主调用 [`ErrorChannel::dispatch`] 转发每个未捕获错误
#[derive(Default)]
pub struct ErrorChannel {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, ErrorCallback)>,
}

impl ErrorChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按订阅顺序通知所有订阅者
    pub fn dispatch(&mut self, error: &NativeError) {
        trace!(subscribers = self.subscribers.len(), %error, "dispatching error");
        for (_, callback) in &mut self.subscribers {
            callback(error);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl ErrorSource for ErrorChannel {
    fn subscribe(&mut self, callback: ErrorCallback) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}

/// 把拼写纠正接到错误渠道上
pub fn attach_monitor(service: &Rc<FriendlyErrors>, source: &mut dyn ErrorSource) -> SubscriptionId {
    let service = Rc::clone(service);
    source.subscribe(Box::new(move |error| {
        service.monitor_error(error);
    }))
}

/// 把顶层误用检测接到错误渠道上（通常只在 `setup()` 之前挂载）
pub fn attach_misuse_detector(
    service: &Rc<FriendlyErrors>,
    source: &mut dyn ErrorSource,
) -> SubscriptionId {
    let service = Rc::clone(service);
    source.subscribe(Box::new(move |error| {
        service.detect_top_level_misuse(error, None);
    }))
}
