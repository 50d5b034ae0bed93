//! 状态上报
//!
//! 每个阶段切换时输出一行状态，对应交互界面上的状态栏

use std::sync::Mutex;

use tracing::info;

/// 状态上报接口
pub trait StatusReporter {
    fn report(&self, message: &str);
}

/// 写入日志的状态上报
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&self, message: &str) {
        info!("📣 {}", message);
    }
}

impl<F> StatusReporter for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// 记录全部状态消息，最后一条即当前状态
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_reporter() {
        let seen = RefCell::new(Vec::new());
        let reporter = |msg: &str| seen.borrow_mut().push(msg.to_string());
        reporter.report("正在打开第 1 页...");
        assert_eq!(seen.borrow().as_slice(), ["正在打开第 1 页..."]);
    }

    #[test]
    fn test_recording_reporter_keeps_order() {
        let reporter = RecordingReporter::new();
        reporter.report("a");
        reporter.report("b");
        assert_eq!(reporter.messages(), vec!["a", "b"]);
        assert_eq!(reporter.last().as_deref(), Some("b"));
    }
}
