use std::time::{Duration, Instant};

use crate::controller::Timer;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub severity: Severity,
}

/// Holds at most one toast. A new one replaces the old immediately.
#[derive(Debug)]
pub struct ToastController {
    current: Option<Toast>,
    timer: Timer,
    duration: Duration,
}

impl ToastController {
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            current: None,
            timer: Timer::new(),
            duration,
        }
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity, now: Instant) {
        let toast = Toast {
            text: text.into(),
            severity,
        };
        tracing::debug!("Toast ({:?}): {}", toast.severity, toast.text);
        self.current = Some(toast);
        self.timer.schedule(now, self.duration);
    }

    pub fn success(&mut self, text: impl Into<String>, now: Instant) {
        self.show(text, Severity::Success, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.show(text, Severity::Error, now);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
        self.timer.cancel();
    }

    pub fn tick(&mut self, now: Instant) {
        if self.timer.fire(now) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

impl Default for ToastController {
    fn default() -> Self {
        Self::new()
    }
}
