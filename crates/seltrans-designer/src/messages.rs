//! Status bar messages.

use seltrans_core::Shared;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Live feedback while dragging
    Immediate,
    Warning,
}

/// Where status text goes.
pub trait StatusSink {
    /// Replace the current message
    fn set(&mut self, level: MessageLevel, text: &str);

    /// Show a message briefly
    fn flash(&mut self, level: MessageLevel, text: &str) {
        self.set(level, text);
    }

    fn clear(&mut self);
}

/// Forwards messages to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn set(&mut self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Immediate => tracing::trace!(target: "status", "{text}"),
            MessageLevel::Warning => tracing::warn!(target: "status", "{text}"),
        }
    }

    fn clear(&mut self) {}
}

/// Keeps the current message and every flashed one.
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    current: Option<(MessageLevel, String)>,
    flashed: Vec<(MessageLevel, String)>,
}

impl StatusLog {
    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, text)| text.as_str())
    }

    pub fn flashed(&self) -> &[(MessageLevel, String)] {
        &self.flashed
    }
}

impl StatusSink for StatusLog {
    fn set(&mut self, level: MessageLevel, text: &str) {
        self.current = Some((level, text.to_string()));
    }

    fn flash(&mut self, level: MessageLevel, text: &str) {
        self.flashed.push((level, text.to_string()));
    }

    fn clear(&mut self) {
        self.current = None;
    }
}

impl<T: StatusSink> StatusSink for Shared<T> {
    fn set(&mut self, level: MessageLevel, text: &str) {
        self.borrow_mut().set(level, text)
    }

    fn flash(&mut self, level: MessageLevel, text: &str) {
        self.borrow_mut().flash(level, text)
    }

    fn clear(&mut self) {
        self.borrow_mut().clear()
    }
}
