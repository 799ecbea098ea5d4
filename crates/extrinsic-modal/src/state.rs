//! Host UI state. Modal state itself lives in the controllers.

/// Which modal produced an event log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSlot {
    Uncontrolled,
    Controlled,
}

impl ModalSlot {
    pub fn label(self) -> &'static str {
        match self {
            ModalSlot::Uncontrolled => "uncontrolled",
            ModalSlot::Controlled => "controlled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub slot: ModalSlot,
    pub text: String,
}

pub const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone)]
pub struct HostState {
    /// Visibility the parent hands to the controlled modal.
    pub parent_open: bool,
    pub remark: String,
    pub event_log: Vec<LogLine>,
    pub last_hash: Option<String>,
    pub last_error: Option<String>,
    pub last_info: Option<String>,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            parent_open: false,
            remark: "hello".to_owned(),
            event_log: Vec::new(),
            last_hash: None,
            last_error: None,
            last_info: None,
        }
    }
}

impl HostState {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_info = None;
        self.last_error = Some(message.into());
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.last_error = None;
        self.last_info = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.last_error = None;
        self.last_info = None;
    }

    /// Appends to the event log, dropping the oldest lines past the cap.
    pub fn log(&mut self, slot: ModalSlot, text: impl Into<String>) {
        self.event_log.push(LogLine {
            slot,
            text: text.into(),
        });
        if self.event_log.len() > MAX_LOG_LINES {
            let excess = self.event_log.len() - MAX_LOG_LINES;
            self.event_log.drain(..excess);
        }
    }

    /// Remark text as hex, the way `system.remark` expects it.
    pub fn remark_hex(&self) -> String {
        format!("0x{}", hex::encode(self.remark.as_bytes()))
    }
}
