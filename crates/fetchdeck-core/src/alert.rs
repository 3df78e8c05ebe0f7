use std::collections::HashMap;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Structured notification payload handed to the presentation layer.
///
/// `detail` is an ordered list of label/value rows; validation failures use
/// it for their per-field table.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: Option<String>,
    pub message: String,
    pub detail: Vec<(String, String)>,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: None,
            message: message.into(),
            detail: Vec::new(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: Some(title.into()),
            message: message.into(),
            detail: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: Vec<(String, String)>) -> Self {
        self.detail = detail;
        self
    }
}

/// Where classified failures (and success confirmations) are surfaced.
///
/// The client guarantees exactly one `notify` per failing call, except for a
/// 401, which fires `unauthorized` instead - the hook behind the login
/// redirect - with no notification.
pub trait AlertSink: Send + Sync {
    fn notify(&self, alert: Alert);
    fn unauthorized(&self);
}

/// Per-call-site overrides for the default title/message of the user-facing
/// client-error statuses (400, 403, 404, 409, 500).
#[derive(Debug, Clone, Default)]
pub struct AlertOverride {
    titles: HashMap<u16, String>,
    messages: HashMap<u16, String>,
}

impl AlertOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, status: u16, title: impl Into<String>) -> Self {
        self.titles.insert(status, title.into());
        self
    }

    pub fn message(mut self, status: u16, message: impl Into<String>) -> Self {
        self.messages.insert(status, message.into());
        self
    }

    pub(crate) fn title_for(&self, status: u16) -> Option<&str> {
        self.titles.get(&status).map(String::as_str)
    }

    pub(crate) fn message_for(&self, status: u16) -> Option<&str> {
        self.messages.get(&status).map(String::as_str)
    }
}
