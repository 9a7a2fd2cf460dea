//! Trait for user-visible notifications (flags/toasts).

use crate::fragment::Node;

/// Kind of notification (determines icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

impl NotificationKind {
    /// Marker for plain-text hosts
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "🚨",
            Self::Warning => "⚠️",
        }
    }
}

/// How a notification goes away
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CloseMode {
    /// Dismissed by the host after a short while
    #[default]
    Auto,
    /// Stays until the user closes it
    Manual,
}

/// One notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Escaped title text
    pub title: String,
    /// Body paragraphs
    pub body: Vec<Node>,
    pub close: CloseMode,
}

impl Notification {
    /// Create an auto-closing notification; `title` is escaped
    pub fn new(kind: NotificationKind, title: &str) -> Self {
        Self {
            kind,
            title: crate::fragment::escape_html(title),
            body: Vec::new(),
            close: CloseMode::Auto,
        }
    }

    /// Append a `<p>` paragraph with escaped `text`
    pub fn paragraph(mut self, text: &str) -> Self {
        self.body
            .push(crate::fragment::Element::new("p").text(text).into());
        self
    }

    pub fn body_html(&self) -> String {
        self.body.iter().map(Node::to_html).collect()
    }

    /// Unescaped body text, one line per paragraph
    pub fn body_text(&self) -> Vec<String> {
        self.body.iter().map(Node::text_content).collect()
    }
}

/// Shows notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
