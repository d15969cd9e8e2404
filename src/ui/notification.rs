//! User-facing notifications
//!
//! A notification is a small modal with an icon, a message and a single
//! confirm button. Notifications are queued: the host shows the front of the
//! queue and calls [`NotificationQueue::dismiss`] when the user confirms, so a
//! burst of notifications is always seen in the order it was raised.

use crate::constants::{CONFIRM_BUTTON_COLOR, CONFIRM_BUTTON_TEXT};
use std::collections::VecDeque;

/// The full modal icon set; the dashboard itself raises only `Success` and `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationIcon {
    Success,
    Error,
    Warning,
    Info,
    Question,
}

impl NotificationIcon {
    /// Display colour as RGB
    pub fn color(&self) -> [u8; 3] {
        match self {
            NotificationIcon::Success => [40, 174, 96],
            NotificationIcon::Error => [231, 76, 60],
            NotificationIcon::Warning => [243, 156, 18],
            NotificationIcon::Info => [52, 152, 219],
            NotificationIcon::Question => [135, 173, 189],
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NotificationIcon::Success => "✔",
            NotificationIcon::Error => "✖",
            NotificationIcon::Warning => "⚠",
            NotificationIcon::Info => "ℹ",
            NotificationIcon::Question => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub icon: NotificationIcon,
    pub message: String,
    pub confirm_text: &'static str,
    /// Hex colour of the confirm button
    pub confirm_color: &'static str,
}

/// FIFO of notifications waiting for the user
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification; it resolves once the user dismisses it
    pub fn display(&mut self, icon: NotificationIcon, message: impl Into<String>) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let notification = Notification {
            id,
            icon,
            message: message.into(),
            confirm_text: CONFIRM_BUTTON_TEXT,
            confirm_color: CONFIRM_BUTTON_COLOR,
        };
        log::debug!("notification {:?}: {}", icon, notification.message);
        self.pending.push_back(notification);
        id
    }

    /// The notification currently on screen
    pub fn current(&self) -> Option<&Notification> {
        self.pending.front()
    }

    /// The user confirmed the current notification
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    /// Whether the notification returned by `display` is still waiting
    pub fn is_pending(&self, id: NotificationId) -> bool {
        self.pending.iter().any(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }
}
