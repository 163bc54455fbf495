//! Transient notifications shown over the UI
//!
//! Notifications expire after [`AUTO_DISMISS_AFTER`]; at most
//! [`MAX_NOTIFICATIONS`] are retained, oldest dropped first.

use std::time::{Duration, Instant};

use super::commands::NotificationLevel;

pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);
pub const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: usize,
    pub created: Instant,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    /// `None` keeps the notification until dismissed
    pub expires_after: Option<Duration>,
}

impl Notification {
    fn is_live_at(&self, now: Instant) -> bool {
        match self.expires_after {
            Some(ttl) => now.saturating_duration_since(self.created) < ttl,
            None => true,
        }
    }
}

#[derive(Debug)]
pub struct NotificationManager {
    notifications: Vec<Notification>,
    next_id: usize,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            next_id: 0,
        }
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Error, title, message)
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Success, title, message)
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Warning, title, message)
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Info, title, message)
    }

    pub fn push(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> usize {
        self.push_at(level, title.into(), message.into(), Instant::now())
    }

    fn push_at(
        &mut self,
        level: NotificationLevel,
        title: String,
        message: String,
        created: Instant,
    ) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        self.notifications.push(Notification {
            id,
            created,
            level,
            title,
            message,
            expires_after: Some(AUTO_DISMISS_AFTER),
        });

        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }

        id
    }

    pub fn dismiss(&mut self, id: usize) {
        self.notifications.retain(|n| n.id != id);
    }

    /// Live notifications, newest last
    pub fn active(&self) -> Vec<&Notification> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&self, now: Instant) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.is_live_at(now))
            .collect()
    }

    pub fn cleanup_expired(&mut self) {
        let now = Instant::now();
        self.notifications.retain(|n| n.is_live_at(now));
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
