// SPDX-License-Identifier: MPL-2.0
//! Which toasts are on screen, which wait their turn, and when they leave.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;
use std::time::Instant;

const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
}

/// Toast stack: at most [`MAX_VISIBLE`] on screen, the rest queued in
/// arrival order. A toast's lifetime only starts counting once it is shown.
#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first.
    shown: VecDeque<Notification>,
    waiting: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }

    fn push_at(&mut self, mut notification: Notification, now: Instant) {
        if notification.severity() == Severity::Error {
            tracing::debug!(key = notification.message_key(), "error toast raised");
        }
        if self.shown.len() < MAX_VISIBLE {
            notification.mark_shown(now);
            self.shown.push_front(notification);
        } else {
            self.waiting.push_back(notification);
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => self.dismiss_at(*id, Instant::now()),
        }
    }

    fn dismiss_at(&mut self, id: NotificationId, now: Instant) {
        self.shown.retain(|n| n.id() != id);
        self.waiting.retain(|n| n.id() != id);
        self.refill(now);
    }

    /// Drops expired toasts and lets queued ones take their place.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.shown.retain(|n| !n.is_expired_at(now));
        self.refill(now);
    }

    /// Drops every toast, shown or queued, raised with `key`.
    ///
    /// After a successful login the earlier auth failures are no longer
    /// relevant.
    pub fn clear_key(&mut self, key: &str) {
        self.shown.retain(|n| n.message_key() != key);
        self.waiting.retain(|n| n.message_key() != key);
        self.refill(Instant::now());
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.shown.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.shown.len()
    }

    /// Whether the expiry tick needs to run.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.shown.is_empty() || !self.waiting.is_empty()
    }

    fn refill(&mut self, now: Instant) {
        while self.shown.len() < MAX_VISIBLE {
            let Some(mut notification) = self.waiting.pop_front() else {
                break;
            };
            notification.mark_shown(now);
            self.shown.push_back(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn keys(manager: &Manager) -> Vec<&str> {
        manager.visible().map(Notification::message_key).collect()
    }

    #[test]
    fn empty_manager_needs_no_tick() {
        assert!(!Manager::new().has_notifications());
    }

    #[test]
    fn overflow_is_queued_until_a_slot_frees() {
        let mut manager = Manager::new();
        let first = Notification::error("first");
        let first_id = first.id();
        manager.push(first);
        manager.push(Notification::error("second"));
        manager.push(Notification::error("third"));
        manager.push(Notification::error("fourth"));

        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.waiting.len(), 1);

        manager.handle_message(&Message::Dismiss(first_id));

        assert_eq!(keys(&manager), ["third", "second", "fourth"]);
        assert!(manager.waiting.is_empty());
    }

    #[test]
    fn queued_toast_can_be_dismissed_before_it_shows() {
        let mut manager = Manager::new();
        for key in ["a", "b", "c"] {
            manager.push(Notification::error(key));
        }
        let queued = Notification::info("queued");
        let queued_id = queued.id();
        manager.push(queued);

        manager.handle_message(&Message::Dismiss(queued_id));

        assert!(manager.waiting.is_empty());
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
    }

    #[test]
    fn tick_expires_success_but_keeps_errors() {
        let start = Instant::now();
        let mut manager = Manager::new();
        manager.push(Notification::success("done"));
        manager.push(Notification::error("failed"));

        manager.tick_at(start + Duration::from_secs(4));

        assert_eq!(keys(&manager), ["failed"]);
    }

    #[test]
    fn queued_toast_gets_its_full_time_once_promoted() {
        let start = Instant::now();
        let mut manager = Manager::new();
        let blocker = Notification::error("blocker");
        let blocker_id = blocker.id();
        manager.push(blocker);
        manager.push(Notification::error("b"));
        manager.push(Notification::error("c"));
        manager.push(Notification::success("late"));

        // Long after its lifetime, still waiting and unseen
        manager.tick_at(start + Duration::from_secs(10));
        assert_eq!(manager.waiting.len(), 1);

        manager.dismiss_at(blocker_id, start + Duration::from_secs(10));
        manager.tick_at(start + Duration::from_secs(12));
        assert!(keys(&manager).contains(&"late"));

        manager.tick_at(start + Duration::from_secs(13));
        assert!(!keys(&manager).contains(&"late"));
    }

    #[test]
    fn clear_key_removes_matching_and_promotes_queue() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-error-auth"));
        manager.push(Notification::error("notification-error-auth"));
        manager.push(Notification::error("notification-error-network"));
        manager.push(Notification::success("queued"));

        manager.clear_key("notification-error-auth");

        assert_eq!(keys(&manager), ["notification-error-network", "queued"]);
        assert!(manager.waiting.is_empty());
    }
}
