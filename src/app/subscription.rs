// SPDX-License-Identifier: MPL-2.0
//! Periodic subscriptions for the application.

use super::Message;
use crate::config::NOTIFICATION_TICK_MS;
use iced::{time, Subscription};
use std::time::Duration;

/// Ticks only while toasts are up so an idle window does not wake up.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(NOTIFICATION_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
