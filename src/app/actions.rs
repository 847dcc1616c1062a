//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns `Action`s and the plugin
//! shim in `main.rs` executes them in order: web requests, timers, and
//! pane control.

use super::notification::Notification;
use crate::api::ApiRequest;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP request through the host.
    ///
    /// The request's context map must be passed along so the result event can
    /// be matched back to it.
    SendRequest(ApiRequest),

    /// Starts a host timer; its expiry comes back as a debounce event.
    ScheduleTimer {
        delay: Duration,
    },

    /// Delivers a notification to the sink.
    Notify(Notification),
}
