//! Warning side channel for anomalous-but-tolerated conditions.
//!
//! Warnings never affect control flow. Each distinct message is delivered at
//! most once per channel, and a disabled channel delivers nothing.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Sink for operator-facing warnings.
pub trait Notifier: fmt::Debug + Send {
    fn notify(&self, message: &str);
}

/// Emits warnings as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "tabulog.warning", "{}", message);
    }
}

/// Collects warnings in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

/// Deduplicating, suppressible front-end for a [`Notifier`].
#[derive(Debug)]
pub struct WarningChannel {
    notifier: Box<dyn Notifier>,
    warned_once: HashSet<String>,
    disabled: bool,
}

impl WarningChannel {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            notifier,
            warned_once: HashSet::new(),
            disabled: false,
        }
    }

    /// Channel backed by [`TracingNotifier`].
    pub fn tracing() -> Self {
        Self::new(Box::new(TracingNotifier))
    }

    /// Deliver `message` unless disabled or already seen.
    ///
    /// The message is remembered even when the channel is disabled.
    /// Returns whether it was delivered.
    pub fn warn(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        let fresh = !self.warned_once.contains(&message);
        let deliver = fresh && !self.disabled;
        if deliver {
            self.notifier.notify(&message);
        }
        if fresh {
            self.warned_once.insert(message);
        }
        deliver
    }

    /// Suppress all further deliveries.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether `message` has been seen, delivered or not.
    pub fn has_warned(&self, message: &str) -> bool {
        self.warned_once.contains(message)
    }

    /// Number of distinct messages seen.
    pub fn warned_count(&self) -> usize {
        self.warned_once.len()
    }
}

impl Default for WarningChannel {
    fn default() -> Self {
        Self::tracing()
    }
}
