//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::action::Action;
use crate::core::effect::{Command, Effect};
use crate::mail::{
    BackendError, MailBackend, Message, MessageId, MessageSummary, OutgoingMessage,
};

/// Fixed "now" so rendered dates are stable.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn summary(id: &str, sent_at: DateTime<Utc>) -> MessageSummary {
    MessageSummary {
        id: MessageId::from(id),
        from: format!("{id}@example.com"),
        to: "me@example.com".to_string(),
        subject: format!("Subject {id}"),
        sent_at,
        is_read: false,
    }
}

/// `n` summaries with ids "1".."n", an hour apart, "1" newest.
pub fn hourly_summaries(n: usize) -> Vec<MessageSummary> {
    (1..=n)
        .map(|i| summary(&i.to_string(), base_time() - Duration::hours(i as i64 - 1)))
        .collect()
}

pub fn message(id: &str, body: &str) -> Message {
    Message {
        summary: summary(id, base_time()),
        body: body.to_string(),
    }
}

/// The actions a view asked to re-inject, in order.
pub fn emitted(effects: &[Effect]) -> Vec<Action> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Run(Command::Emit(action)) => Some(action.clone()),
            _ => None,
        })
        .collect()
}

/// Backend that answers every call with a canned result and records the
/// calls it saw.
pub struct ScriptedBackend {
    pub list: Result<Vec<MessageSummary>, BackendError>,
    pub message: Result<Message, BackendError>,
    pub send: Result<(), BackendError>,
    pub mark_read: Result<(), BackendError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            list: Ok(hourly_summaries(2)),
            message: Ok(message("1", "scripted body")),
            send: Ok(()),
            mark_read: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            list: Err(error.clone()),
            message: Err(error.clone()),
            send: Err(error.clone()),
            mark_read: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MailBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn list_messages(&self) -> Result<Vec<MessageSummary>, BackendError> {
        self.record("list".to_string());
        self.list.clone()
    }

    async fn get_message(&self, id: &MessageId) -> Result<Message, BackendError> {
        self.record(format!("get {id}"));
        self.message.clone()
    }

    async fn send_message(&self, message: OutgoingMessage) -> Result<(), BackendError> {
        self.record(format!("send {}", message.to));
        self.send.clone()
    }

    async fn mark_read(&self, id: &MessageId) -> Result<(), BackendError> {
        self.record(format!("mark-read {id}"));
        self.mark_read.clone()
    }
}
