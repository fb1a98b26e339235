//! In-memory mail backend.
//!
//! Seeds four messages an hour apart (or loads an inbox from a JSON fixture)
//! and sleeps for a configurable latency on every call so the loading states
//! are visible. Safe for concurrent use: the store sits behind a mutex that
//! is never held across an `.await`.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use log::{debug, info};

use crate::mail::backend::{BackendError, MailBackend};
use crate::mail::types::{Message, MessageId, MessageSummary, OutgoingMessage};

pub struct FakeBackend {
    messages: Mutex<Vec<Message>>,
    sent: Mutex<Vec<(String, OutgoingMessage)>>,
    latency: Duration,
}

impl FakeBackend {
    /// A backend seeded with the demo inbox.
    pub fn new(latency: Duration) -> Self {
        Self::with_messages(seed_messages(), latency)
    }

    pub fn with_messages(messages: Vec<Message>, latency: Duration) -> Self {
        Self {
            messages: Mutex::new(messages),
            sent: Mutex::new(Vec::new()),
            latency,
        }
    }

    /// Load the inbox from a JSON array of messages.
    pub fn from_fixture(path: &Path, latency: Duration) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let messages: Vec<Message> =
            serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        info!("Loaded {} fixture messages from {}", messages.len(), path.display());
        Ok(Self::with_messages(messages, latency))
    }

    /// Drafts accepted by `send_message`, with the id each was stored under.
    pub fn sent_messages(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn store(&self) -> Result<std::sync::MutexGuard<'_, Vec<Message>>, BackendError> {
        self.messages
            .lock()
            .map_err(|_| BackendError::Transport("fake store poisoned".into()))
    }
}

#[async_trait]
impl MailBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_messages(&self) -> Result<Vec<MessageSummary>, BackendError> {
        self.simulate_latency().await;
        let store = self.store()?;
        Ok(store.iter().map(|m| m.summary.clone()).collect())
    }

    async fn get_message(&self, id: &MessageId) -> Result<Message, BackendError> {
        self.simulate_latency().await;
        let store = self.store()?;
        store
            .iter()
            .find(|m| m.id() == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("message {id}")))
    }

    async fn send_message(&self, message: OutgoingMessage) -> Result<(), BackendError> {
        self.simulate_latency().await;
        let id = uuid::Uuid::new_v4().to_string();
        debug!("Fake send {} to {}", id, message.to);
        self.sent
            .lock()
            .map_err(|_| BackendError::Transport("fake outbox poisoned".into()))?
            .push((id, message));
        Ok(())
    }

    async fn mark_read(&self, id: &MessageId) -> Result<(), BackendError> {
        self.simulate_latency().await;
        let mut store = self.store()?;
        let message = store
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or_else(|| BackendError::NotFound(format!("message {id}")))?;
        message.summary.is_read = true;
        Ok(())
    }
}

/// Four unread messages sent now, one, two and three hours ago.
fn seed_messages() -> Vec<Message> {
    let now = Utc::now();
    let subjects = ["First email", "Second email", "Third email", "Fourth email"];
    subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let id = (i + 1).to_string();
            Message {
                body: format!(
                    "To whom it may concern,\n\nThis is a test email with ID {id}.\n\nYours sincerely,\n\nTester"
                ),
                summary: MessageSummary {
                    id: MessageId::new(id.clone()),
                    from: format!("test{id}@example.com"),
                    to: "me@example.com".to_string(),
                    subject: subject.to_string(),
                    sent_at: now - ChronoDuration::hours(i as i64),
                    is_read: false,
                },
            }
        })
        .collect()
}
