use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque message identifier, stable for the lifetime of one backend session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Envelope data shown in the inbox.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageSummary {
    pub id: MessageId,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

/// A full message: envelope plus body text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    #[serde(flatten)]
    pub summary: MessageSummary,
    pub body: String,
}

impl Message {
    pub fn id(&self) -> &MessageId {
        &self.summary.id
    }
}

/// Composer draft handed to the backend. Never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OutgoingMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Sorts newest first. `sort_by` is stable, so messages with equal
/// timestamps keep the order the backend returned them in.
pub fn sort_newest_first(items: &mut [MessageSummary]) {
    items.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn summary(id: &str, sent_at: DateTime<Utc>) -> MessageSummary {
        MessageSummary {
            id: MessageId::from(id),
            from: format!("{id}@example.com"),
            to: "me@example.com".into(),
            subject: format!("Subject {id}"),
            sent_at,
            is_read: false,
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut items = vec![
            summary("old", now - Duration::hours(3)),
            summary("new", now),
            summary("mid", now - Duration::hours(1)),
        ];
        sort_newest_first(&mut items);
        let ids: Vec<&str> = items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_keeps_backend_order_for_ties() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut items = vec![
            summary("a", now),
            summary("b", now - Duration::hours(1)),
            summary("c", now),
            summary("d", now),
        ];
        sort_newest_first(&mut items);
        let ids: Vec<&str> = items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_message_json_is_flat() {
        let json = r#"{
            "id": "7",
            "from": "a@example.com",
            "to": "b@example.com",
            "subject": "Hi",
            "sent_at": "2024-05-01T12:00:00Z",
            "body": "Hello there"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.id().as_str(), "7");
        assert!(!message.summary.is_read);
        assert_eq!(message.body, "Hello there");
    }
}
