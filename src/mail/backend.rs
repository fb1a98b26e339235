use std::fmt;

use async_trait::async_trait;

use super::types::{Message, MessageId, MessageSummary, OutgoingMessage};

/// Errors a backend call can fail with.
/// Every variant is recoverable from the UI's point of view: it becomes view
/// state or a notice, never a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The referenced message does not exist in this session.
    NotFound(String),
    /// The backend does not support the operation.
    NotAvailable(String),
    /// Connection or protocol failure talking to the mail server.
    Transport(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::NotFound(msg) => write!(f, "not found: {msg}"),
            BackendError::NotAvailable(msg) => write!(f, "not available: {msg}"),
            BackendError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The mail source shared by all three views.
///
/// Implementations are invoked concurrently from independent tasks, so they
/// must be `Send + Sync` and must not assume calls are serialized.
#[async_trait]
pub trait MailBackend: Send + Sync {
    /// Returns the name of the backend (for logs and the status bar).
    fn name(&self) -> &str;

    /// Lists the mailbox. Ordering is backend-defined.
    async fn list_messages(&self) -> Result<Vec<MessageSummary>, BackendError>;

    /// Fetches one message including its body.
    async fn get_message(&self, id: &MessageId) -> Result<Message, BackendError>;

    async fn send_message(&self, message: OutgoingMessage) -> Result<(), BackendError>;

    /// Flags a message as read on the server side.
    async fn mark_read(&self, id: &MessageId) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_detail() {
        assert_eq!(
            BackendError::NotFound("message 9".into()).to_string(),
            "not found: message 9"
        );
        assert_eq!(
            BackendError::Transport("connection reset".into()).to_string(),
            "transport error: connection reset"
        );
        assert_eq!(
            BackendError::NotAvailable("send".into()).to_string(),
            "not available: send"
        );
    }
}
