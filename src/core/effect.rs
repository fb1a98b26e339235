//! # Effects and Commands
//!
//! A view's `update` never performs I/O. Instead it returns `Effect`s:
//!
//! - `Effect::Run(Command)`: deferred work for the executor
//! - `Effect::Notify(Notice)`: a line for the status bar, absorbed by the router
//!
//! A `Command` describes the work and `Command::execute` is the function that
//! does it. Executing a command always resolves to exactly one `Action`, even
//! when the backend fails: the error travels inside the completion action.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use log::debug;

use crate::core::action::Action;
use crate::mail::{MailBackend, MessageId, OutgoingMessage};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the mailbox listing.
    LoadInbox { generation: u64 },
    /// Fetch one message for the reader.
    FetchMessage { id: MessageId, generation: u64 },
    /// Fire-and-forget: flag a message as read.
    MarkRead(MessageId),
    SendMessage {
        draft: OutgoingMessage,
        generation: u64,
    },
    /// Re-inject a control action (e.g. `ShowReader`) on a later cycle.
    Emit(Action),
}

impl Command {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Command::LoadInbox { .. } => "load-inbox",
            Command::FetchMessage { .. } => "fetch-message",
            Command::MarkRead(_) => "mark-read",
            Command::SendMessage { .. } => "send-message",
            Command::Emit(_) => "emit",
        }
    }

    /// Perform the work against `backend`, producing the completion action.
    pub fn execute(self, backend: Arc<dyn MailBackend>) -> BoxFuture<'static, Action> {
        async move {
            debug!("Executing {} on {}", self.label(), backend.name());
            match self {
                Command::LoadInbox { generation } => Action::ListLoaded {
                    generation,
                    result: backend.list_messages().await,
                },
                Command::FetchMessage { id, generation } => Action::MessageLoaded {
                    generation,
                    result: backend.get_message(&id).await,
                },
                Command::MarkRead(id) => {
                    let result = backend.mark_read(&id).await;
                    Action::MarkedRead { id, result }
                }
                Command::SendMessage { draft, generation } => {
                    let to = draft.to.clone();
                    Action::MessageSent {
                        generation,
                        to,
                        result: backend.send_message(draft).await,
                    }
                }
                Command::Emit(action) => action,
            }
        }
        .boxed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One-line, non-blocking notification shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Run(Command),
    Notify(Notice),
}

impl Effect {
    /// Shorthand for re-injecting a navigation action.
    pub fn emit(action: Action) -> Self {
        Effect::Run(Command::Emit(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{BackendError, FakeBackend};
    use std::time::Duration;

    fn backend() -> Arc<dyn MailBackend> {
        Arc::new(FakeBackend::new(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_load_inbox_carries_generation() {
        let action = Command::LoadInbox { generation: 7 }.execute(backend()).await;
        match action {
            Action::ListLoaded { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 4);
            }
            other => panic!("Expected ListLoaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_missing_message_still_completes() {
        let action = Command::FetchMessage {
            id: MessageId::from("missing"),
            generation: 2,
        }
        .execute(backend())
        .await;
        assert!(matches!(
            action,
            Action::MessageLoaded {
                generation: 2,
                result: Err(BackendError::NotFound(_))
            }
        ));
    }

    #[tokio::test]
    async fn test_mark_read_echoes_id() {
        let action = Command::MarkRead(MessageId::from("1")).execute(backend()).await;
        assert_eq!(
            action,
            Action::MarkedRead {
                id: MessageId::from("1"),
                result: Ok(())
            }
        );
    }

    #[tokio::test]
    async fn test_send_reports_recipient() {
        let draft = OutgoingMessage {
            to: "you@example.com".into(),
            subject: "Hi".into(),
            body: "...".into(),
        };
        let action = Command::SendMessage { draft, generation: 1 }
            .execute(backend())
            .await;
        assert_eq!(
            action,
            Action::MessageSent {
                generation: 1,
                to: "you@example.com".into(),
                result: Ok(())
            }
        );
    }

    #[tokio::test]
    async fn test_emit_returns_action_untouched() {
        let action = Command::Emit(Action::ShowComposer).execute(backend()).await;
        assert_eq!(action, Action::ShowComposer);
    }
}
