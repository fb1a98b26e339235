//! # Mail Access
//!
//! The backend capability every view talks to, plus its implementations.
//!
//! - [`backend`]: the `MailBackend` trait and `BackendError`
//! - [`types`]: message ids, summaries, full messages, drafts
//! - [`backends`]: in-memory and IMAP implementations

pub mod backend;
pub mod backends;
pub mod types;

pub use backend::{BackendError, MailBackend};
pub use backends::{FakeBackend, ImapBackend, ImapSettings};
pub use types::{Message, MessageId, MessageSummary, OutgoingMessage, sort_newest_first};
