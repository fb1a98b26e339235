//! `MailBackend` implementations.

pub mod fake;
pub mod imap;

pub use self::fake::FakeBackend;
pub use self::imap::{ImapBackend, ImapSettings};
