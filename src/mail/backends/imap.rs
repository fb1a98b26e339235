//! IMAP backend.
//!
//! Holds one logged-in session with the configured mailbox selected. The
//! `imap` crate is blocking, so every call hops onto tokio's blocking pool
//! and takes the session mutex there; concurrent commands simply queue on
//! the lock. Ids are message sequence numbers.
//!
//! Sending is not implemented: `send_message` logs the draft and succeeds.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use imap::types::{Fetch, Flag};
use log::{debug, info, warn};

use crate::mail::backend::{BackendError, MailBackend};
use crate::mail::types::{Message, MessageId, MessageSummary, OutgoingMessage};

/// Connection parameters, resolved from config/env/CLI.
#[derive(Debug, Clone)]
pub struct ImapSettings {
    /// `host:port`
    pub address: String,
    pub username: String,
    pub password: String,
    pub mailbox: String,
    pub tls: bool,
    /// Socket connect/read/write deadline.
    pub timeout: Duration,
}

/// Either a plain or a TLS stream; the session doesn't care which.
trait ImapStream: Read + Write + Send {}
impl<T: Read + Write + Send> ImapStream for T {}

type Session = imap::Session<Box<dyn ImapStream>>;

pub struct ImapBackend {
    session: Arc<Mutex<Session>>,
    mailbox: String,
}

impl ImapBackend {
    /// Connect, log in and select the mailbox. Any failure here is fatal to
    /// startup, so it is reported rather than retried.
    pub fn connect(settings: &ImapSettings) -> Result<Self, BackendError> {
        let stream = open_stream(settings)?;
        let mut client = imap::Client::new(stream);
        client.read_greeting().map_err(transport)?;

        let mut session = client
            .login(&settings.username, &settings.password)
            .map_err(|(e, _)| BackendError::Transport(format!("login failed: {e}")))?;
        session.select(&settings.mailbox).map_err(transport)?;
        info!(
            "IMAP session open: {}@{} ({})",
            settings.username, settings.address, settings.mailbox
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            mailbox: settings.mailbox.clone(),
        })
    }

    /// Run `f` against the session on the blocking pool.
    async fn with_session<T, F>(&self, f: F) -> Result<T, BackendError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Session, &str) -> Result<T, BackendError> + Send + 'static,
    {
        let session = self.session.clone();
        let mailbox = self.mailbox.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = session
                .lock()
                .map_err(|_| BackendError::Transport("IMAP session poisoned".into()))?;
            f(&mut guard, &mailbox)
        })
        .await
        .map_err(|e| BackendError::Transport(format!("IMAP task failed: {e}")))?
    }
}

impl Drop for ImapBackend {
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.lock()
            && let Err(e) = session.logout()
        {
            warn!("IMAP logout failed: {}", e);
        }
    }
}

#[async_trait]
impl MailBackend for ImapBackend {
    fn name(&self) -> &str {
        "imap"
    }

    async fn list_messages(&self) -> Result<Vec<MessageSummary>, BackendError> {
        self.with_session(|session, mailbox| {
            // Re-select to pick up new arrivals; an empty mailbox can't be fetched as 1:*.
            let selected = session.select(mailbox).map_err(transport)?;
            if selected.exists == 0 {
                return Ok(Vec::new());
            }
            let fetches = session.fetch("1:*", "(FLAGS ENVELOPE)").map_err(transport)?;
            debug!("IMAP listed {} messages", fetches.len());
            Ok(fetches.iter().map(summary_from_fetch).collect())
        })
        .await
    }

    async fn get_message(&self, id: &MessageId) -> Result<Message, BackendError> {
        let seq = sequence_number(id)?;
        let id = id.clone();
        self.with_session(move |session, _| {
            let fetches = session
                .fetch(seq.to_string(), "(FLAGS ENVELOPE BODY.PEEK[TEXT])")
                .map_err(transport)?;
            let fetch = fetches
                .iter()
                .next()
                .ok_or_else(|| BackendError::NotFound(format!("message {id}")))?;
            let body = fetch
                .text()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default();
            Ok(Message {
                summary: summary_from_fetch(fetch),
                body,
            })
        })
        .await
    }

    async fn send_message(&self, message: OutgoingMessage) -> Result<(), BackendError> {
        info!(
            "IMAP backend has no outgoing transport; dropping draft to {} ({} bytes)",
            message.to,
            message.body.len()
        );
        Ok(())
    }

    async fn mark_read(&self, id: &MessageId) -> Result<(), BackendError> {
        let seq = sequence_number(id)?;
        self.with_session(move |session, _| {
            session
                .store(seq.to_string(), "+FLAGS.SILENT (\\Seen)")
                .map_err(transport)?;
            Ok(())
        })
        .await
    }
}

fn transport(e: imap::error::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

fn open_stream(settings: &ImapSettings) -> Result<Box<dyn ImapStream>, BackendError> {
    let addr = settings
        .address
        .to_socket_addrs()
        .map_err(|e| BackendError::Transport(format!("{}: {e}", settings.address)))?
        .next()
        .ok_or_else(|| BackendError::Transport(format!("{}: no address", settings.address)))?;

    let tcp = TcpStream::connect_timeout(&addr, settings.timeout)
        .map_err(|e| BackendError::Transport(format!("connect {}: {e}", settings.address)))?;
    tcp.set_read_timeout(Some(settings.timeout))
        .and_then(|_| tcp.set_write_timeout(Some(settings.timeout)))
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    if !settings.tls {
        warn!("IMAP connection to {} is not encrypted", settings.address);
        return Ok(Box::new(tcp));
    }

    let host = host_part(&settings.address);
    let connector = native_tls::TlsConnector::new()
        .map_err(|e| BackendError::Transport(format!("TLS setup: {e}")))?;
    let tls = connector
        .connect(host, tcp)
        .map_err(|e| BackendError::Transport(format!("TLS handshake with {host}: {e}")))?;
    Ok(Box::new(tls))
}

/// `"imap.example.com:993"` → `"imap.example.com"`
fn host_part(address: &str) -> &str {
    address
        .rsplit_once(':')
        .map(|(host, _)| host)
        .unwrap_or(address)
}

fn sequence_number(id: &MessageId) -> Result<u32, BackendError> {
    id.as_str()
        .parse()
        .map_err(|_| BackendError::NotFound(format!("message {id}")))
}

fn summary_from_fetch(fetch: &Fetch) -> MessageSummary {
    let envelope = fetch.envelope();
    let text = |bytes: Option<&[u8]>| {
        bytes
            .map(|b| String::from_utf8_lossy(b).trim().to_string())
            .unwrap_or_default()
    };

    let from = envelope
        .and_then(|e| e.from.as_ref())
        .and_then(|list| list.first())
        .map(|a| format_address(a.mailbox, a.host))
        .unwrap_or_default();
    let to = envelope
        .and_then(|e| e.to.as_ref())
        .and_then(|list| list.first())
        .map(|a| format_address(a.mailbox, a.host))
        .unwrap_or_default();

    MessageSummary {
        id: MessageId::new(fetch.message.to_string()),
        from,
        to,
        subject: text(envelope.and_then(|e| e.subject)),
        sent_at: parse_date(&text(envelope.and_then(|e| e.date))),
        is_read: fetch.flags().iter().any(|f| matches!(f, Flag::Seen)),
    }
}

fn format_address(mailbox: Option<&[u8]>, host: Option<&[u8]>) -> String {
    fn part(bytes: Option<&[u8]>) -> String {
        bytes
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
    match host {
        Some(_) => format!("{}@{}", part(mailbox), part(host)),
        None => part(mailbox),
    }
}

/// Envelope dates are RFC 2822; unparseable dates sort last.
fn parse_date(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc2822(raw)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_host_part() {
        assert_eq!(host_part("imap.example.com:993"), "imap.example.com");
        assert_eq!(host_part("localhost"), "localhost");
    }

    #[test]
    fn test_sequence_number_rejects_non_numeric_ids() {
        assert_eq!(sequence_number(&MessageId::from("12")), Ok(12));
        assert!(matches!(
            sequence_number(&MessageId::from("abc")),
            Err(BackendError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_date() {
        let parsed = parse_date("Wed, 01 May 2024 14:00:00 +0200");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(parse_date("yesterday-ish"), DateTime::<Utc>::default());
    }

    #[test]
    fn test_format_address() {
        assert_eq!(
            format_address(Some(b"bob".as_slice()), Some(b"example.com".as_slice())),
            "bob@example.com"
        );
        assert_eq!(format_address(Some(b"undisclosed".as_slice()), None), "undisclosed");
    }

    #[test]
    fn test_connect_to_closed_port_is_transport_error() {
        let settings = ImapSettings {
            address: "127.0.0.1:1".into(),
            username: "bob".into(),
            password: "pass".into(),
            mailbox: "INBOX".into(),
            tls: false,
            timeout: Duration::from_millis(200),
        };
        assert!(matches!(
            ImapBackend::connect(&settings),
            Err(BackendError::Transport(_))
        ));
    }
}
