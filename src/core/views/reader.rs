//! # Reader View State
//!
//! Shows one message. Each `ShowReader` bumps `generation`; a
//! `MessageLoaded` carrying any other generation belongs to a message the
//! user has already moved past and is dropped.
//!
//! The rendered text (`lines`) is computed here rather than at draw time so
//! scrolling can clamp against the real line count. It is only built once a
//! `Resize` has told us the viewport size.

use log::{debug, warn};

use crate::core::action::{Action, Key};
use crate::core::effect::{Command, Effect, Notice};
use crate::mail::Message;

/// Narrowest body column we will wrap to.
const MIN_WRAP_WIDTH: usize = 10;
const BODY_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReaderStatus {
    #[default]
    Empty,
    Loading,
    Ready(Message),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ReaderView {
    status: ReaderStatus,
    generation: u64,
    /// Viewport (width, height), known after the first resize.
    layout: Option<(u16, u16)>,
    /// Non-fatal problem from a fire-and-forget command (mark-read).
    banner: Option<String>,
    lines: Vec<String>,
    scroll: usize,
}

impl ReaderView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ReaderStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ReaderStatus::Loading)
    }

    /// `None` until the first resize.
    pub fn layout(&self) -> Option<(u16, u16)> {
        self.layout
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// The lines currently inside the viewport.
    pub fn visible_lines(&self) -> &[String] {
        let height = self.viewport_height();
        let start = self.scroll.min(self.lines.len());
        let end = (start + height).min(self.lines.len());
        &self.lines[start..end]
    }

    pub fn update(&mut self, action: &Action) -> Vec<Effect> {
        match action {
            Action::ShowReader(id) => {
                self.generation += 1;
                self.status = ReaderStatus::Loading;
                self.banner = None;
                self.lines.clear();
                self.scroll = 0;
                vec![Effect::Run(Command::FetchMessage {
                    id: id.clone(),
                    generation: self.generation,
                })]
            }
            Action::MessageLoaded { generation, result } => {
                if *generation != self.generation {
                    debug!(
                        "Discarding stale message load (generation {}, current {})",
                        generation, self.generation
                    );
                    return Vec::new();
                }
                match result {
                    Ok(message) => {
                        let id = message.id().clone();
                        self.status = ReaderStatus::Ready(message.clone());
                        self.reflow();
                        vec![Effect::Run(Command::MarkRead(id))]
                    }
                    Err(e) => {
                        warn!("Message load failed: {}", e);
                        self.status = ReaderStatus::Failed(e.to_string());
                        Vec::new()
                    }
                }
            }
            Action::MarkedRead { id, result } => match result {
                Ok(()) => Vec::new(),
                Err(e) => {
                    warn!("Mark-read of {} failed: {}", id, e);
                    let text = format!("Could not mark message {id} as read: {e}");
                    self.banner = Some(text.clone());
                    // The user may have left the reader by now.
                    vec![Effect::Notify(Notice::error(text))]
                }
            },
            Action::Resize { width, height } => {
                self.layout = Some((*width, *height));
                self.reflow();
                Vec::new()
            }
            Action::Key(key) => self.handle_key(*key),
            _ => Vec::new(),
        }
    }

    fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        let page = self.viewport_height().max(1);
        match key {
            Key::Esc | Key::Char('q') | Key::Backspace => {
                return vec![Effect::emit(Action::ShowList)];
            }
            Key::Up | Key::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            Key::Down | Key::Char('j') => self.scroll += 1,
            Key::PageUp => self.scroll = self.scroll.saturating_sub(page),
            Key::PageDown => self.scroll += page,
            Key::Home => self.scroll = 0,
            Key::End => self.scroll = usize::MAX,
            _ => {}
        }
        self.clamp_scroll();
        Vec::new()
    }

    fn viewport_height(&self) -> usize {
        self.layout.map(|(_, h)| h as usize).unwrap_or(0)
    }

    /// Keep the last page full: never scroll past `lines - height`.
    fn clamp_scroll(&mut self) {
        let max = self.lines.len().saturating_sub(self.viewport_height());
        self.scroll = self.scroll.min(max);
    }

    fn reflow(&mut self) {
        self.lines = match (&self.status, self.layout) {
            (ReaderStatus::Ready(message), Some((width, _))) => render_message(message, width),
            _ => Vec::new(),
        };
        self.clamp_scroll();
    }
}

/// Header block, a blank line, then the body wrapped to `width - 2` and
/// indented two columns.
pub fn render_message(message: &Message, width: u16) -> Vec<String> {
    let summary = &message.summary;
    let mut lines = vec![
        format!("From: {}", summary.from),
        format!("To: {}", summary.to),
        format!("Sent: {}", summary.sent_at.format("%a, %d %b %Y %H:%M UTC")),
        format!("Subject: {}", summary.subject),
        String::new(),
    ];

    let wrap_width = (width as usize).saturating_sub(BODY_INDENT.len()).max(MIN_WRAP_WIDTH);
    let options = textwrap::Options::new(wrap_width)
        .initial_indent(BODY_INDENT)
        .subsequent_indent(BODY_INDENT);
    for paragraph in message.body.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(paragraph, &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{BackendError, MessageId};
    use crate::test_support::{emitted, message};

    fn sized(width: u16, height: u16) -> ReaderView {
        let mut view = ReaderView::new();
        view.update(&Action::Resize { width, height });
        view
    }

    fn open(view: &mut ReaderView, id: &str) -> Vec<Effect> {
        view.update(&Action::ShowReader(MessageId::from(id)))
    }

    #[test]
    fn test_show_reader_fetches_with_new_generation() {
        let mut view = sized(80, 20);
        let effects = open(&mut view, "7");
        assert!(view.is_loading());
        assert_eq!(
            effects,
            vec![Effect::Run(Command::FetchMessage {
                id: MessageId::from("7"),
                generation: 1
            })]
        );
    }

    #[test]
    fn test_loaded_message_is_marked_read() {
        let mut view = sized(80, 20);
        open(&mut view, "7");
        let effects = view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("7", "Hello there")),
        });
        assert!(matches!(view.status(), ReaderStatus::Ready(_)));
        assert_eq!(
            effects,
            vec![Effect::Run(Command::MarkRead(MessageId::from("7")))]
        );
    }

    #[test]
    fn test_stale_message_is_discarded() {
        let mut view = sized(80, 20);
        open(&mut view, "A");
        open(&mut view, "B");
        view.update(&Action::MessageLoaded {
            generation: 2,
            result: Ok(message("B", "body of B")),
        });
        let effects = view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("A", "body of A")),
        });
        assert!(effects.is_empty());
        match view.status() {
            ReaderStatus::Ready(m) => assert_eq!(m.id(), &MessageId::from("B")),
            other => panic!("Expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_error_is_discarded_while_loading() {
        let mut view = sized(80, 20);
        open(&mut view, "A");
        open(&mut view, "B");
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Err(BackendError::NotFound("message A".into())),
        });
        assert!(view.is_loading());
    }

    #[test]
    fn test_fetch_failure_shows_error() {
        let mut view = sized(80, 20);
        open(&mut view, "9");
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Err(BackendError::NotFound("message 9".into())),
        });
        assert_eq!(
            view.status(),
            &ReaderStatus::Failed("not found: message 9".into())
        );
    }

    #[test]
    fn test_mark_read_failure_sets_banner_and_notifies() {
        let mut view = sized(80, 20);
        open(&mut view, "1");
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("1", "hi")),
        });
        let effects = view.update(&Action::MarkedRead {
            id: MessageId::from("1"),
            result: Err(BackendError::Transport("timeout".into())),
        });
        assert!(matches!(view.status(), ReaderStatus::Ready(_)));
        assert_eq!(
            view.banner(),
            Some("Could not mark message 1 as read: transport error: timeout")
        );
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::error(
                "Could not mark message 1 as read: transport error: timeout"
            ))]
        );

        open(&mut view, "2");
        assert_eq!(view.banner(), None);
    }

    #[test]
    fn test_content_waits_for_layout() {
        let mut view = ReaderView::new();
        open(&mut view, "1");
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("1", "hi")),
        });
        assert!(view.lines().is_empty());

        view.update(&Action::Resize {
            width: 40,
            height: 10,
        });
        assert_eq!(view.lines()[0], "From: 1@example.com");
        assert_eq!(view.lines()[4], "");
        assert_eq!(view.lines()[5], "  hi");
    }

    #[test]
    fn test_body_wraps_and_indents() {
        let body = "one two three four five six seven eight nine ten";
        let lines = render_message(&message("1", body), 20);
        let body_lines = &lines[5..];
        assert!(body_lines.len() > 1);
        for line in body_lines {
            assert!(line.starts_with("  "));
            assert!(line.len() <= 18);
        }
    }

    #[test]
    fn test_scroll_clamps_to_last_full_page() {
        let body = (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let mut view = sized(40, 5);
        open(&mut view, "1");
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("1", &body)),
        });
        let total = view.lines().len();
        assert_eq!(total, 25);

        view.update(&Action::Key(Key::End));
        assert_eq!(view.scroll(), total - 5);
        view.update(&Action::Key(Key::Down));
        assert_eq!(view.scroll(), total - 5);
        assert_eq!(view.visible_lines().len(), 5);

        view.update(&Action::Key(Key::PageUp));
        assert_eq!(view.scroll(), total - 10);
        view.update(&Action::Key(Key::Home));
        view.update(&Action::Key(Key::Char('k')));
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_back_keys_emit_show_list() {
        let mut view = sized(80, 20);
        for key in [Key::Esc, Key::Char('q'), Key::Backspace] {
            assert_eq!(emitted(&view.update(&Action::Key(key))), vec![Action::ShowList]);
        }
    }
}
