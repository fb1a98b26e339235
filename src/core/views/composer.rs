//! # Composer View State
//!
//! Four focus targets in a fixed ring:
//!
//! ```text
//! To ─Tab─▶ Subject ─Tab─▶ Body ─Tab─▶ Submit ─Tab─▶ To
//! ```
//!
//! Enter on Submit hands the draft to a `SendMessage` command and returns to
//! the list straight away. The result comes back later as `MessageSent` and
//! is always reported through a notice, whichever view is on screen by then.
//! `pending` only tracks the most recent submit: an older completion is
//! reported but never touches composer state.

use log::{debug, info, warn};

use crate::core::action::{Action, Key};
use crate::core::effect::{Command, Effect, Notice};
use crate::core::views::text_field::TextField;
use crate::mail::OutgoingMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    To,
    Subject,
    Body,
    Submit,
}

impl Focus {
    const RING: [Focus; 4] = [Focus::To, Focus::Subject, Focus::Body, Focus::Submit];

    fn index(self) -> usize {
        Self::RING.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::RING[(self.index() + 1) % Self::RING.len()]
    }

    pub fn prev(self) -> Self {
        Self::RING[(self.index() + Self::RING.len() - 1) % Self::RING.len()]
    }
}

#[derive(Debug)]
pub struct ComposerView {
    to: TextField,
    subject: TextField,
    body: TextField,
    focus: Focus,
    generation: u64,
    /// Generation of the submit still waiting for its result.
    pending: Option<u64>,
}

impl Default for ComposerView {
    fn default() -> Self {
        Self {
            to: TextField::single_line(),
            subject: TextField::single_line(),
            body: TextField::multi_line(),
            focus: Focus::default(),
            generation: 0,
            pending: None,
        }
    }
}

impl ComposerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn to(&self) -> &TextField {
        &self.to
    }

    pub fn subject(&self) -> &TextField {
        &self.subject
    }

    pub fn body(&self) -> &TextField {
        &self.body
    }

    pub fn is_sending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn draft(&self) -> OutgoingMessage {
        OutgoingMessage {
            to: self.to.value().to_string(),
            subject: self.subject.value().to_string(),
            body: self.body.value().to_string(),
        }
    }

    pub fn update(&mut self, action: &Action) -> Vec<Effect> {
        match action {
            Action::ShowComposer => {
                self.to.clear();
                self.subject.clear();
                self.body.clear();
                self.focus = Focus::To;
                Vec::new()
            }
            Action::MessageSent {
                generation,
                to,
                result,
            } => {
                if self.pending == Some(*generation) {
                    self.pending = None;
                } else {
                    debug!(
                        "Send result for generation {} (latest {}) leaves composer untouched",
                        generation, self.generation
                    );
                }
                let notice = match result {
                    Ok(()) => {
                        info!("Message sent to {}", to);
                        Notice::info(format!("Message sent to {to}"))
                    }
                    Err(e) => {
                        warn!("Send to {} failed: {}", to, e);
                        Notice::error(format!("Failed to send message to {to}: {e}"))
                    }
                };
                vec![Effect::Notify(notice)]
            }
            Action::Key(key) => self.handle_key(*key),
            _ => Vec::new(),
        }
    }

    fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Tab => self.focus = self.focus.next(),
            Key::BackTab => self.focus = self.focus.prev(),
            Key::Esc => return vec![Effect::emit(Action::ShowList)],
            Key::Enter if self.focus == Focus::Submit => return self.submit(),
            key => {
                if let Some(field) = self.focused_field() {
                    field.handle_key(key);
                }
            }
        }
        Vec::new()
    }

    fn submit(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.pending = Some(self.generation);
        let draft = self.draft();
        debug!("Submitting draft to {} (generation {})", draft.to, self.generation);
        vec![
            Effect::Notify(Notice::info(format!("Sending message to {}…", draft.to))),
            Effect::Run(Command::SendMessage {
                draft,
                generation: self.generation,
            }),
            Effect::emit(Action::ShowList),
        ]
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::To => Some(&mut self.to),
            Focus::Subject => Some(&mut self.subject),
            Focus::Body => Some(&mut self.body),
            Focus::Submit => None,
        }
    }
}
