//! # Inbox View State
//!
//! ```text
//! Idle ──ShowList──▶ Loading ──ListLoaded(Ok)──▶ Ready { items, cursor: 0 }
//!                       │
//!                       └──ListLoaded(Err)──▶ Error(text)
//! ```
//!
//! Every `ShowList` starts a fresh load and bumps the generation, so a slow
//! earlier load can never overwrite a newer one. Items are replaced wholesale,
//! never merged.

use log::{debug, warn};

use crate::core::action::{Action, Key};
use crate::core::effect::{Command, Effect};
use crate::mail::{MessageSummary, sort_newest_first};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InboxStatus {
    #[default]
    Idle,
    Loading,
    Ready {
        items: Vec<MessageSummary>,
        cursor: usize,
    },
    Error(String),
}

#[derive(Debug, Default)]
pub struct InboxView {
    status: InboxStatus,
    generation: u64,
}

impl InboxView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &InboxStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, InboxStatus::Loading)
    }

    /// The highlighted summary, if the list is ready and non-empty.
    pub fn selected(&self) -> Option<&MessageSummary> {
        match &self.status {
            InboxStatus::Ready { items, cursor } => items.get(*cursor),
            _ => None,
        }
    }

    pub fn update(&mut self, action: &Action) -> Vec<Effect> {
        match action {
            Action::ShowList => {
                self.generation += 1;
                self.status = InboxStatus::Loading;
                vec![Effect::Run(Command::LoadInbox {
                    generation: self.generation,
                })]
            }
            Action::ListLoaded { generation, result } => {
                if *generation != self.generation {
                    debug!(
                        "Discarding stale inbox load (generation {}, current {})",
                        generation, self.generation
                    );
                    return Vec::new();
                }
                self.status = match result {
                    Ok(items) => {
                        let mut items = items.clone();
                        sort_newest_first(&mut items);
                        InboxStatus::Ready { items, cursor: 0 }
                    }
                    Err(e) => {
                        warn!("Inbox load failed: {}", e);
                        InboxStatus::Error(e.to_string())
                    }
                };
                Vec::new()
            }
            Action::Key(key) => self.handle_key(*key),
            _ => Vec::new(),
        }
    }

    fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Char('c') => vec![Effect::emit(Action::ShowComposer)],
            Key::Char('r') => vec![Effect::emit(Action::ShowList)],
            Key::Enter => self
                .selected()
                .map(|summary| vec![Effect::emit(Action::ShowReader(summary.id.clone()))])
                .unwrap_or_default(),
            Key::Up | Key::Char('k') => {
                self.move_cursor(|cursor, _| cursor.saturating_sub(1));
                Vec::new()
            }
            Key::Down | Key::Char('j') => {
                self.move_cursor(|cursor, last| (cursor + 1).min(last));
                Vec::new()
            }
            Key::Home => {
                self.move_cursor(|_, _| 0);
                Vec::new()
            }
            Key::End => {
                self.move_cursor(|_, last| last);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Move the cursor with `f(cursor, last_index)`; no-op unless ready with items.
    fn move_cursor(&mut self, f: impl FnOnce(usize, usize) -> usize) {
        if let InboxStatus::Ready { items, cursor } = &mut self.status
            && !items.is_empty()
        {
            *cursor = f(*cursor, items.len() - 1);
        }
    }
}
