//! # Actions
//!
//! Everything that can happen in mailtui becomes an `Action`.
//! User presses Enter? That's `Action::Key(Key::Enter)`.
//! The inbox finished loading? That's `Action::ListLoaded { .. }`.
//!
//! Views fold actions into their state and hand back effects. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + [Effect]
//! ```
//!
//! Actions are plain values: built once, read by every view they are
//! routed to, never mutated.

use crate::mail::{BackendError, Message, MessageId, MessageSummary};

/// Keyboard input, already translated from the terminal's representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Global quit.
    CtrlC,
}

/// Which of the three views is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewName {
    #[default]
    List,
    Reader,
    Composer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Input: routed to the active view only
    Key(Key),

    // Environment: broadcast
    Resize { width: u16, height: u16 },

    // Navigation: switch the active view and let it start loading
    ShowList,
    ShowReader(MessageId),
    ShowComposer,

    // Command completions: broadcast
    ListLoaded {
        generation: u64,
        result: Result<Vec<MessageSummary>, BackendError>,
    },
    MessageLoaded {
        generation: u64,
        result: Result<Message, BackendError>,
    },
    MarkedRead {
        id: MessageId,
        result: Result<(), BackendError>,
    },
    MessageSent {
        generation: u64,
        to: String,
        result: Result<(), BackendError>,
    },
}

impl Action {
    /// The view a navigation action switches to, if it is one.
    pub fn target_view(&self) -> Option<ViewName> {
        match self {
            Action::ShowList => Some(ViewName::List),
            Action::ShowReader(_) => Some(ViewName::Reader),
            Action::ShowComposer => Some(ViewName::Composer),
            _ => None,
        }
    }
}
