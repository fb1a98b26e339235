//! # Router
//!
//! The root of the state tree. Owns the three views and decides who sees
//! each action:
//!
//! ```text
//! Key(CtrlC)        → quit (terminal, everything after is ignored)
//! Key(_)            → active view only
//! ShowList/Reader/… → set active, then the target view
//! anything else     → all three views
//! ```
//!
//! Views answer with effects. Notices are kept here for the status bar;
//! commands are handed back to the caller to execute.

use log::{debug, info};

use crate::core::action::{Action, Key, ViewName};
use crate::core::effect::{Command, Effect, Notice};
use crate::core::views::{ComposerView, InboxView, ReaderView};

#[derive(Debug, Default)]
pub struct Router {
    active: ViewName,
    pub inbox: InboxView,
    pub reader: ReaderView,
    pub composer: ComposerView,
    notice: Option<Notice>,
    quit: bool,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the list and start the first load.
    pub fn init(&mut self) -> Vec<Command> {
        self.update(Action::ShowList)
    }

    pub fn active(&self) -> ViewName {
        self.active
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether anything on screen is waiting for the backend.
    pub fn is_busy(&self) -> bool {
        self.inbox.is_loading() || self.reader.is_loading() || self.composer.is_sending()
    }

    pub fn update(&mut self, action: Action) -> Vec<Command> {
        if self.quit {
            debug!("Ignoring {:?} after quit", action);
            return Vec::new();
        }

        let effects = match &action {
            Action::Key(Key::CtrlC) => {
                info!("Quit requested");
                self.quit = true;
                return Vec::new();
            }
            Action::Key(_) => {
                self.notice = None;
                self.dispatch(self.active, &action)
            }
            _ => match action.target_view() {
                Some(view) => {
                    debug!("Switching to {:?}", view);
                    self.active = view;
                    self.dispatch(view, &action)
                }
                None => {
                    let mut effects = self.inbox.update(&action);
                    effects.extend(self.reader.update(&action));
                    effects.extend(self.composer.update(&action));
                    effects
                }
            },
        };

        self.absorb(effects)
    }

    fn dispatch(&mut self, view: ViewName, action: &Action) -> Vec<Effect> {
        match view {
            ViewName::List => self.inbox.update(action),
            ViewName::Reader => self.reader.update(action),
            ViewName::Composer => self.composer.update(action),
        }
    }

    /// Keep notices, pass commands on.
    fn absorb(&mut self, effects: Vec<Effect>) -> Vec<Command> {
        let mut commands = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::Run(command) => commands.push(command),
                Effect::Notify(notice) => self.notice = Some(notice),
            }
        }
        commands
    }
}
