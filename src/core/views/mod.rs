//! The three screens as plain state machines.
//!
//! Each view folds `Action`s into its own state through `update` and returns
//! the `Effect`s it wants performed. Rendering lives in `tui::components`.

pub mod composer;
pub mod inbox;
pub mod reader;
pub mod text_field;

pub use composer::{ComposerView, Focus};
pub use inbox::{InboxStatus, InboxView};
pub use reader::{ReaderStatus, ReaderView};
pub use text_field::TextField;
