//! # TUI Components
//!
//! One component per screen plus the status bar. Each is a transient
//! wrapper: built every frame over state borrowed from `core::views`, so the
//! views stay free of ratatui types.
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── inbox.rs       (message list)
//! ├── reader.rs      (one message, scrolled)
//! ├── composer.rs    (To / Subject / Body form)
//! └── status_bar.rs  (notice, banner or key hints)
//! ```

pub mod composer;
pub mod inbox;
pub mod reader;
pub mod status_bar;

pub use composer::ComposerForm;
pub use inbox::InboxList;
pub use reader::ReaderPane;
pub use status_bar::StatusBar;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner glyph for an ever-increasing frame counter.
pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
