//! Colours shared by every component. Built once at startup.

use std::str::FromStr;

use log::warn;
use ratatui::style::{Color, Modifier, Style};

use crate::core::effect::NoticeLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Magenta,
        }
    }
}

impl Theme {
    /// Parse an accent like `"cyan"` or `"#ff8800"`, falling back to the default.
    pub fn from_accent(accent: &str) -> Self {
        match Color::from_str(accent) {
            Ok(accent) => Self { accent },
            Err(_) => {
                warn!("Unknown accent colour '{}', using default", accent);
                Self::default()
            }
        }
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unread(&self) -> Style {
        Style::default().fg(Color::White)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn notice(&self, level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => self.accent(),
            NoticeLevel::Error => self.error().add_modifier(Modifier::BOLD),
        }
    }
}
