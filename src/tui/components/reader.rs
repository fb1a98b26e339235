//! # Reader Component
//!
//! Draws the window of `ReaderView::visible_lines()`. Wrapping and scroll
//! clamping already happened in the view; this only styles the header rows.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::views::{ReaderStatus, ReaderView};
use crate::tui::component::Component;
use crate::tui::components::spinner;
use crate::tui::theme::Theme;

/// From / To / Sent / Subject
const HEADER_LINES: usize = 4;

pub struct ReaderPane<'a> {
    view: &'a ReaderView,
    theme: &'a Theme,
    spinner_frame: usize,
}

impl<'a> ReaderPane<'a> {
    pub fn new(view: &'a ReaderView, theme: &'a Theme, spinner_frame: usize) -> Self {
        Self {
            view,
            theme,
            spinner_frame,
        }
    }
}

impl Component for ReaderPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.view.status() {
            ReaderStatus::Empty => {
                frame.render_widget(
                    Paragraph::new("No message selected.")
                        .style(self.theme.dim())
                        .alignment(Alignment::Center),
                    area,
                );
            }
            ReaderStatus::Loading => {
                let text = format!("{} Loading message…", spinner(self.spinner_frame));
                frame.render_widget(
                    Paragraph::new(text)
                        .style(self.theme.accent())
                        .alignment(Alignment::Center),
                    area,
                );
            }
            ReaderStatus::Failed(error) => {
                let lines = vec![
                    Line::styled(format!("Failed to load message: {error}"), self.theme.error()),
                    Line::default(),
                    Line::styled("Press Esc to go back", self.theme.dim()),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    area,
                );
            }
            ReaderStatus::Ready(_) if self.view.layout().is_none() => {
                frame.render_widget(
                    Paragraph::new("Loading viewer…")
                        .style(self.theme.dim())
                        .alignment(Alignment::Center),
                    area,
                );
            }
            ReaderStatus::Ready(_) => {
                let first = self.view.scroll();
                let lines: Vec<Line> = self
                    .view
                    .visible_lines()
                    .iter()
                    .enumerate()
                    .map(|(i, text)| {
                        if first + i < HEADER_LINES {
                            Line::styled(text.as_str(), self.theme.accent())
                        } else {
                            Line::raw(text.as_str())
                        }
                    })
                    .collect();
                frame.render_widget(Paragraph::new(lines), area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, Key};
    use crate::mail::MessageId;
    use crate::test_support::message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(view: &ReaderView, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| ReaderPane::new(view, &theme, 0).render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn opened(body: &str, width: u16, height: u16) -> ReaderView {
        let mut view = ReaderView::new();
        view.update(&Action::Resize { width, height });
        view.update(&Action::ShowReader(MessageId::from("1")));
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("1", body)),
        });
        view
    }

    #[test]
    fn test_header_then_indented_body() {
        let view = opened("Hello Bob", 50, 8);
        let rows = screen(&view, 50, 8);
        assert_eq!(rows[0], "From: 1@example.com");
        assert_eq!(rows[1], "To: me@example.com");
        assert_eq!(rows[2], "Sent: Wed, 01 May 2024 12:00 UTC");
        assert_eq!(rows[3], "Subject: Subject 1");
        assert_eq!(rows[4], "");
        assert_eq!(rows[5], "  Hello Bob");
    }

    #[test]
    fn test_scrolled_window() {
        let body = (1..=10).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let mut view = opened(&body, 30, 4);
        view.update(&Action::Key(Key::End));
        let rows = screen(&view, 30, 4);
        assert_eq!(rows, vec!["  line 7", "  line 8", "  line 9", "  line 10"]);
    }

    #[test]
    fn test_ready_without_layout_shows_viewer_placeholder() {
        let mut view = ReaderView::new();
        view.update(&Action::ShowReader(MessageId::from("1")));
        view.update(&Action::MessageLoaded {
            generation: 1,
            result: Ok(message("1", "Hello Bob")),
        });
        let rows = screen(&view, 40, 3);
        assert!(rows[0].contains("Loading viewer"));
        assert!(!rows.iter().any(|r| r.contains("Hello Bob")));
    }

    #[test]
    fn test_loading_placeholder() {
        let mut view = ReaderView::new();
        view.update(&Action::ShowReader(MessageId::from("1")));
        assert!(screen(&view, 40, 1)[0].contains("Loading message"));
    }
}
