//! # Inbox Component
//!
//! Renders `InboxView` as a two-line-per-message list:
//!
//! ```text
//! >● Subject of the newest message
//!     alice@example.com (2024-05-01 12:00)
//!   ● Older message
//!     bob@example.com (2024-05-01 11:00)
//! ```
//!
//! `>` marks the cursor, `●` marks unread mail. Transient wrapper: built each
//! frame over borrowed view state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::core::views::{InboxStatus, InboxView};
use crate::mail::MessageSummary;
use crate::tui::component::Component;
use crate::tui::components::spinner;
use crate::tui::theme::Theme;

pub struct InboxList<'a> {
    view: &'a InboxView,
    theme: &'a Theme,
    spinner_frame: usize,
}

impl<'a> InboxList<'a> {
    pub fn new(view: &'a InboxView, theme: &'a Theme, spinner_frame: usize) -> Self {
        Self {
            view,
            theme,
            spinner_frame,
        }
    }

    fn item(&self, summary: &MessageSummary, selected: bool) -> ListItem<'static> {
        let marker = if selected { ">" } else { " " };
        let unread = if summary.is_read { " " } else { "●" };

        let base = match (selected, summary.is_read) {
            (true, _) => self.theme.selected(),
            (false, false) => self.theme.unread(),
            (false, true) => self.theme.dim(),
        };

        let first = Line::from(vec![
            Span::styled(format!("{marker}{unread} "), base),
            Span::styled(summary.subject.clone(), base.add_modifier(Modifier::BOLD)),
        ]);
        let second = Line::from(Span::styled(
            format!(
                "    {} ({})",
                summary.from,
                summary.sent_at.format("%Y-%m-%d %H:%M")
            ),
            base.remove_modifier(Modifier::BOLD),
        ));
        ListItem::new(vec![first, second])
    }
}

impl Component for InboxList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.view.status() {
            InboxStatus::Idle | InboxStatus::Loading => {
                let text = format!("{} Loading inbox…", spinner(self.spinner_frame));
                frame.render_widget(
                    Paragraph::new(text)
                        .style(self.theme.accent())
                        .alignment(Alignment::Center),
                    area,
                );
            }
            InboxStatus::Error(error) => {
                let lines = vec![
                    Line::styled(format!("Failed to load inbox: {error}"), self.theme.error()),
                    Line::default(),
                    Line::styled("Press r to retry", self.theme.dim()),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    area,
                );
            }
            InboxStatus::Ready { items, .. } if items.is_empty() => {
                frame.render_widget(
                    Paragraph::new("Inbox is empty.")
                        .style(self.theme.dim())
                        .alignment(Alignment::Center),
                    area,
                );
            }
            InboxStatus::Ready { items, cursor } => {
                let list_items: Vec<ListItem> = items
                    .iter()
                    .enumerate()
                    .map(|(i, summary)| self.item(summary, i == *cursor))
                    .collect();
                let mut state = ListState::default().with_selected(Some(*cursor));
                frame.render_stateful_widget(List::new(list_items), area, &mut state);
            }
        }
    }
}
