//! # StatusBar Component
//!
//! Bottom line of the screen. Shows, in priority order:
//!
//! 1. **Notice**: the router's one-line notification (send results etc.)
//! 2. **Banner**: the reader's non-fatal error, while the reader is open
//! 3. **Key hints** for the active view
//!
//! A spinner is prefixed while any view is waiting on the backend.
//!
//! Purely presentational: every field is a prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::action::ViewName;
use crate::core::effect::Notice;
use crate::tui::component::Component;
use crate::tui::components::spinner;
use crate::tui::theme::Theme;

pub struct StatusBar<'a> {
    pub active: ViewName,
    pub notice: Option<&'a Notice>,
    pub banner: Option<&'a str>,
    pub busy: bool,
    pub spinner_frame: usize,
    pub theme: &'a Theme,
}

fn hints(view: ViewName) -> &'static str {
    match view {
        ViewName::List => "↑/↓ move  Enter open  c compose  r refresh  Ctrl+C quit",
        ViewName::Reader => "↑/↓ scroll  PgUp/PgDn page  Esc back  Ctrl+C quit",
        ViewName::Composer => "Tab next field  Enter send (on Send)  Esc cancel  Ctrl+C quit",
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if self.busy {
            spans.push(Span::styled(
                format!("{} ", spinner(self.spinner_frame)),
                self.theme.accent(),
            ));
        }

        let banner = self.banner.filter(|_| self.active == ViewName::Reader);
        match (self.notice, banner) {
            (Some(notice), _) => {
                spans.push(Span::styled(notice.text.clone(), self.theme.notice(notice.level)));
            }
            (None, Some(banner)) => spans.push(Span::styled(banner.to_string(), self.theme.warning())),
            (None, None) => spans.push(Span::styled(hints(self.active), self.theme.dim())),
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
