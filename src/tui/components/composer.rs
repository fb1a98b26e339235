//! # Composer Component
//!
//! ```text
//! ┌To──────────────────────┐
//! │bob@example.com         │
//! └────────────────────────┘
//! ┌Subject─────────────────┐
//! │Lunch                   │
//! └────────────────────────┘
//! ┌Body────────────────────┐
//! │Noon?                   │
//! │                        │
//! └────────────────────────┘
//!  [ Send ]
//! ```
//!
//! The focused box gets the accent border and the terminal cursor. Body text
//! is not soft-wrapped, so the cursor column is the display width of the
//! text left of it on its line; the body scrolls to keep the cursor row
//! visible.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::views::{ComposerView, Focus, TextField};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct ComposerForm<'a> {
    view: &'a ComposerView,
    theme: &'a Theme,
}

impl<'a> ComposerForm<'a> {
    pub fn new(view: &'a ComposerView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    fn field(&self, frame: &mut Frame, area: Rect, title: &str, field: &TextField, focus: Focus) {
        let focused = self.view.focus() == focus;
        let border = if focused {
            self.theme.accent()
        } else {
            self.theme.dim()
        };
        let block = Block::bordered()
            .title(title.to_string())
            .border_style(border)
            .title_style(border);
        let inner = block.inner(area);

        let (row, col) = cursor_row_col(field);
        let scroll = row.saturating_sub(inner.height.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(field.value()).block(block).scroll((scroll, 0)),
            area,
        );

        if focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + col.min(inner.width - 1);
            let y = inner.y + (row - scroll).min(inner.height - 1);
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

impl Component for ComposerForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [to_area, subject_area, body_area, submit_area] =
            Layout::vertical([Length(3), Length(3), Min(3), Length(1)]).areas(area);

        self.field(frame, to_area, "To", self.view.to(), Focus::To);
        self.field(frame, subject_area, "Subject", self.view.subject(), Focus::Subject);
        self.field(frame, body_area, "Body", self.view.body(), Focus::Body);

        let submit_style = if self.view.focus() == Focus::Submit {
            self.theme.selected().add_modifier(Modifier::REVERSED)
        } else {
            self.theme.dim()
        };
        let submit = Line::from(vec![
            Span::raw(" "),
            Span::styled("[ Send ]", submit_style),
        ]);
        frame.render_widget(Paragraph::new(submit), submit_area);
    }
}

/// Row and display column of the field's cursor.
fn cursor_row_col(field: &TextField) -> (u16, u16) {
    let before = &field.value()[..field.cursor()];
    let row = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].width();
    (
        u16::try_from(row).unwrap_or(u16::MAX),
        u16::try_from(col).unwrap_or(u16::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, Key};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(view: &mut ComposerView, text: &str) {
        for c in text.chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            view.update(&Action::Key(key));
        }
    }

    fn draw(view: &ComposerView) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| ComposerForm::new(view, &theme).render(f, f.area()))
            .unwrap();
        terminal
    }

    fn text_of(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_fields_and_submit_render() {
        let mut view = ComposerView::new();
        view.update(&Action::ShowComposer);
        type_text(&mut view, "bob@example.com");
        view.update(&Action::Key(Key::Tab));
        type_text(&mut view, "Lunch");

        let text = text_of(&draw(&view));
        assert!(text.contains("To"));
        assert!(text.contains("bob@example.com"));
        assert!(text.contains("Subject"));
        assert!(text.contains("Lunch"));
        assert!(text.contains("[ Send ]"));
    }

    #[test]
    fn test_cursor_sits_after_typed_text() {
        let mut view = ComposerView::new();
        view.update(&Action::ShowComposer);
        type_text(&mut view, "bob");
        let mut terminal = draw(&view);
        // Inside the To box: border at (0,0), text starts at (1,1)
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(4, 1));
    }

    #[test]
    fn test_cursor_row_col_counts_lines_and_width() {
        let mut field = TextField::multi_line();
        for c in "first\nsé".chars() {
            let key = if c == '\n' { Key::Enter } else { Key::Char(c) };
            field.handle_key(key);
        }
        assert_eq!(cursor_row_col(&field), (1, 2));
        field.handle_key(Key::Home);
        assert_eq!(cursor_row_col(&field), (1, 0));
    }
}
