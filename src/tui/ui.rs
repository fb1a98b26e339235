use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::action::ViewName;
use crate::core::router::Router;
use crate::tui::component::Component;
use crate::tui::components::{ComposerForm, InboxList, ReaderPane, StatusBar};
use crate::tui::theme::Theme;

pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Below this no view can be laid out; a placeholder is drawn instead.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 6;

pub fn draw_ui(frame: &mut Frame, router: &Router, theme: &Theme, spinner_frame: usize) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let placeholder = Paragraph::new(format!(
            "Terminal too small ({}x{}), need {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        ))
        .style(theme.error())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    use Constraint::{Length, Min};
    let [main_area, status_area] =
        Layout::vertical([Min(0), Length(STATUS_BAR_HEIGHT)]).areas(area);

    match router.active() {
        ViewName::List => {
            InboxList::new(&router.inbox, theme, spinner_frame).render(frame, main_area)
        }
        ViewName::Reader => {
            ReaderPane::new(&router.reader, theme, spinner_frame).render(frame, main_area)
        }
        ViewName::Composer => ComposerForm::new(&router.composer, theme).render(frame, main_area),
    }

    StatusBar {
        active: router.active(),
        notice: router.notice(),
        banner: router.reader.banner(),
        busy: router.is_busy(),
        spinner_frame,
        theme,
    }
    .render(frame, status_area);
}
