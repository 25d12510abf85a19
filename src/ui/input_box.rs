use crate::app::state::TextInput;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

/// A bordered single-line field. The terminal cursor is placed inside it
/// when `focused`.
pub fn render(frame: &mut Frame, area: Rect, label: &str, value: &str, cursor: usize, focused: bool) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .title_style(if focused { Theme::title() } else { Theme::muted() })
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if focused {
        let line = Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(value, Theme::text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);

        // Cursor offset: chevron "❯ " is 2 columns
        let prefix = value.get(..cursor).unwrap_or(value);
        let cursor_x = inner.x + 2 + prefix.width() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    } else {
        frame.render_widget(Paragraph::new(value).style(Theme::text()), inner);
    }
}

pub fn render_input(frame: &mut Frame, area: Rect, label: &str, input: &TextInput, focused: bool) {
    render(frame, area, label, &input.text, input.cursor, focused);
}
