use crate::app::state::AppState;
use crate::flow::Screen;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Welcome => "Enter start  q quit",
        Screen::Signup => "Tab next  ^P show password  Enter create",
        Screen::KycUpload => "Enter upload  Esc back",
        Screen::KycSelfie => "Enter capture  Esc back",
        Screen::Dashboard => "s send  h history  p profile  q quit",
        Screen::SendCountry | Screen::SendFunding => "↑↓ choose  Enter select  Esc back",
        Screen::SendAmount => "0-9 . type  F1-F4 quick  Enter continue",
        Screen::SendRate => "Enter continue  r refresh  Esc back",
        Screen::SendBeneficiary => "Tab next  ←→ bank  Enter continue",
        Screen::SendConfirm => "Enter send  Esc back",
        Screen::SendSuccess => "Enter dashboard",
        Screen::History => "Tab filter  1-3 pick  Esc back",
        Screen::Profile => "b biometric  n notifications  o sign out",
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let screen = state.screen();
    let status_style = if state.status_message.is_some() {
        Theme::warning().bg(Color::DarkGray)
    } else {
        Theme::status_bar()
    };

    let mut parts: Vec<Span> = vec![
        Span::styled(format!(" [{}] ", screen.tag()), Theme::key_hint()),
        Span::styled(format!(" {} ", state.status_line()), status_style),
    ];

    let hints = format!(" {} ", key_hints(screen));
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hints.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(hints, Theme::key_hint()));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
