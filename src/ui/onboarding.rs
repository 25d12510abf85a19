use crate::app::state::{AppState, SignupField};
use crate::ui::theme::Theme;
use crate::ui::{input_box, layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

pub fn render_welcome(frame: &mut Frame, area: Rect, _state: &AppState) {
    let area = layout::centered(area, 56, 11);
    let lines = vec![
        Line::from(Span::styled("BridgePay", Theme::headline())),
        Line::from(""),
        Line::from(Span::styled("Send money home in minutes.", Theme::title())),
        Line::from(Span::styled(
            "Live rates, low fees, and a 30 second rate guarantee.",
            Theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(" get started", Theme::text()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub fn render_signup(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 50, 15);
    let rows = layout::rows(area, &[2, 3, 3, 3, 2]);
    let form = &state.signup;

    frame.render_widget(
        Paragraph::new(Span::styled("Create your account", Theme::headline())),
        rows[0],
    );

    for (i, field) in SignupField::ALL.iter().enumerate() {
        let focused = form.focused() == *field;
        let row = rows[i + 1];
        if *field == SignupField::Password {
            let display = form.password_display();
            let cursor = if form.show_password {
                form.password.cursor
            } else {
                form.password.text[..form.password.cursor].chars().count() * '•'.len_utf8()
            };
            input_box::render(frame, row, field.label(), &display, cursor, focused);
        } else {
            input_box::render_input(frame, row, field.label(), form.field(*field), focused);
        }
    }

    let hint = if form.show_password {
        "Ctrl+P hides the password"
    } else {
        "Ctrl+P shows the password"
    };
    frame.render_widget(Paragraph::new(Span::styled(hint, Theme::muted())), rows[4]);
}

fn render_kyc(frame: &mut Frame, area: Rect, state: &AppState, heading: &str, body: &str, action: &str) {
    let area = layout::centered(area, 56, 12);
    let rows = layout::rows(area, &[2, 3, 3, 2]);

    frame.render_widget(Paragraph::new(Span::styled(heading, Theme::headline())), rows[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(body, Theme::text())).wrap(Wrap { trim: true }),
        rows[1],
    );

    let progress = state.kyc.progress();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Verification ")
                .borders(Borders::ALL)
                .border_type(Theme::border_type())
                .border_style(Theme::border()),
        )
        .gauge_style(Style::default().fg(Theme::ACCENT_TEAL))
        .percent(u16::from(progress.min(100)))
        .label(format!("{}%", progress));
    frame.render_widget(gauge, rows[2]);

    let footer = if state.pending_navigation.is_some() {
        Span::styled("Verified. Opening your wallet...", Theme::success())
    } else {
        Span::styled(action, Style::default().fg(Theme::ACCENT_TEAL))
    };
    frame.render_widget(Paragraph::new(footer), rows[3]);
}

pub fn render_kyc_upload(frame: &mut Frame, area: Rect, state: &AppState) {
    render_kyc(
        frame,
        area,
        state,
        "Verify your identity",
        "Upload a government-issued ID: passport, driver's license or national ID card.",
        "Enter upload document",
    );
}

pub fn render_kyc_selfie(frame: &mut Frame, area: Rect, state: &AppState) {
    render_kyc(
        frame,
        area,
        state,
        "Take a selfie",
        "Look straight at the camera so we can match you to your document.",
        "Enter capture selfie",
    );
}
