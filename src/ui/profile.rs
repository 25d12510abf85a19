use crate::app::state::AppState;
use crate::ui::theme::Theme;
use crate::ui::{layout, money, panel};
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

fn toggle(label: &str, key: char, on: bool) -> Line<'static> {
    let (mark, style) = if on {
        ("[on] ", Theme::success())
    } else {
        ("[off]", Theme::muted())
    };
    Line::from(vec![
        Span::styled(format!(" {} ", key), Theme::key_hint()),
        Span::styled(format!(" {:<22}", label), Theme::text()),
        Span::styled(mark, style),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 56, 16);
    let rows = layout::rows(area, &[5, 3, 4, 2]);
    let profile = &state.config.profile;

    let account = vec![
        Line::from(Span::styled(profile.display_name.clone(), Theme::headline())),
        Line::from(Span::styled(profile.email.clone(), Theme::muted())),
        Line::from(vec![
            Span::styled("Balance  ", Theme::muted()),
            Span::styled(money(&profile.source_currency, profile.wallet_balance), Theme::amount()),
        ]),
    ];
    frame.render_widget(Paragraph::new(account).block(panel(" Profile ", true)), rows[0]);

    let progress = state.kyc.progress();
    let (label, style) = if progress >= 100 {
        ("Verified".to_string(), Theme::success())
    } else {
        (format!("{}% verified", progress), Theme::warning())
    };
    let gauge = Gauge::default()
        .block(panel(" Identity ", false))
        .gauge_style(style)
        .percent(u16::from(progress.min(100)))
        .label(label);
    frame.render_widget(gauge, rows[1]);

    let settings = vec![
        toggle("Biometric login", 'b', profile.biometric_login),
        toggle("Push notifications", 'n', profile.push_notifications),
    ];
    frame.render_widget(Paragraph::new(settings).block(panel(" Security ", false)), rows[2]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" o ", Theme::key_hint()),
            Span::styled(" Sign out", Theme::error()),
        ])),
        rows[3],
    );
}
