use crate::app::state::AppState;
use crate::ui::theme::Theme;
use crate::ui::{layout, money, panel};
use chrono::Timelike;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

/// Currencies shown in the live-rates panel.
const FEATURED: [&str; 2] = ["USD", "GBP"];

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let profile = &state.config.profile;
    let rows = layout::rows(area, &[3, 5, 4, area.height.saturating_sub(12).max(3)]);

    let hour = chrono::Local::now().hour();
    let header = vec![
        Line::from(Span::styled(
            format!("{}, {}", greeting(hour), profile.first_name()),
            Theme::headline(),
        )),
        Line::from(Span::styled("Ready to send money worldwide?", Theme::muted())),
    ];
    frame.render_widget(Paragraph::new(header), rows[0]);

    let balance = vec![
        Line::from(Span::styled(
            format!("{} Wallet", profile.source_currency),
            Theme::muted(),
        )),
        Line::from(Span::styled(
            money(&profile.source_currency, profile.wallet_balance),
            Theme::amount(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(balance).block(panel(" Available Balance ", true)),
        rows[1],
    );

    let rates = state.flow.draft.rates();
    let rate_spans: Vec<Span> = FEATURED
        .iter()
        .filter_map(|ccy| rates.lookup(ccy).map(|r| (ccy, r)))
        .flat_map(|(ccy, rate)| {
            [
                Span::styled(format!("1 {} = ", profile.source_currency), Theme::muted()),
                Span::styled(format!("{} {}", rate.normalize(), ccy), Theme::text()),
                Span::raw("    "),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(rate_spans)).block(panel(" Live Rates ", false)),
        rows[2],
    );

    let recent = state.recent_transfers();
    let items: Vec<ListItem> = if recent.is_empty() {
        vec![ListItem::new(Span::styled(" No transfers yet", Theme::muted()))]
    } else {
        recent
            .iter()
            .map(|tx| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!(" {} ", tx.country_flag)),
                    Span::styled(format!("{:<18}", tx.recipient), Theme::text()),
                    Span::styled(format!("{:>14} ", money(&tx.sent_currency, tx.sent_amount)), Theme::amount()),
                    Span::styled(tx.status.label(), super::status_style(tx.status)),
                ]))
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(panel(" Recent Transfers ", false)), rows[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(7), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(20), "Good evening");
        assert_eq!(greeting(2), "Good evening");
    }
}
