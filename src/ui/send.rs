use crate::app::state::{AppState, BeneficiaryField};
use crate::flow::draft::{FundingMethod, QUICK_AMOUNTS};
use crate::flow::quote::{self, FEE_RATE};
use crate::flow::rate_lock::RATE_LOCK_SECS;
use crate::flow::RateLockState;
use crate::ui::theme::Theme;
use crate::ui::{input_box, layout, money, panel};
use ratatui::prelude::*;
use ratatui::widgets::{Gauge, List, ListItem, ListState, Paragraph};
use rust_decimal::Decimal;

fn destination_line(state: &AppState) -> Line<'static> {
    match state.flow.draft.draft().destination.as_ref() {
        Some(dest) => Line::from(vec![
            Span::styled("Sending to ", Theme::muted()),
            Span::styled(format!("{} {} ({})", dest.flag, dest.name, dest.currency), Theme::title()),
        ]),
        None => Line::from(Span::styled("No destination selected", Theme::warning())),
    }
}

fn source_currency(state: &AppState) -> &str {
    &state.config.profile.source_currency
}

fn target_currency(state: &AppState) -> String {
    state
        .flow
        .draft
        .draft()
        .destination
        .as_ref()
        .map(|d| d.currency.clone())
        .unwrap_or_default()
}

pub fn render_country(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 60, area.height);
    let items: Vec<ListItem> = state
        .countries
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {} ", c.flag)),
                Span::styled(format!("{:<20}", c.name), Theme::text()),
                Span::styled(c.currency.clone(), Theme::muted()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel(" Where are you sending money? ", true))
        .highlight_style(Theme::selected())
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(state.country_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_amount(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 60, 16);
    let rows = layout::rows(area, &[2, 5, 4, 3]);
    let draft = state.flow.draft.draft();
    let src = source_currency(state);

    frame.render_widget(Paragraph::new(destination_line(state)), rows[0]);

    let text = if draft.amount_text.is_empty() {
        "0"
    } else {
        draft.amount_text.as_str()
    };
    let amount = vec![
        Line::from(Span::styled(format!("{} {}", src, text), Theme::amount())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Fee ({}%): {}", (FEE_RATE * Decimal::from(100)).normalize(), money(src, draft.fee)),
            Theme::muted(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(amount)
            .alignment(Alignment::Center)
            .block(panel(" You send ", true)),
        rows[1],
    );

    let receives = Line::from(Span::styled(
        format!(
            "{} {}",
            quote::format_amount(draft.converted_amount),
            target_currency(state)
        ),
        Theme::success(),
    ));
    frame.render_widget(
        Paragraph::new(receives)
            .alignment(Alignment::Center)
            .block(panel(" Recipient gets ", false)),
        rows[2],
    );

    let quick: Vec<Span> = QUICK_AMOUNTS
        .iter()
        .enumerate()
        .flat_map(|(i, amt)| {
            [
                Span::styled(format!(" F{} ", i + 1), Theme::key_hint()),
                Span::styled(format!(" {}  ", money(src, Decimal::from(*amt))), Theme::text()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(quick)), rows[3]);
}

pub fn render_rate(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 60, 16);
    let rows = layout::rows(area, &[2, 6, 3, 2]);
    let draft = state.flow.draft.draft();
    let src = source_currency(state);
    let dst = target_currency(state);
    let rate = state.flow.draft.rates().rate_for(&dst);

    frame.render_widget(Paragraph::new(destination_line(state)), rows[0]);

    let detail = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), Theme::muted()),
            Span::styled(value, Theme::text()),
        ])
    };
    let lines = vec![
        detail("Exchange rate", format!("1 {} = {} {}", src, rate.normalize(), dst)),
        detail("You send", money(src, draft.amount())),
        detail("Fee", money(src, draft.fee)),
        detail("Recipient gets", format!("{} {}", quote::format_amount(draft.converted_amount), dst)),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel(" Guaranteed rate ", true)), rows[1]);

    let lock = state.flow.rate_lock();
    let (percent, label, style) = match lock.state() {
        RateLockState::Running(secs) => (
            (secs * 100 / RATE_LOCK_SECS).min(100) as u16,
            format!("Rate locked for {}s", secs),
            Style::default().fg(Theme::ACCENT_TEAL),
        ),
        RateLockState::Expired => (0, "Rate expired".to_string(), Theme::error()),
        RateLockState::Idle => (0, "Rate not locked".to_string(), Theme::muted()),
    };
    let gauge = Gauge::default()
        .block(panel(" Rate lock ", false))
        .gauge_style(style)
        .percent(percent)
        .label(label);
    frame.render_widget(gauge, rows[2]);

    if lock.is_expired() {
        frame.render_widget(
            Paragraph::new(Span::styled("Press r to get a fresh quote", Theme::warning())),
            rows[3],
        );
    }
}

pub fn render_beneficiary(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 56, 17);
    let rows = layout::rows(area, &[2, 3, 3, 3, 3, 3]);
    let form = &state.beneficiary;

    frame.render_widget(
        Paragraph::new(Span::styled("Who are you sending to?", Theme::headline())),
        rows[0],
    );

    for (i, field) in BeneficiaryField::ALL.iter().enumerate() {
        let focused = form.focused() == *field;
        let row = rows[i + 1];
        let input = match field {
            BeneficiaryField::FirstName => &form.first_name,
            BeneficiaryField::LastName => &form.last_name,
            BeneficiaryField::Phone => &form.phone,
            BeneficiaryField::Account => &form.account,
            BeneficiaryField::Bank => {
                let value = match form.bank_name() {
                    Some(name) => format!("◀ {} ▶", name),
                    None => "◀ select a bank ▶".to_string(),
                };
                let style = if focused { Theme::text() } else { Theme::muted() };
                frame.render_widget(
                    Paragraph::new(Span::styled(value, style)).block(panel(" Bank ", focused)),
                    row,
                );
                continue;
            }
        };
        input_box::render_input(frame, row, field.label(), input, focused);
    }
}

pub fn render_funding(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 60, 12);
    let amount_text = state.flow.draft.amount_text();
    let src = source_currency(state);

    let items: Vec<ListItem> = FundingMethod::ALL
        .iter()
        .map(|m| {
            let total = quote::total_debit(amount_text, Some(*m));
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:<16}", m.label()), Theme::title()),
                    Span::styled(money(src, total), Theme::amount()),
                ]),
                Line::from(Span::styled(format!("  {}", m.settlement_hint()), Theme::muted())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel(" How would you like to pay? ", true))
        .highlight_style(Theme::selected())
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(state.funding_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_confirm(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 60, 14);
    let draft = state.flow.draft.draft();
    let request = state.transfer_request();
    let src = source_currency(state);
    let dst = target_currency(state);

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Theme::muted()),
            Span::styled(value, Theme::text()),
        ])
    };

    let mut lines = vec![
        destination_line(state),
        Line::from(""),
        row("Recipient", request.recipient.clone()),
    ];
    if let Some(bank) = draft.beneficiary.as_ref().and_then(|b| b.bank.clone()) {
        lines.push(row("Bank", bank));
    }
    lines.push(row("Amount", money(src, request.amount)));
    lines.push(row("Fee", money(src, request.fee)));
    if request.funding_method == Some(FundingMethod::DebitCard) {
        lines.push(row("Card surcharge", money(src, quote::card_surcharge(&draft.amount_text))));
    }
    lines.push(row(
        "Total debit",
        money(src, quote::total_debit(&draft.amount_text, request.funding_method)),
    ));
    lines.push(row(
        "Recipient gets",
        format!("{} {}", quote::format_amount(request.converted_amount), dst),
    ));
    lines.push(row(
        "Paying with",
        request
            .funding_method
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| "not chosen".to_string()),
    ));

    frame.render_widget(Paragraph::new(lines).block(panel(" Review transfer ", true)), area);
}

pub fn render_success(frame: &mut Frame, area: Rect, state: &AppState) {
    let area = layout::centered(area, 56, 10);
    let mut lines = vec![
        Line::from(Span::styled("✔ Transfer sent", Theme::success().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    match state.history.first().zip(state.last_receipt.as_ref()) {
        Some((tx, receipt)) => {
            lines.push(Line::from(vec![
                Span::styled("Reference  ", Theme::muted()),
                Span::styled(receipt.id.clone(), Theme::title()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Submitted  ", Theme::muted()),
                Span::styled(receipt.submitted_at.format("%Y-%m-%d %H:%M").to_string(), Theme::text()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("To         ", Theme::muted()),
                Span::styled(
                    format!(
                        "{} receives {} {}",
                        tx.recipient,
                        quote::format_amount(tx.received_amount),
                        tx.received_currency
                    ),
                    Theme::text(),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled("No receipt on file", Theme::muted()))),
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(" Done ", true)),
        area,
    );
}
