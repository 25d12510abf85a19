mod dashboard;
mod history;
mod input_box;
mod layout;
mod onboarding;
mod profile;
mod send;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use crate::flow::quote::format_amount;
use crate::flow::Screen;
use crate::provider::TransactionStatus;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use rust_decimal::Decimal;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let app_layout = layout::compute_layout(frame.area());

    render_header(frame, app_layout.header, state);

    let body = app_layout.body;
    match state.screen() {
        Screen::Welcome => onboarding::render_welcome(frame, body, state),
        Screen::Signup => onboarding::render_signup(frame, body, state),
        Screen::KycUpload => onboarding::render_kyc_upload(frame, body, state),
        Screen::KycSelfie => onboarding::render_kyc_selfie(frame, body, state),
        Screen::Dashboard => dashboard::render(frame, body, state),
        Screen::SendCountry => send::render_country(frame, body, state),
        Screen::SendAmount => send::render_amount(frame, body, state),
        Screen::SendRate => send::render_rate(frame, body, state),
        Screen::SendBeneficiary => send::render_beneficiary(frame, body, state),
        Screen::SendFunding => send::render_funding(frame, body, state),
        Screen::SendConfirm => send::render_confirm(frame, body, state),
        Screen::SendSuccess => send::render_success(frame, body, state),
        Screen::History => history::render(frame, body, state),
        Screen::Profile => profile::render(frame, body, state),
    }

    status_bar::render(frame, app_layout.status_bar, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(" BridgePay ", Theme::headline()),
        Span::styled("│ ", Theme::border()),
        Span::styled(state.screen().title(), Theme::title()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Bordered block shared by every screen.
fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .title_style(if focused { Theme::title() } else { Theme::muted() })
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "NGN" => Some("₦"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        "INR" => Some("₹"),
        "PHP" => Some("₱"),
        _ => None,
    }
}

/// `₦6,543,210`, or `KES 37,500` when the currency has no symbol.
fn money(currency: &str, amount: Decimal) -> String {
    match currency_symbol(currency) {
        Some(sym) => format!("{}{}", sym, format_amount(amount)),
        None => format!("{} {}", currency, format_amount(amount)),
    }
}

fn status_style(status: TransactionStatus) -> Style {
    match status {
        TransactionStatus::Completed => Theme::success(),
        TransactionStatus::Pending => Theme::warning(),
    }
}
