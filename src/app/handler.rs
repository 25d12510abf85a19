use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::flow::draft::QUICK_AMOUNTS;
use crate::flow::{FundingMethod, RateLockState, Screen};
use crate::provider::{KycStep, SettlementError, TransferReceipt, TransferRequest};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Delay between the final KYC step and landing on the dashboard.
const KYC_SETTLE_DELAY: Duration = Duration::from_secs(1);

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::RateTick { epoch } => handle_rate_tick(state, epoch),
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);

    let due = state
        .pending_navigation
        .as_ref()
        .is_some_and(|p| Instant::now() >= p.at);
    if !due {
        return vec![];
    }
    match state.pending_navigation.take() {
        Some(pending) => state.navigate(pending.target),
        None => vec![],
    }
}

fn handle_rate_tick(state: &mut AppState, epoch: u64) -> Vec<Action> {
    match state.flow.rate_tick(epoch) {
        Some(RateLockState::Expired) => {
            state.status_message = Some("Rate expired, press r to refresh the quote".to_string());
            state.dirty = true;
            // Nothing left to count down.
            vec![Action::StopRateTicker]
        }
        Some(_) => {
            state.dirty = true;
            vec![]
        }
        None => {
            tracing::trace!(epoch, "stale rate tick ignored");
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    if key.code == KeyCode::Esc {
        return state.go_back();
    }

    match state.screen() {
        Screen::Welcome => handle_welcome_key(state, key),
        Screen::Signup => handle_signup_key(state, key),
        Screen::KycUpload => handle_kyc_key(state, key, KycStep::DocumentUploaded),
        Screen::KycSelfie => handle_kyc_key(state, key, KycStep::SelfieCaptured),
        Screen::Dashboard => handle_dashboard_key(state, key),
        Screen::SendCountry => handle_country_key(state, key),
        Screen::SendAmount => handle_amount_key(state, key),
        Screen::SendRate => handle_rate_key(state, key),
        Screen::SendBeneficiary => handle_beneficiary_key(state, key),
        Screen::SendFunding => handle_funding_key(state, key),
        Screen::SendConfirm => handle_confirm_key(state, key),
        Screen::SendSuccess => handle_success_key(state, key),
        Screen::History => handle_history_key(state, key),
        Screen::Profile => handle_profile_key(state, key),
    }
}

fn handle_welcome_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => state.navigate(Screen::Signup),
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

/// Shared line-editing keys. Returns true when the key was consumed.
fn edit_text(input: &mut TextInput, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert_char(c),
        KeyCode::Backspace => input.delete_back(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

fn handle_signup_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('p') {
        state.signup.show_password = !state.signup.show_password;
        return vec![];
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.signup.next_field();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.signup.prev_field();
            vec![]
        }
        KeyCode::Enter => {
            state.kyc.submit(KycStep::AccountCreated);
            tracing::info!(email = %state.signup.email.text, "account created");
            state.signup.password.clear();
            state.navigate(Screen::KycUpload)
        }
        _ => {
            edit_text(state.signup.focused_input(), &key);
            vec![]
        }
    }
}

fn handle_kyc_key(state: &mut AppState, key: KeyEvent, step: KycStep) -> Vec<Action> {
    if key.code != KeyCode::Enter || state.pending_navigation.is_some() {
        return vec![];
    }
    state.kyc.submit(step);
    match step {
        KycStep::DocumentUploaded => state.navigate(Screen::KycSelfie),
        KycStep::SelfieCaptured => {
            state.schedule_navigation(Screen::Dashboard, KYC_SETTLE_DELAY);
            state.status_message = Some("Verifying your identity...".to_string());
            vec![]
        }
        KycStep::AccountCreated => vec![],
    }
}

fn handle_dashboard_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('s') | KeyCode::Enter => state.navigate(Screen::SendCountry),
        KeyCode::Char('h') => state.navigate(Screen::History),
        KeyCode::Char('p') => state.navigate(Screen::Profile),
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn handle_country_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let total = state.countries.len();
    match key.code {
        KeyCode::Up => {
            state.country_cursor = state.country_cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            if state.country_cursor + 1 < total {
                state.country_cursor += 1;
            }
            vec![]
        }
        KeyCode::Home => {
            state.country_cursor = 0;
            vec![]
        }
        KeyCode::End => {
            state.country_cursor = total.saturating_sub(1);
            vec![]
        }
        KeyCode::Enter => {
            let Some(country) = state.selected_country().cloned() else {
                return vec![];
            };
            if state.flow.draft.rates().lookup(&country.currency).is_none()
                && state.warned_currencies.insert(country.currency.clone())
            {
                tracing::warn!(currency = %country.currency, "no rate on file, quoting at 1:1");
            }
            state.flow.draft.set_destination(&country);
            state.navigate(Screen::SendAmount)
        }
        _ => vec![],
    }
}

fn handle_amount_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            if let Err(e) = state.flow.draft.append_key(c) {
                tracing::trace!(key = %c, error = %e, "keypad input rejected");
            }
            vec![]
        }
        KeyCode::Backspace => {
            state.flow.draft.backspace();
            vec![]
        }
        KeyCode::F(n @ 1..=4) => {
            state.flow.draft.set_quick_amount(QUICK_AMOUNTS[usize::from(n - 1)]);
            vec![]
        }
        KeyCode::Enter => {
            if !state.flow.draft.has_destination() {
                return state.navigate(Screen::SendCountry);
            }
            if state.flow.draft.draft().amount().is_zero() {
                state.status_message = Some("Enter an amount to continue".to_string());
                return vec![];
            }
            state.navigate(Screen::SendRate)
        }
        _ => vec![],
    }
}

fn handle_rate_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Char('r') => state.navigate(Screen::SendRate),
        KeyCode::Enter => {
            if state.flow.rate_lock().is_expired() {
                state.status_message = Some("Rate expired, press r to refresh the quote".to_string());
                return vec![];
            }
            state.navigate(Screen::SendBeneficiary)
        }
        _ => vec![],
    }
}

fn handle_beneficiary_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let form = &mut state.beneficiary;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            let beneficiary = form.to_beneficiary();
            state.flow.draft.set_beneficiary(beneficiary);
            return state.navigate(Screen::SendFunding);
        }
        KeyCode::Right | KeyCode::Char(' ') if form.focused() == BeneficiaryField::Bank => form.next_bank(),
        KeyCode::Left if form.focused() == BeneficiaryField::Bank => form.prev_bank(),
        _ => {
            if let Some(input) = form.focused_input() {
                edit_text(input, &key);
            }
        }
    }
    vec![]
}

fn handle_funding_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let total = FundingMethod::ALL.len();
    match key.code {
        KeyCode::Up => {
            state.funding_cursor = state.funding_cursor.saturating_sub(1);
            vec![]
        }
        KeyCode::Down => {
            if state.funding_cursor + 1 < total {
                state.funding_cursor += 1;
            }
            vec![]
        }
        KeyCode::Enter => {
            let method = state.selected_funding();
            state.flow.draft.set_funding_method(method);
            state.navigate(Screen::SendConfirm)
        }
        _ => vec![],
    }
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => vec![Action::SubmitTransfer(state.transfer_request())],
        _ => vec![],
    }
}

fn handle_success_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => state.navigate(Screen::Dashboard),
        _ => vec![],
    }
}

fn handle_history_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Tab => state.history_filter = state.history_filter.next(),
        KeyCode::Char(c @ '1'..='3') => {
            let idx = (c as u8 - b'1') as usize;
            state.history_filter = HistoryFilter::ALL[idx];
        }
        _ => {}
    }
    vec![]
}

fn handle_profile_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let profile = &mut state.config.profile;
    match key.code {
        KeyCode::Char('b') => {
            profile.biometric_login = !profile.biometric_login;
            vec![Action::SaveConfig]
        }
        KeyCode::Char('n') => {
            profile.push_notifications = !profile.push_notifications;
            vec![Action::SaveConfig]
        }
        KeyCode::Char('o') => {
            state.kyc.reset();
            state.signup = SignupForm::default();
            tracing::info!("signed out");
            state.navigate(Screen::Welcome)
        }
        _ => vec![],
    }
}

/// Fold the settlement outcome back into the state.
pub fn apply_settlement(
    state: &mut AppState,
    request: &TransferRequest,
    result: Result<TransferReceipt, SettlementError>,
) -> Vec<Action> {
    match result {
        Ok(receipt) => {
            tracing::info!(
                id = %receipt.id,
                amount = %request.amount,
                recipient = %request.recipient,
                "transfer submitted"
            );
            state.history.insert(0, request.to_transaction(&receipt));
            state.last_receipt = Some(receipt);
            state.navigate(Screen::SendSuccess)
        }
        Err(e) => {
            tracing::warn!(error = %e, "transfer rejected");
            state.status_message = Some(format!("Transfer failed: {}", e));
            state.dirty = true;
            vec![]
        }
    }
}
