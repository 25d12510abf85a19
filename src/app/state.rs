use crate::app::action::Action;
use crate::config::AppConfig;
use crate::flow::draft::BANKS;
use crate::flow::{Beneficiary, FlowMachine, FundingMethod, Screen};
use crate::provider::{
    Country, HistoryProvider, IdentityVerifier, RateProvider, Transaction, TransactionStatus,
    TransferReceipt, TransferRequest,
};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// A single-line text field with a byte-offset cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    FullName,
    Email,
    Password,
}

impl SignupField {
    pub const ALL: [SignupField; 3] = [SignupField::FullName, SignupField::Email, SignupField::Password];

    pub fn label(self) -> &'static str {
        match self {
            SignupField::FullName => "Full name",
            SignupField::Email => "Email",
            SignupField::Password => "Password",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub focus: usize,
    pub show_password: bool,
}

impl SignupForm {
    pub fn focused(&self) -> SignupField {
        SignupField::ALL[self.focus % SignupField::ALL.len()]
    }

    pub fn field(&self, field: SignupField) -> &TextInput {
        match field {
            SignupField::FullName => &self.full_name,
            SignupField::Email => &self.email,
            SignupField::Password => &self.password,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused() {
            SignupField::FullName => &mut self.full_name,
            SignupField::Email => &mut self.email,
            SignupField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % SignupField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + SignupField::ALL.len() - 1) % SignupField::ALL.len();
    }

    /// Password as it should be displayed.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.text.clone()
        } else {
            "•".repeat(self.password.text.chars().count())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeneficiaryField {
    FirstName,
    LastName,
    Phone,
    Bank,
    Account,
}

impl BeneficiaryField {
    pub const ALL: [BeneficiaryField; 5] = [
        BeneficiaryField::FirstName,
        BeneficiaryField::LastName,
        BeneficiaryField::Phone,
        BeneficiaryField::Bank,
        BeneficiaryField::Account,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BeneficiaryField::FirstName => "First name",
            BeneficiaryField::LastName => "Last name",
            BeneficiaryField::Phone => "Phone",
            BeneficiaryField::Bank => "Bank",
            BeneficiaryField::Account => "Account number",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BeneficiaryForm {
    pub first_name: TextInput,
    pub last_name: TextInput,
    pub phone: TextInput,
    pub bank: Option<usize>,
    pub account: TextInput,
    pub focus: usize,
}

impl BeneficiaryForm {
    pub fn focused(&self) -> BeneficiaryField {
        BeneficiaryField::ALL[self.focus % BeneficiaryField::ALL.len()]
    }

    /// The text input under focus; `None` on the bank selector.
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused() {
            BeneficiaryField::FirstName => Some(&mut self.first_name),
            BeneficiaryField::LastName => Some(&mut self.last_name),
            BeneficiaryField::Phone => Some(&mut self.phone),
            BeneficiaryField::Bank => None,
            BeneficiaryField::Account => Some(&mut self.account),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % BeneficiaryField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + BeneficiaryField::ALL.len() - 1) % BeneficiaryField::ALL.len();
    }

    pub fn next_bank(&mut self) {
        self.bank = Some(match self.bank {
            Some(i) => (i + 1) % BANKS.len(),
            None => 0,
        });
    }

    pub fn prev_bank(&mut self) {
        self.bank = Some(match self.bank {
            Some(i) => (i + BANKS.len() - 1) % BANKS.len(),
            None => BANKS.len() - 1,
        });
    }

    pub fn bank_name(&self) -> Option<&'static str> {
        self.bank.and_then(|i| BANKS.get(i).copied())
    }

    pub fn to_beneficiary(&self) -> Beneficiary {
        Beneficiary {
            first_name: self.first_name.text.trim().to_string(),
            last_name: self.last_name.text.trim().to_string(),
            phone: self.phone.text.trim().to_string(),
            bank: self.bank_name().map(str::to_string),
            account_number: self.account.text.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl HistoryFilter {
    pub const ALL: [HistoryFilter; 3] = [HistoryFilter::All, HistoryFilter::Completed, HistoryFilter::Pending];

    pub fn label(self) -> &'static str {
        match self {
            HistoryFilter::All => "All",
            HistoryFilter::Completed => "Completed",
            HistoryFilter::Pending => "Pending",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HistoryFilter::All => HistoryFilter::Completed,
            HistoryFilter::Completed => HistoryFilter::Pending,
            HistoryFilter::Pending => HistoryFilter::All,
        }
    }

    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Completed => tx.status == TransactionStatus::Completed,
            HistoryFilter::Pending => tx.status == TransactionStatus::Pending,
        }
    }
}

/// A navigation scheduled for later, checked on every UI tick.
#[derive(Debug, Clone)]
pub struct PendingNavigation {
    pub target: Screen,
    pub at: Instant,
}

pub struct AppState {
    pub config: AppConfig,
    pub flow: FlowMachine,
    pub countries: Vec<Country>,
    pub history: Vec<Transaction>,
    pub kyc: Box<dyn IdentityVerifier>,
    pub signup: SignupForm,
    pub beneficiary: BeneficiaryForm,
    pub country_cursor: usize,
    pub funding_cursor: usize,
    pub history_filter: HistoryFilter,
    pub last_receipt: Option<TransferReceipt>,
    pub pending_navigation: Option<PendingNavigation>,
    pub warned_currencies: HashSet<String>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        rates: &dyn RateProvider,
        history: &dyn HistoryProvider,
        kyc: Box<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            config,
            flow: FlowMachine::new(rates.rates()),
            countries: rates.countries(),
            history: history.transactions(),
            kyc,
            signup: SignupForm::default(),
            beneficiary: BeneficiaryForm::default(),
            country_cursor: 0,
            funding_cursor: 0,
            history_filter: HistoryFilter::All,
            last_receipt: None,
            pending_navigation: None,
            warned_currencies: HashSet::new(),
            tick_count: 0,
            should_quit: false,
            dirty: true,
            status_message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.flow.current()
    }

    /// Move to `target`, returning whatever the rate ticker needs.
    pub fn navigate(&mut self, target: Screen) -> Vec<Action> {
        if target == Screen::SendCountry {
            self.country_cursor = 0;
            self.funding_cursor = 0;
            self.beneficiary = BeneficiaryForm::default();
        }
        self.pending_navigation = None;
        self.status_message = None;
        self.dirty = true;
        self.flow.transition(target).map(Action::from).into_iter().collect()
    }

    pub fn go_back(&mut self) -> Vec<Action> {
        self.pending_navigation = None;
        self.status_message = None;
        self.dirty = true;
        self.flow.back().map(Action::from).into_iter().collect()
    }

    pub fn schedule_navigation(&mut self, target: Screen, delay: Duration) {
        self.pending_navigation = Some(PendingNavigation {
            target,
            at: Instant::now() + delay,
        });
    }

    pub fn selected_country(&self) -> Option<&Country> {
        self.countries.get(self.country_cursor)
    }

    pub fn selected_funding(&self) -> FundingMethod {
        FundingMethod::ALL[self.funding_cursor % FundingMethod::ALL.len()]
    }

    pub fn filtered_history(&self) -> Vec<&Transaction> {
        self.history
            .iter()
            .filter(|tx| self.history_filter.matches(tx))
            .collect()
    }

    pub fn recent_transfers(&self) -> &[Transaction] {
        let n = self.config.ui.recent_transfers.min(self.history.len());
        &self.history[..n]
    }

    /// What settlement would be asked to do with the current draft.
    pub fn transfer_request(&self) -> TransferRequest {
        let draft = self.flow.draft.draft();
        TransferRequest {
            destination: draft.destination.clone(),
            recipient: draft
                .beneficiary
                .as_ref()
                .map(|b| b.full_name())
                .unwrap_or_else(|| Beneficiary::default().full_name()),
            amount: draft.amount(),
            source_currency: self.config.profile.source_currency.clone(),
            fee: draft.fee,
            converted_amount: draft.converted_amount,
            funding_method: draft.funding_method,
        }
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        match self.screen() {
            Screen::SendRate => {
                let lock = self.flow.rate_lock();
                if lock.is_expired() {
                    "Rate expired".to_string()
                } else {
                    format!("Rate locked for {}s", lock.seconds_remaining())
                }
            }
            Screen::KycUpload | Screen::KycSelfie => format!("Verification {}%", self.kyc.progress()),
            _ => format!("Transfers: {}", self.history.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::{MockHistoryProvider, MockIdentityVerifier, MockRateProvider};

    fn state() -> AppState {
        AppState::new(
            AppConfig::default(),
            &MockRateProvider::default(),
            &MockHistoryProvider,
            Box::new(MockIdentityVerifier::default()),
        )
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new();
        for c in "naira".chars() {
            input.insert_char(c);
        }
        input.move_home();
        input.insert_char('N');
        input.delete_forward();
        assert_eq!(input.text, "Naira");
        input.move_end();
        input.delete_back();
        assert_eq!(input.text, "Nair");
        input.move_left();
        input.move_left();
        input.move_right();
        assert_eq!(input.cursor, 3);
        input.clear();
        assert_eq!(input.text, "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::new();
        input.insert_char('₦');
        input.insert_char('5');
        input.move_left();
        input.move_left();
        assert_eq!(input.cursor, 0);
        input.move_right();
        assert_eq!(input.cursor, '₦'.len_utf8());
        input.delete_back();
        assert_eq!(input.text, "5");
    }

    #[test]
    fn test_password_masking() {
        let mut form = SignupForm::default();
        form.focus = 2;
        for c in "secret".chars() {
            form.focused_input().insert_char(c);
        }
        assert_eq!(form.password_display(), "••••••");
        form.show_password = true;
        assert_eq!(form.password_display(), "secret");
    }

    #[test]
    fn test_field_cycling_wraps() {
        let mut form = BeneficiaryForm::default();
        form.prev_field();
        assert_eq!(form.focused(), BeneficiaryField::Account);
        form.next_field();
        assert_eq!(form.focused(), BeneficiaryField::FirstName);
    }

    #[test]
    fn test_bank_selection() {
        let mut form = BeneficiaryForm::default();
        assert_eq!(form.bank_name(), None);
        form.next_bank();
        assert_eq!(form.bank_name(), Some("GTBank"));
        form.prev_bank();
        assert_eq!(form.bank_name(), Some("UBA"));
    }

    #[test]
    fn test_history_filter() {
        let mut s = state();
        assert_eq!(s.filtered_history().len(), 3);
        s.history_filter = s.history_filter.next();
        assert_eq!(s.history_filter, HistoryFilter::Completed);
        assert_eq!(s.filtered_history().len(), 2);
        s.history_filter = s.history_filter.next();
        assert_eq!(s.filtered_history().len(), 1);
        assert_eq!(s.history_filter.next(), HistoryFilter::All);
    }

    #[test]
    fn test_recent_transfers_is_capped() {
        let mut s = state();
        s.config.ui.recent_transfers = 2;
        assert_eq!(s.recent_transfers().len(), 2);
        s.config.ui.recent_transfers = 10;
        assert_eq!(s.recent_transfers().len(), 3);
    }

    #[test]
    fn test_navigate_into_rate_requests_ticker() {
        let mut s = state();
        let actions = s.navigate(Screen::SendRate);
        let epoch = s.flow.rate_lock().epoch();
        assert_eq!(actions, vec![Action::StartRateTicker { epoch }]);
        assert_eq!(s.navigate(Screen::SendBeneficiary), vec![Action::StopRateTicker]);
        assert!(s.navigate(Screen::SendFunding).is_empty());
    }

    #[test]
    fn test_new_send_flow_clears_forms() {
        let mut s = state();
        s.beneficiary.first_name.insert_char('A');
        s.country_cursor = 3;
        s.navigate(Screen::SendCountry);
        assert_eq!(s.beneficiary.first_name.text, "");
        assert_eq!(s.country_cursor, 0);
    }
}
