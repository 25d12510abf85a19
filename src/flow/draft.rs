//! The transfer being composed, and the store that guards its invariants.
//!
//! The fee and converted amount are projections of the amount text and the
//! destination. They are recomputed after every committed change and can
//! never be set directly.

use crate::flow::quote::{self, RateTable};
use crate::provider::Country;
use rust_decimal::Decimal;
use thiserror::Error;

/// Preset amounts offered next to the keypad, in the source currency.
pub const QUICK_AMOUNTS: [u64; 4] = [10_000, 50_000, 100_000, 500_000];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("amount must be digits with at most one decimal point")]
    InvalidFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingMethod {
    Wallet,
    DebitCard,
    BankTransfer,
}

impl FundingMethod {
    pub const ALL: [FundingMethod; 3] = [
        FundingMethod::Wallet,
        FundingMethod::DebitCard,
        FundingMethod::BankTransfer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FundingMethod::Wallet => "Bridge Wallet",
            FundingMethod::DebitCard => "Debit Card",
            FundingMethod::BankTransfer => "Bank Transfer",
        }
    }

    pub fn settlement_hint(self) -> &'static str {
        match self {
            FundingMethod::Wallet => "Instant",
            FundingMethod::DebitCard => "Instant, 2.9% card fee",
            FundingMethod::BankTransfer => "2-4 hours, no fee",
        }
    }
}

/// Banks offered on the recipient form.
pub const BANKS: [&str; 4] = ["GTBank", "Access Bank", "Zenith Bank", "UBA"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Beneficiary {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub bank: Option<String>,
    pub account_number: String,
}

impl Beneficiary {
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            "Recipient".to_string()
        } else {
            name.to_string()
        }
    }
}

/// Destination fields copied from the selected [`Country`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub code: String,
    pub name: String,
    pub currency: String,
    pub flag: String,
}

impl From<&Country> for Destination {
    fn from(country: &Country) -> Self {
        Self {
            code: country.code.clone(),
            name: country.name.clone(),
            currency: country.currency.clone(),
            flag: country.flag.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferDraft {
    pub destination: Option<Destination>,
    pub amount_text: String,
    pub fee: Decimal,
    pub converted_amount: Decimal,
    pub beneficiary: Option<Beneficiary>,
    pub funding_method: Option<FundingMethod>,
}

impl TransferDraft {
    pub fn amount(&self) -> Decimal {
        quote::parse_amount(&self.amount_text)
    }
}

/// True for text a user could be halfway through typing as a non-negative
/// decimal: `""`, `"12"`, `"12."`, `"."`, `".5"`.
pub fn is_amount_text(text: &str) -> bool {
    let mut seen_dot = false;
    for c in text.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// Owns the single in-progress draft.
#[derive(Debug, Clone)]
pub struct DraftStore {
    draft: TransferDraft,
    rates: RateTable,
}

impl DraftStore {
    pub fn new(rates: RateTable) -> Self {
        Self {
            draft: TransferDraft::default(),
            rates,
        }
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn amount_text(&self) -> &str {
        &self.draft.amount_text
    }

    pub fn has_destination(&self) -> bool {
        self.draft.destination.is_some()
    }

    /// Select a destination. Any amount typed for a previous destination is
    /// cleared.
    pub fn set_destination(&mut self, country: &Country) {
        self.draft.destination = Some(Destination::from(country));
        self.draft.amount_text.clear();
        self.recompute();
    }

    /// Replace the amount text. Rejected text leaves the draft untouched.
    pub fn set_amount_text(&mut self, text: &str) -> Result<(), InputError> {
        if !is_amount_text(text) {
            return Err(InputError::InvalidFormat);
        }
        self.draft.amount_text = text.to_string();
        self.recompute();
        Ok(())
    }

    /// Keypad entry. A second '.' is silently ignored.
    pub fn append_key(&mut self, key: char) -> Result<(), InputError> {
        if key == '.' && self.draft.amount_text.contains('.') {
            return Ok(());
        }
        let mut text = self.draft.amount_text.clone();
        text.push(key);
        self.set_amount_text(&text)
    }

    pub fn backspace(&mut self) {
        if self.draft.amount_text.is_empty() {
            return;
        }
        let mut text = self.draft.amount_text.clone();
        text.pop();
        // Removing a character from valid text always leaves valid text.
        let _ = self.set_amount_text(&text);
    }

    pub fn set_quick_amount(&mut self, amount: u64) {
        let _ = self.set_amount_text(&amount.to_string());
    }

    pub fn set_beneficiary(&mut self, beneficiary: Beneficiary) {
        self.draft.beneficiary = Some(beneficiary);
    }

    pub fn set_funding_method(&mut self, method: FundingMethod) {
        self.draft.funding_method = Some(method);
    }

    pub fn reset(&mut self) {
        self.draft = TransferDraft::default();
    }

    fn recompute(&mut self) {
        let text = &self.draft.amount_text;
        self.draft.fee = quote::fee(text);
        self.draft.converted_amount = match &self.draft.destination {
            Some(dest) => quote::convert(text, &dest.currency, &self.rates),
            None => Decimal::ZERO,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn us() -> Country {
        Country {
            code: "US".into(),
            name: "United States".into(),
            currency: "USD".into(),
            flag: "🇺🇸".into(),
        }
    }

    fn store() -> DraftStore {
        let mut rates = RateTable::new();
        rates.insert("USD", dec("0.00065"));
        DraftStore::new(rates)
    }

    #[test]
    fn test_valid_text_is_stored_verbatim() {
        let mut s = store();
        for text in ["", "0", "12", "12.", ".", ".5", "007", "10.50", "0.000"] {
            assert_eq!(s.set_amount_text(text), Ok(()));
            assert_eq!(s.amount_text(), text);
        }
    }

    #[test]
    fn test_invalid_text_is_a_noop() {
        let mut s = store();
        s.set_destination(&us());
        s.set_amount_text("1000").unwrap();
        let before = s.draft().clone();
        for text in ["12.3.4", "abc", "-5", "1e5", " 1", "1,000", ".."] {
            assert_eq!(s.set_amount_text(text), Err(InputError::InvalidFormat));
            assert_eq!(s.draft(), &before);
        }
    }

    #[test]
    fn test_recompute_on_amount_change() {
        let mut s = store();
        s.set_destination(&us());
        s.set_amount_text("1000").unwrap();
        assert_eq!(s.draft().fee, dec("15"));
        assert_eq!(s.draft().converted_amount, dec("0.65"));

        s.set_amount_text("").unwrap();
        assert_eq!(s.draft().fee, Decimal::ZERO);
        assert_eq!(s.draft().converted_amount, Decimal::ZERO);
    }

    #[test]
    fn test_set_destination_clears_amount() {
        let mut s = store();
        s.set_destination(&us());
        s.set_amount_text("500").unwrap();
        s.set_destination(&us());
        assert_eq!(s.amount_text(), "");
        assert_eq!(s.draft().fee, Decimal::ZERO);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut s = store();
        s.backspace();
        assert_eq!(s.amount_text(), "");
    }

    #[test]
    fn test_keypad_entry() {
        let mut s = store();
        s.set_destination(&us());
        for key in ['1', '2', '.', '5'] {
            s.append_key(key).unwrap();
        }
        assert_eq!(s.amount_text(), "12.5");

        assert_eq!(s.append_key('.'), Ok(()));
        assert_eq!(s.amount_text(), "12.5");

        assert_eq!(s.append_key('x'), Err(InputError::InvalidFormat));
        assert_eq!(s.amount_text(), "12.5");

        s.backspace();
        s.backspace();
        assert_eq!(s.amount_text(), "12");
        assert_eq!(s.draft().fee, dec("0.18"));
    }

    #[test]
    fn test_quick_amount() {
        let mut s = store();
        s.set_destination(&us());
        s.set_quick_amount(QUICK_AMOUNTS[0]);
        assert_eq!(s.amount_text(), "10000");
        assert_eq!(s.draft().converted_amount, dec("6.5"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = store();
        s.set_destination(&us());
        s.set_amount_text("10").unwrap();
        s.set_funding_method(FundingMethod::Wallet);
        s.set_beneficiary(Beneficiary::default());
        s.reset();
        assert_eq!(s.draft(), &TransferDraft::default());
    }

    #[test]
    fn test_beneficiary_full_name() {
        let b = Beneficiary {
            first_name: "Ada ".into(),
            last_name: "Obi".into(),
            ..Default::default()
        };
        assert_eq!(b.full_name(), "Ada Obi");
        assert_eq!(Beneficiary::default().full_name(), "Recipient");
    }
}
