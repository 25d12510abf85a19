//! Conversion and fee calculation.
//!
//! Every function here is pure and total: text that does not read as a
//! non-negative number is treated as zero rather than rejected, so the UI
//! can show a quote while the user is halfway through typing "12.".

use crate::flow::draft::FundingMethod;
use rust_decimal::prelude::*;
use std::collections::HashMap;

/// Transfer fee: 1.5% of the amount sent.
pub const FEE_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 3);

/// Extra charge when funding from a debit card: 2.9%.
pub const CARD_SURCHARGE_RATE: Decimal = Decimal::from_parts(29, 0, 0, false, 3);

/// Converted amounts are displayed with this many decimal places.
pub const DISPLAY_DP: u32 = 2;

/// Exchange rates from the source currency, keyed by destination currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: impl Into<String>, rate: Decimal) {
        self.rates.insert(currency.into().to_uppercase(), rate);
    }

    /// Layer `overrides` on top of the current table.
    pub fn overlay(&mut self, overrides: &HashMap<String, Decimal>) {
        for (currency, rate) in overrides {
            self.insert(currency.clone(), *rate);
        }
    }

    pub fn lookup(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(&currency.to_uppercase()).copied()
    }

    /// Rate for `currency`, or 1 when the table has no entry.
    ///
    /// The fallback is a gap in the mock feed, not a real quote. Callers
    /// that care should check [`RateTable::lookup`] first.
    pub fn rate_for(&self, currency: &str) -> Decimal {
        self.lookup(currency).unwrap_or(Decimal::ONE)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        let mut table = RateTable::new();
        for (currency, rate) in iter {
            table.insert(currency, rate);
        }
        table
    }
}

/// Read the leading `digits[.digits]` prefix of `text` as a decimal.
///
/// Empty text, a bare ".", a leading sign, or an overflowing value all read
/// as zero. Trailing garbage after a numeric prefix is ignored.
pub fn parse_amount(text: &str) -> Decimal {
    let text = text.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    let number = text[..end].trim_end_matches('.');
    if number.is_empty() {
        return Decimal::ZERO;
    }
    let number = if number.starts_with('.') {
        format!("0{}", number)
    } else {
        number.to_string()
    };
    Decimal::from_str(&number).unwrap_or(Decimal::ZERO)
}

/// Amount the recipient gets in `currency`, rounded half-up to cents.
pub fn convert(amount_text: &str, currency: &str, rates: &RateTable) -> Decimal {
    let amount = parse_amount(amount_text);
    amount
        .checked_mul(rates.rate_for(currency))
        .unwrap_or_default()
        .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Transfer fee for `amount_text`. Not rounded; display code rounds.
pub fn fee(amount_text: &str) -> Decimal {
    parse_amount(amount_text)
        .checked_mul(FEE_RATE)
        .unwrap_or_default()
}

pub fn card_surcharge(amount_text: &str) -> Decimal {
    parse_amount(amount_text)
        .checked_mul(CARD_SURCHARGE_RATE)
        .unwrap_or_default()
}

/// What the sender pays in total: amount, transfer fee, and any funding
/// surcharge.
pub fn total_debit(amount_text: &str, method: Option<FundingMethod>) -> Decimal {
    let surcharge = match method {
        Some(FundingMethod::DebitCard) => card_surcharge(amount_text),
        _ => Decimal::ZERO,
    };
    parse_amount(amount_text)
        .checked_add(fee(amount_text))
        .and_then(|sum| sum.checked_add(surcharge))
        .unwrap_or_default()
}

/// Format for display: half-up to cents, trailing zeros dropped, thousands
/// grouped with commas (`6543210` -> `6,543,210`, `15.000` -> `15`).
pub fn format_amount(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn usd_table() -> RateTable {
        let mut t = RateTable::new();
        t.insert("USD", dec("0.00065"));
        t
    }

    #[test]
    fn test_parse_amount_partial_forms() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("-5"), Decimal::ZERO);
        assert_eq!(parse_amount("12."), dec("12"));
        assert_eq!(parse_amount(".5"), dec("0.5"));
        assert_eq!(parse_amount("007.50"), dec("7.5"));
        assert_eq!(parse_amount("12abc"), dec("12"));
    }

    #[test]
    fn test_parse_amount_overflow_reads_as_zero() {
        let huge = "9".repeat(40);
        assert_eq!(parse_amount(&huge), Decimal::ZERO);
    }

    #[test]
    fn test_convert_basic() {
        assert_eq!(convert("1000", "USD", &usd_table()), dec("0.65"));
        assert_eq!(convert("1000", "usd", &usd_table()), dec("0.65"));
    }

    #[test]
    fn test_convert_empty_is_zero() {
        assert_eq!(convert("", "USD", &usd_table()), Decimal::ZERO);
        assert_eq!(convert("", "XYZ", &usd_table()), Decimal::ZERO);
    }

    #[test]
    fn test_convert_rounds_half_up() {
        // 7 * 0.00065 = 0.00455 -> 0.00; 10 * 0.00065 = 0.0065 -> 0.01
        assert_eq!(convert("7", "USD", &usd_table()), dec("0.00"));
        assert_eq!(convert("10", "USD", &usd_table()), dec("0.01"));
    }

    #[test]
    fn test_convert_unknown_currency_uses_unit_rate() {
        assert_eq!(convert("1234.567", "KES", &usd_table()), dec("1234.57"));
    }

    #[test]
    fn test_fee() {
        assert_eq!(fee("1000"), dec("15.00"));
        assert_eq!(fee(""), Decimal::ZERO);
        assert_eq!(fee("."), Decimal::ZERO);
        assert_eq!(fee("0.5"), dec("0.0075"));
    }

    #[test]
    fn test_total_debit_with_card_surcharge() {
        assert_eq!(total_debit("1000", Some(FundingMethod::Wallet)), dec("1015"));
        assert_eq!(total_debit("1000", Some(FundingMethod::DebitCard)), dec("1044"));
        assert_eq!(total_debit("1000", None), dec("1015"));
    }

    #[test]
    fn test_overlay_replaces_and_extends() {
        let mut t = usd_table();
        let mut overrides = HashMap::new();
        overrides.insert("usd".to_string(), dec("0.0007"));
        overrides.insert("KES".to_string(), dec("0.084"));
        t.overlay(&overrides);
        assert_eq!(t.lookup("USD"), Some(dec("0.0007")));
        assert_eq!(t.lookup("KES"), Some(dec("0.084")));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("6543210")), "6,543,210");
        assert_eq!(format_amount(dec("15.000")), "15");
        assert_eq!(format_amount(dec("1234.5")), "1,234.5");
        assert_eq!(format_amount(dec("0.655")), "0.66");
        assert_eq!(format_amount(dec("999")), "999");
        assert_eq!(format_amount(Decimal::ZERO), "0");
    }
}
