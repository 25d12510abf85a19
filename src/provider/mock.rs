//! Fixed reference data and stand-in collaborators.

use super::*;
use chrono::Datelike;
use rand::RngExt;
use std::collections::HashMap;

const COUNTRIES: &[(&str, &str, &str, &str)] = &[
    ("US", "United States", "USD", "🇺🇸"),
    ("GB", "United Kingdom", "GBP", "🇬🇧"),
    ("NG", "Nigeria", "NGN", "🇳🇬"),
    ("KE", "Kenya", "KES", "🇰🇪"),
    ("IN", "India", "INR", "🇮🇳"),
    ("PH", "Philippines", "PHP", "🇵🇭"),
];

/// NGN -> currency, as (currency, mantissa, scale).
const RATES: &[(&str, i64, u32)] = &[
    ("USD", 65, 5),
    ("GBP", 51, 5),
    ("EUR", 59, 5),
    ("CAD", 88, 5),
];

/// Mock rate feed. Entries in `overrides` replace or extend the built-in
/// table; they usually come from the `[rates]` config section.
#[derive(Debug, Clone, Default)]
pub struct MockRateProvider {
    overrides: HashMap<String, Decimal>,
}

impl MockRateProvider {
    pub fn new(overrides: HashMap<String, Decimal>) -> Self {
        Self { overrides }
    }
}

impl RateProvider for MockRateProvider {
    fn countries(&self) -> Vec<Country> {
        COUNTRIES
            .iter()
            .map(|(code, name, currency, flag)| Country {
                code: code.to_string(),
                name: name.to_string(),
                currency: currency.to_string(),
                flag: flag.to_string(),
            })
            .collect()
    }

    fn rates(&self) -> RateTable {
        let mut table: RateTable = RATES
            .iter()
            .map(|(currency, num, scale)| (currency.to_string(), Decimal::new(*num, *scale)))
            .collect();
        table.overlay(&self.overrides);
        table
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockHistoryProvider;

impl HistoryProvider for MockHistoryProvider {
    fn transactions(&self) -> Vec<Transaction> {
        let seed = [
            ("1", "John Doe", 500, "NGN", 775_000, TransactionStatus::Completed, (2024, 1, 15), "🇺🇸"),
            ("2", "Sarah Wilson", 250, "KES", 37_500, TransactionStatus::Pending, (2024, 1, 14), "🇰🇪"),
            ("3", "Mike Johnson", 1000, "INR", 83_000, TransactionStatus::Completed, (2024, 1, 12), "🇮🇳"),
        ];
        seed.into_iter()
            .filter_map(|(id, recipient, sent, to_ccy, received, status, (y, m, d), flag)| {
                Some(Transaction {
                    id: id.to_string(),
                    recipient: recipient.to_string(),
                    sent_amount: Decimal::from(sent),
                    sent_currency: "USD".to_string(),
                    received_currency: to_ccy.to_string(),
                    received_amount: Decimal::from(received),
                    status,
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                    country_flag: flag.to_string(),
                })
            })
            .collect()
    }
}

/// Records step completion without looking at any documents.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityVerifier {
    progress: u8,
}

impl IdentityVerifier for MockIdentityVerifier {
    fn submit(&mut self, step: KycStep) -> u8 {
        self.progress = self.progress.max(step.progress());
        tracing::info!(?step, progress = self.progress, "kyc step recorded");
        self.progress
    }

    fn progress(&self) -> u8 {
        self.progress
    }

    fn reset(&mut self) {
        self.progress = 0;
    }
}

/// Accepts every well-formed request and fabricates a `BRG-<year>-<nnnnnn>`
/// reference.
#[derive(Debug, Clone, Default)]
pub struct MockSettlement;

impl SettlementService for MockSettlement {
    fn submit(&mut self, request: &TransferRequest) -> Result<TransferReceipt, SettlementError> {
        if request.destination.is_none() {
            return Err(SettlementError::MissingDestination);
        }
        if request.amount.is_zero() {
            return Err(SettlementError::ZeroAmount);
        }
        let submitted_at = Local::now();
        let mut rng = rand::rng();
        let serial: u32 = rng.random_range(0..1_000_000);
        let id = format!("BRG-{}-{:06}", submitted_at.year(), serial);
        Ok(TransferReceipt { id, submitted_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request(amount: &str) -> TransferRequest {
        TransferRequest {
            destination: Some(Destination {
                code: "US".into(),
                name: "United States".into(),
                currency: "USD".into(),
                flag: "🇺🇸".into(),
            }),
            recipient: "John Doe".into(),
            amount: Decimal::from_str(amount).unwrap(),
            source_currency: "NGN".into(),
            fee: Decimal::ZERO,
            converted_amount: Decimal::ZERO,
            funding_method: None,
        }
    }

    #[test]
    fn test_countries_are_fixed() {
        let countries = MockRateProvider::default().countries();
        assert_eq!(countries.len(), 6);
        assert_eq!(countries[0].code, "US");
        assert_eq!(countries[0].currency, "USD");
        assert!(countries.iter().any(|c| c.currency == "NGN"));
    }

    #[test]
    fn test_rate_table_and_overrides() {
        let rates = MockRateProvider::default().rates();
        assert_eq!(rates.lookup("USD"), Some(Decimal::from_str("0.00065").unwrap()));
        assert_eq!(rates.lookup("KES"), None);

        let mut overrides = HashMap::new();
        overrides.insert("KES".to_string(), Decimal::from_str("0.084").unwrap());
        let rates = MockRateProvider::new(overrides).rates();
        assert_eq!(rates.lookup("KES"), Some(Decimal::from_str("0.084").unwrap()));
        assert_eq!(rates.len(), 5);
    }

    #[test]
    fn test_history_seed() {
        let history = MockHistoryProvider.transactions();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].status, TransactionStatus::Pending);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_identity_progress_never_goes_back() {
        let mut kyc = MockIdentityVerifier::default();
        assert_eq!(kyc.submit(KycStep::DocumentUploaded), 75);
        assert_eq!(kyc.submit(KycStep::AccountCreated), 75);
        assert_eq!(kyc.submit(KycStep::SelfieCaptured), 100);
        kyc.reset();
        assert_eq!(kyc.progress(), 0);
    }

    #[test]
    fn test_settlement_issues_reference() {
        let receipt = MockSettlement.submit(&request("1000")).unwrap();
        assert!(receipt.id.starts_with("BRG-"));
        assert_eq!(receipt.id.len(), "BRG-2026-000000".len());
    }

    #[test]
    fn test_settlement_rejects_bad_requests() {
        assert_eq!(MockSettlement.submit(&request("0")), Err(SettlementError::ZeroAmount));
        let mut req = request("10");
        req.destination = None;
        assert_eq!(MockSettlement.submit(&req), Err(SettlementError::MissingDestination));
    }
}
