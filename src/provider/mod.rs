//! Seams where real infrastructure attaches.
//!
//! The app only talks to reference data, identity checks, and payment
//! settlement through these traits. [`mock`] provides the fixed data the
//! prototype ships with.

pub mod mock;

use crate::flow::draft::Destination;
use crate::flow::{FundingMethod, RateTable};
use chrono::{DateTime, Local, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

/// A supported destination. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub currency: String,
    pub flag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Completed,
    Pending,
}

impl TransactionStatus {
    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
        }
    }
}

/// A past transfer, as shown in history.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub recipient: String,
    pub sent_amount: Decimal,
    pub sent_currency: String,
    pub received_currency: String,
    pub received_amount: Decimal,
    pub status: TransactionStatus,
    pub date: NaiveDate,
    pub country_flag: String,
}

/// Supplies the destination list and exchange rates.
pub trait RateProvider {
    fn countries(&self) -> Vec<Country>;
    fn rates(&self) -> RateTable;
}

/// Supplies past transactions, newest first.
pub trait HistoryProvider {
    fn transactions(&self) -> Vec<Transaction>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KycStep {
    AccountCreated,
    DocumentUploaded,
    SelfieCaptured,
}

impl KycStep {
    /// Completion percentage once this step is done.
    pub fn progress(self) -> u8 {
        match self {
            KycStep::AccountCreated => 25,
            KycStep::DocumentUploaded => 75,
            KycStep::SelfieCaptured => 100,
        }
    }
}

/// Collects identity-verification steps. Returns overall progress (0-100).
pub trait IdentityVerifier {
    fn submit(&mut self, step: KycStep) -> u8;
    fn progress(&self) -> u8;
    fn reset(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub destination: Option<Destination>,
    pub recipient: String,
    pub amount: Decimal,
    pub source_currency: String,
    pub fee: Decimal,
    pub converted_amount: Decimal,
    pub funding_method: Option<FundingMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub id: String,
    pub submitted_at: DateTime<Local>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("no destination selected")]
    MissingDestination,

    #[error("amount must be greater than zero")]
    ZeroAmount,
}

/// Moves the funds and hands back a transfer identifier.
pub trait SettlementService {
    fn submit(&mut self, request: &TransferRequest) -> Result<TransferReceipt, SettlementError>;
}

impl TransferRequest {
    /// The history record this request becomes once settlement accepts it.
    pub fn to_transaction(&self, receipt: &TransferReceipt) -> Transaction {
        let (received_currency, country_flag) = match &self.destination {
            Some(dest) => (dest.currency.clone(), dest.flag.clone()),
            None => (String::new(), String::new()),
        };
        Transaction {
            id: receipt.id.clone(),
            recipient: self.recipient.clone(),
            sent_amount: self.amount,
            sent_currency: self.source_currency.clone(),
            received_currency,
            received_amount: self.converted_amount,
            status: TransactionStatus::Pending,
            date: receipt.submitted_at.date_naive(),
            country_flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kyc_progress_steps() {
        assert_eq!(KycStep::AccountCreated.progress(), 25);
        assert_eq!(KycStep::DocumentUploaded.progress(), 75);
        assert_eq!(KycStep::SelfieCaptured.progress(), 100);
    }

    #[test]
    fn test_request_to_transaction() {
        let request = TransferRequest {
            destination: Some(Destination {
                code: "GB".into(),
                name: "United Kingdom".into(),
                currency: "GBP".into(),
                flag: "🇬🇧".into(),
            }),
            recipient: "Ada Obi".into(),
            amount: Decimal::from(50_000),
            source_currency: "NGN".into(),
            fee: Decimal::from(750),
            converted_amount: Decimal::from_str("25.50").unwrap(),
            funding_method: Some(FundingMethod::Wallet),
        };
        let receipt = TransferReceipt {
            id: "BRG-2026-000001".into(),
            submitted_at: Local::now(),
        };
        let tx = request.to_transaction(&receipt);
        assert_eq!(tx.id, "BRG-2026-000001");
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.received_currency, "GBP");
        assert_eq!(tx.received_amount, Decimal::from_str("25.5").unwrap());
        assert_eq!(tx.sent_currency, "NGN");
        assert_eq!(tx.country_flag, "🇬🇧");
    }
}
