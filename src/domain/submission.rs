use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Corporate action event classification (ISO 15022 CAEV subset).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// Cash dividend.
    Dvca,
    /// Stock split.
    Splf,
    /// Merger.
    Mrgr,
    /// Rights issue.
    Rhts,
}

impl EventType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "DVCA" => Some(Self::Dvca),
            "SPLF" => Some(Self::Splf),
            "MRGR" => Some(Self::Mrgr),
            "RHTS" => Some(Self::Rhts),
            _ => None,
        }
    }
}

/// Whether holders must, may, or must-choose-among participate.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum MandatoryVoluntary {
    Mand,
    Volu,
    Chos,
}

impl MandatoryVoluntary {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "MAND" => Some(Self::Mand),
            "VOLU" => Some(Self::Volu),
            "CHOS" => Some(Self::Chos),
            _ => None,
        }
    }
}

/// How an election option settles.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Cash,
    Secu,
    Laps,
}

impl OptionType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CASH" => Some(Self::Cash),
            "SECU" => Some(Self::Secu),
            "LAPS" => Some(Self::Laps),
            _ => None,
        }
    }
}

/// A positive monetary amount.
///
/// Wraps `rust_decimal::Decimal` so that rates can never be zero or
/// negative once constructed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, IntakeError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(IntakeError::Validation(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = IntakeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The instrument the action applies to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingSecurity {
    pub isin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

/// Key dates of the event lifecycle.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDates {
    pub announcement_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ex_date: Option<NaiveDate>,
    pub record_date: NaiveDate,
    pub payment_date: NaiveDate,
}

/// Optional dividend rate attached to the event.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GrossDividendRate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDetails {
    pub dates: EventDates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_dividend_rate: Option<GrossDividendRate>,
}

/// One election a holder can make against the event.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ElectionOption {
    pub option_number: String,
    pub option_type: OptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_option: Option<bool>,
}

/// A fully validated corporate-action submission.
///
/// Instances are produced by [`crate::domain::validate::validate`]; the
/// invariants (valid enums, valid ISIN, at least one option) hold by
/// construction. Its canonical serialization is the serde_json encoding
/// of this struct, which is what gets encrypted at rest.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub event_id: String,
    pub event_type: EventType,
    pub mandatory_voluntary: MandatoryVoluntary,
    pub underlying_security: UnderlyingSecurity,
    pub details: SubmissionDetails,
    pub options: Vec<ElectionOption>,
}
