//! Schema validation for raw submissions.
//!
//! [`validate`] is a pure function: it checks every rule, collects every
//! violation, and only then decides. A rejected submission reports all of
//! its offending field paths together rather than failing on the first.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::submission::{
    Amount, ElectionOption, EventDates, EventType, GrossDividendRate, MandatoryVoluntary,
    OptionType, Submission, SubmissionDetails, UnderlyingSecurity,
};

/// One validation violation, addressed by JSON field path.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Lenient mirror of the submission JSON shape.
///
/// Every field is optional so that missing data is reported by [`validate`]
/// with a proper field path instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSubmission {
    pub event_id: Option<String>,
    pub event_type: Option<String>,
    pub mandatory_voluntary: Option<String>,
    pub underlying_security: Option<RawSecurity>,
    pub details: Option<RawDetails>,
    pub options: Option<Vec<RawOption>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSecurity {
    pub isin: Option<String>,
    pub ticker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDetails {
    pub dates: Option<RawDates>,
    pub gross_dividend_rate: Option<RawRate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDates {
    pub announcement_date: Option<String>,
    pub ex_date: Option<String>,
    pub record_date: Option<String>,
    pub payment_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRate {
    pub amount: Option<Value>,
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOption {
    pub option_number: Option<String>,
    pub option_type: Option<String>,
    pub default_option: Option<bool>,
}

/// Validates a raw submission against the full schema.
///
/// Returns the typed [`Submission`] on success, or every violation found
/// on failure. No partial acceptance: one bad field rejects the whole
/// submission.
pub fn validate(raw: &RawSubmission) -> Result<Submission, Vec<FieldError>> {
    let mut errors = Vec::new();

    let event_id = match raw.event_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Some(id.to_string()),
        _ => {
            errors.push(FieldError::new(
                "eventId",
                "official corporate action event id is required",
            ));
            None
        }
    };

    let event_type = parse_enum(
        raw.event_type.as_deref(),
        EventType::parse,
        "eventType",
        "must be one of DVCA, SPLF, MRGR, RHTS",
        &mut errors,
    );

    let mandatory_voluntary = parse_enum(
        raw.mandatory_voluntary.as_deref(),
        MandatoryVoluntary::parse,
        "mandatoryVoluntary",
        "must be one of MAND, VOLU, CHOS",
        &mut errors,
    );

    let underlying_security = validate_security(raw.underlying_security.as_ref(), &mut errors);
    let details = validate_details(raw.details.as_ref(), &mut errors);
    let options = validate_options(raw.options.as_deref(), &mut errors);

    match (
        event_id,
        event_type,
        mandatory_voluntary,
        underlying_security,
        details,
        options,
    ) {
        (
            Some(event_id),
            Some(event_type),
            Some(mandatory_voluntary),
            Some(underlying_security),
            Some(details),
            Some(options),
        ) if errors.is_empty() => Ok(Submission {
            event_id,
            event_type,
            mandatory_voluntary,
            underlying_security,
            details,
            options,
        }),
        _ => Err(errors),
    }
}

fn parse_enum<T>(
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    path: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match value.and_then(parse) {
        Some(parsed) => Some(parsed),
        None => {
            errors.push(FieldError::new(path, message));
            None
        }
    }
}

/// 2 uppercase letters, 9 uppercase alphanumerics, 1 digit.
pub fn is_valid_isin(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 12
        && bytes[..2].iter().all(|b| b.is_ascii_uppercase())
        && bytes[2..11]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && bytes[11].is_ascii_digit()
}

fn validate_security(
    raw: Option<&RawSecurity>,
    errors: &mut Vec<FieldError>,
) -> Option<UnderlyingSecurity> {
    match raw.and_then(|s| s.isin.as_deref()) {
        Some(isin) if is_valid_isin(isin) => Some(UnderlyingSecurity {
            isin: isin.to_string(),
            ticker: raw.and_then(|s| s.ticker.clone()),
        }),
        _ => {
            errors.push(FieldError::new("underlyingSecurity.isin", "invalid ISIN format"));
            None
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn required_date(
    value: Option<&str>,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    match value {
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(date),
            None => {
                errors.push(FieldError::new(path, "invalid date"));
                None
            }
        },
        None => {
            errors.push(FieldError::new(path, "is required"));
            None
        }
    }
}

fn validate_details(
    raw: Option<&RawDetails>,
    errors: &mut Vec<FieldError>,
) -> Option<SubmissionDetails> {
    let dates = raw.and_then(|d| d.dates.as_ref());

    let announcement_date = required_date(
        dates.and_then(|d| d.announcement_date.as_deref()),
        "details.dates.announcementDate",
        errors,
    );
    let record_date = required_date(
        dates.and_then(|d| d.record_date.as_deref()),
        "details.dates.recordDate",
        errors,
    );
    let payment_date = required_date(
        dates.and_then(|d| d.payment_date.as_deref()),
        "details.dates.paymentDate",
        errors,
    );

    let ex_date = match dates.and_then(|d| d.ex_date.as_deref()) {
        Some(raw_date) => match parse_date(raw_date) {
            Some(date) => Some(date),
            None => {
                errors.push(FieldError::new("details.dates.exDate", "invalid date"));
                None
            }
        },
        None => None,
    };

    let gross_dividend_rate =
        validate_rate(raw.and_then(|d| d.gross_dividend_rate.as_ref()), errors);

    match (announcement_date, record_date, payment_date) {
        (Some(announcement_date), Some(record_date), Some(payment_date)) => {
            Some(SubmissionDetails {
                dates: EventDates {
                    announcement_date,
                    ex_date,
                    record_date,
                    payment_date,
                },
                gross_dividend_rate,
            })
        }
        _ => None,
    }
}

fn validate_rate(
    raw: Option<&RawRate>,
    errors: &mut Vec<FieldError>,
) -> Option<GrossDividendRate> {
    let raw = raw?;

    let amount = match raw.amount.as_ref().and_then(non_empty_amount) {
        Some(value) => match value
            .ok()
            .and_then(|decimal| Amount::new(decimal).ok())
        {
            Some(amount) => Some(amount),
            None => {
                errors.push(FieldError::new(
                    "details.grossDividendRate.amount",
                    "amount must be positive",
                ));
                None
            }
        },
        None => None,
    };

    let currency = match raw.currency.as_deref() {
        // Empty string means "not provided", matching the form contract.
        None | Some("") => None,
        Some(code) if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) => {
            Some(code.to_string())
        }
        Some(_) => {
            errors.push(FieldError::new(
                "details.grossDividendRate.currency",
                "currency must be 3 uppercase letters",
            ));
            None
        }
    };

    Some(GrossDividendRate { amount, currency })
}

/// Maps a raw JSON amount to `Some(parse result)` unless it is absent
/// (null or empty string, which the form submits for untouched inputs).
fn non_empty_amount(value: &Value) -> Option<Result<Decimal, ()>> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().parse::<Decimal>().map_err(|_| ())),
        Value::Number(n) => Some(n.to_string().parse::<Decimal>().map_err(|_| ())),
        _ => Some(Err(())),
    }
}

fn validate_options(
    raw: Option<&[RawOption]>,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<ElectionOption>> {
    let raw = match raw {
        Some(options) if !options.is_empty() => options,
        _ => {
            errors.push(FieldError::new("options", "at least one option is required"));
            return None;
        }
    };

    let mut options = Vec::with_capacity(raw.len());
    for (index, option) in raw.iter().enumerate() {
        let option_number = match option.option_number.as_deref() {
            Some(number) if !number.trim().is_empty() => Some(number.to_string()),
            _ => {
                errors.push(FieldError::new(
                    format!("options[{index}].optionNumber"),
                    "option number is required",
                ));
                None
            }
        };

        let option_type = match option.option_type.as_deref().and_then(OptionType::parse) {
            Some(option_type) => Some(option_type),
            None => {
                errors.push(FieldError::new(
                    format!("options[{index}].optionType"),
                    "must be one of CASH, SECU, LAPS",
                ));
                None
            }
        };

        if let (Some(option_number), Some(option_type)) = (option_number, option_type) {
            options.push(ElectionOption {
                option_number,
                option_type,
                default_option: option.default_option,
            });
        }
    }

    (options.len() == raw.len()).then_some(options)
}
