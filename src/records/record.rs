use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Amount text as entered by the user.
///
/// The raw string is what gets persisted; arithmetic goes through [`value`]
/// which treats unparsable text as zero so a damaged stored collection can
/// never abort an aggregation.
///
/// [`value`]: Amount::value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Numeric value of the amount; unparsable text contributes zero.
    pub fn value(&self) -> f64 {
        match self.0.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(raw = %self.0, "unparsable amount treated as zero");
                0.0
            }
        }
    }
}

impl From<&str> for Amount {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Amount {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// A single expense or income entry.
///
/// Expenses and incomes share the shape; `label` holds the expense category
/// or the income source. The emoji is captured at recording time and is not
/// re-derived when categories change later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: Uuid,
    pub amount: Amount,
    #[serde(alias = "category", alias = "source")]
    pub label: String,
    pub emoji: String,
    /// ISO 8601 date-time text. Kept as entered; readers parse defensively.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Record {
    pub fn new(
        amount: impl Into<Amount>,
        label: impl Into<String>,
        emoji: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: amount.into(),
            label: label.into(),
            emoji: emoji.into(),
            date: date.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn amount_value(&self) -> f64 {
        self.amount.value()
    }

    /// Parses the stored date, or `None` when the text is not a usable
    /// timestamp. Callers decide whether to log and skip.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        parse_record_date(&self.date)
    }
}

/// Parses an ISO 8601 date-time, tolerating a missing offset or a bare date.
pub fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// User input for a record before construction.
#[derive(Debug, Clone, Copy)]
pub struct RecordDraft<'a> {
    pub amount: &'a str,
    pub label: &'a str,
    pub date: &'a str,
}

/// Validates user input before a [`Record`] is constructed: the amount must
/// be a positive number, the label non-empty, and the date parseable and not
/// in the future. Downstream aggregation still parses defensively and never
/// assumes this ran.
pub fn validate_draft(draft: &RecordDraft<'_>, now: DateTime<Utc>) -> Result<(), CoreError> {
    if draft.label.trim().is_empty() {
        return Err(CoreError::InvalidInput("label must not be empty".into()));
    }
    match draft.amount.trim().parse::<f64>() {
        Ok(value) if value > 0.0 => {}
        Ok(_) => {
            return Err(CoreError::InvalidInput(
                "amount must be greater than zero".into(),
            ))
        }
        Err(_) => {
            return Err(CoreError::InvalidInput(format!(
                "amount '{}' is not a number",
                draft.amount
            )))
        }
    }
    match parse_record_date(draft.date) {
        Some(instant) if instant <= now => Ok(()),
        Some(_) => Err(CoreError::InvalidInput(
            "date must not be in the future".into(),
        )),
        None => Err(CoreError::InvalidInput(format!(
            "date '{}' is not a valid timestamp",
            draft.date
        ))),
    }
}
