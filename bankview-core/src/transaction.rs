//! Transaction and month-summary records as served by the statement backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by statement rows (e.g. `21.03.2024`).
pub const STATEMENT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxnType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
    /// Anything the backend sends that we don't recognize. Never summed.
    #[serde(other)]
    Unknown,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
            TxnType::Unknown => "unknown",
        }
    }
}

/// A single statement row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Stable across sessions; overrides are keyed by it.
    pub id: String,
    /// DD.MM.YYYY, kept as the backend sends it.
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payer_payee: Option<String>,
    /// Always non-negative; direction lives in `txn_type`.
    pub amount: f64,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Running balance after this row, when the statement has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
        txn_type: TxnType,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            description: None,
            payer_payee: None,
            amount,
            txn_type,
            category: None,
            balance: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_payer(mut self, payer_payee: impl Into<String>) -> Self {
        self.payer_payee = Some(payer_payee.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.txn_type == TxnType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.txn_type == TxnType::Expense
    }

    /// Category if set and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category().is_none()
    }

    /// Parsed statement date; `None` for malformed dates.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), STATEMENT_DATE_FORMAT).ok()
    }

    /// `YYYY-MM` key of the statement date.
    pub fn month_key(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%Y-%m").to_string())
    }

    /// Text shown in lists: description, else payer/payee, else "Unknown".
    pub fn display_description(&self) -> &str {
        non_empty(self.description.as_deref())
            .or_else(|| non_empty(self.payer_payee.as_deref()))
            .unwrap_or("Unknown")
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Per-month income/expense aggregate computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthSummary {
    /// `YYYY-MM`, unique per summary list.
    pub month_key: String,
    /// Display label, e.g. "March 2024".
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthSummary {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Trim a user-entered category; empty input is rejected.
pub fn normalize_category_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
