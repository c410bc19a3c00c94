//! Filter engine: derives the visible subset of transactions.
//!
//! Rules are ANDed in a fixed order: month, search, type, category. Each rule
//! is a pure predicate, so the order only matters for how early a row is
//! rejected. Output keeps the input order.

use crate::transaction::{Transaction, TxnType};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthFilter {
    #[default]
    All,
    /// `YYYY-MM`
    Month(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Category absent or empty.
    Uncategorized,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub month: MonthFilter,
    pub search: String,
    pub txn_type: TypeFilter,
    pub category: CategoryFilter,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: MonthFilter) -> Self {
        self.month = month;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_type(mut self, txn_type: TypeFilter) -> Self {
        self.txn_type = txn_type;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Lowercased, trimmed search needle; `None` when search is inactive.
    pub fn search_needle(&self) -> Option<String> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() { None } else { Some(needle) }
    }

    /// True when no rule would reject anything.
    pub fn is_default(&self) -> bool {
        self.month == MonthFilter::All
            && self.search_needle().is_none()
            && self.txn_type == TypeFilter::All
            && self.category == CategoryFilter::All
    }
}

impl FromStr for MonthFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let valid = s.is_ascii()
            && s.len() == 7
            && s.as_bytes()[4] == b'-'
            && s[..4].chars().all(|c| c.is_ascii_digit())
            && s[5..].chars().all(|c| c.is_ascii_digit())
            && s[5..].parse::<u32>().map(|m| (1..=12).contains(&m)).unwrap_or(false);
        if !valid {
            bail!("invalid month '{s}' (expected YYYY-MM or 'all')");
        }
        Ok(MonthFilter::Month(s.to_string()))
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => bail!("invalid type '{other}' (expected all, income or expense)"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("empty category filter");
        }
        // Keywords are case-insensitive; names are matched exactly.
        Ok(match s.to_lowercase().as_str() {
            "all" => CategoryFilter::All,
            "uncategorized" => CategoryFilter::Uncategorized,
            _ => CategoryFilter::Named(s.to_string()),
        })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(k) => f.write_str(k),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Uncategorized => f.write_str("uncategorized"),
            CategoryFilter::Named(c) => f.write_str(c),
        }
    }
}

fn month_matches(t: &Transaction, month: &MonthFilter) -> bool {
    match month {
        MonthFilter::All => true,
        // Malformed dates have no key and are excluded.
        MonthFilter::Month(key) => t.month_key().as_deref() == Some(key.as_str()),
    }
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|v| v.to_lowercase().contains(needle))
}

fn search_matches(t: &Transaction, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) => {
            contains_ci(t.description.as_deref(), n)
                || contains_ci(t.payer_payee.as_deref(), n)
                || contains_ci(t.category.as_deref(), n)
        }
    }
}

fn type_matches(t: &Transaction, txn_type: TypeFilter) -> bool {
    match txn_type {
        TypeFilter::All => true,
        TypeFilter::Income => t.txn_type == TxnType::Income,
        TypeFilter::Expense => t.txn_type == TxnType::Expense,
    }
}

fn category_matches(t: &Transaction, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Uncategorized => t.is_uncategorized(),
        CategoryFilter::Named(name) => t.category.as_deref() == Some(name.as_str()),
    }
}

/// Apply `criteria` to `transactions`, preserving order.
pub fn apply<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
) -> Vec<&'a Transaction> {
    let needle = criteria.search_needle();
    transactions
        .iter()
        .filter(|t| month_matches(t, &criteria.month))
        .filter(|t| search_matches(t, needle.as_deref()))
        .filter(|t| type_matches(t, criteria.txn_type))
        .filter(|t| category_matches(t, &criteria.category))
        .collect()
}
