//! Income/expense totals and per-category expense breakdown.

use crate::categories::{resolve_color, UNCATEGORIZED};
use crate::transaction::{Transaction, TxnType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn new(income: f64, expenses: f64) -> Self {
        Self { income, expenses }
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }

    /// Zero net counts as surplus.
    pub fn is_surplus(&self) -> bool {
        self.net() >= 0.0
    }
}

/// Sum amounts by direction. Unknown types land in neither bucket.
pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = Totals::default();
    for t in transactions {
        match t.txn_type {
            TxnType::Income => out.income += t.amount,
            TxnType::Expense => out.expenses += t.amount,
            TxnType::Unknown => {}
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: f64,
}

impl CategoryTotal {
    /// Percentage of `grand_total`, 0 when the grand total is 0.
    pub fn share_of(&self, grand_total: f64) -> f64 {
        if grand_total <= 0.0 {
            0.0
        } else {
            self.total / grand_total * 100.0
        }
    }
}

/// Expense totals per category, largest first.
///
/// Equal totals keep first-seen order. Uncategorized expenses are bucketed
/// under [`UNCATEGORIZED`] and only reported when that bucket is positive.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: Vec<CategoryTotal> = Vec::new();
    let mut uncategorized = 0.0;

    for t in transactions {
        if t.txn_type != TxnType::Expense {
            continue;
        }
        match t.category() {
            Some(label) => match buckets.iter_mut().find(|b| b.label == label) {
                Some(b) => b.total += t.amount,
                None => buckets.push(CategoryTotal {
                    label: label.to_string(),
                    total: t.amount,
                }),
            },
            None => uncategorized += t.amount,
        }
    }

    if uncategorized > 0.0 {
        // A custom category literally named "Uncategorized" shares the bucket.
        match buckets.iter_mut().find(|b| b.label == UNCATEGORIZED) {
            Some(b) => b.total += uncategorized,
            None => buckets.push(CategoryTotal {
                label: UNCATEGORIZED.to_string(),
                total: uncategorized,
            }),
        }
    }

    // sort_by is stable
    buckets.sort_by(|a, b| b.total.total_cmp(&a.total));
    buckets
}

/// One chart legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub total: f64,
    pub color: &'static str,
    pub percentage: f64,
}

/// Attach registry colors (by rank) and percentages to a breakdown.
pub fn legend(breakdown: &[CategoryTotal]) -> Vec<LegendEntry> {
    let grand: f64 = breakdown.iter().map(|c| c.total).sum();
    breakdown
        .iter()
        .enumerate()
        .map(|(rank, c)| LegendEntry {
            label: c.label.clone(),
            total: c.total,
            color: resolve_color(&c.label, rank),
            percentage: c.share_of(grand),
        })
        .collect()
}
