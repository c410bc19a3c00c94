//! Dashboard state: the loaded transactions, month summaries and the
//! active filter, plus the views derived from them.
//!
//! Everything derived (filtered list, stats, breakdown, month cards) is
//! recomputed on demand from the current state; nothing is cached.

use crate::filter::{self, FilterCriteria, MonthFilter};
use crate::stats::{self, CategoryTotal, Totals};
use crate::transaction::{MonthSummary, Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    transactions: Vec<Transaction>,
    months: Vec<MonthSummary>,
    server_totals: Totals,
    criteria: FilterCriteria,
}

/// A month summary as shown on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCard {
    pub month_key: String,
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    /// This month is the active month filter.
    pub active: bool,
}

/// Values available to the filter pickers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// `(month_key, label)` in summary order.
    pub months: Vec<(String, String)>,
    /// Distinct set categories, first-seen order.
    pub categories: Vec<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to freshly loaded data. The filter is kept.
    pub fn replace_all(
        &mut self,
        transactions: Vec<Transaction>,
        months: Vec<MonthSummary>,
        server_totals: Totals,
    ) {
        self.transactions = transactions;
        self.months = months;
        self.server_totals = server_totals;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Mutable access for category operations. The slice can't grow or shrink.
    pub fn transactions_mut(&mut self) -> &mut [Transaction] {
        &mut self.transactions
    }

    pub fn months(&self) -> &[MonthSummary] {
        &self.months
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Set one transaction's category. Unknown ids are a no-op (returns false).
    pub fn set_category(&mut self, id: &str, category: &str) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.category = Some(category.to_string());
                true
            }
            None => false,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Select `month_key`, or go back to all months if it was already selected.
    pub fn toggle_month(&mut self, month_key: &str) {
        self.criteria.month = match &self.criteria.month {
            MonthFilter::Month(k) if k == month_key => MonthFilter::All,
            _ => MonthFilter::Month(month_key.to_string()),
        };
    }

    pub fn filtered(&self) -> Vec<&Transaction> {
        filter::apply(&self.transactions, &self.criteria)
    }

    /// Totals for the current view.
    ///
    /// Without an active filter these are the backend's totals; otherwise
    /// they are recomputed over the filtered rows.
    pub fn stats(&self) -> Totals {
        if self.criteria.is_default() {
            self.server_totals
        } else {
            stats::totals(self.filtered())
        }
    }

    pub fn breakdown(&self) -> Vec<CategoryTotal> {
        stats::category_breakdown(self.filtered())
    }

    pub fn month_cards(&self) -> Vec<MonthCard> {
        self.months
            .iter()
            .map(|m| MonthCard {
                month_key: m.month_key.clone(),
                label: m.month.clone(),
                income: m.income,
                expenses: m.expenses,
                net: m.net(),
                active: matches!(&self.criteria.month, MonthFilter::Month(k) if *k == m.month_key),
            })
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        let mut categories: Vec<String> = Vec::new();
        for c in self.transactions.iter().filter_map(|t| t.category()) {
            if !categories.iter().any(|seen| seen == c) {
                categories.push(c.to_string());
            }
        }
        FilterOptions {
            months: self
                .months
                .iter()
                .map(|m| (m.month_key.clone(), m.month.clone()))
                .collect(),
            categories,
        }
    }
}
