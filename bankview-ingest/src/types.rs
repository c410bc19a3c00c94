use bankview_core::{MonthSummary, Totals, Transaction};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/all-transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllTransactions {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub monthly_summary: Vec<MonthSummary>,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expenses: f64,
    /// Number of statements the backend has on file (not always sent).
    #[serde(default)]
    pub statement_count: Option<u32>,
}

impl AllTransactions {
    pub fn totals(&self) -> Totals {
        Totals::new(self.total_income, self.total_expenses)
    }
}

/// Body of `POST /api/upload`. Only `success`/`error` are relied on; the
/// caller re-fetches everything after a successful upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub id: String,
    pub category: String,
    /// Lets the backend remember the merchant mapping.
    pub description: String,
}

impl CategoryUpdate {
    pub fn for_transaction(t: &Transaction, category: impl Into<String>) -> Self {
        Self {
            id: t.id.clone(),
            category: category.into(),
            description: t.description.clone().unwrap_or_default(),
        }
    }
}
