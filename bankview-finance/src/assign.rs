//! User-driven category assignment on the dashboard.

use bankview_core::{Dashboard, normalize_category_name};
use tracing::info;

use crate::merchant::propagate_category;

/// Outcome of one assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub category: String,
    /// Other transactions that picked up the category by merchant key.
    pub propagated: Vec<String>,
}

/// Set `id`'s category (replacing any previous one) and propagate it to
/// uncategorized transactions from the same merchant.
///
/// Returns `None` when the category is blank or the id is unknown; the
/// dashboard is left untouched in both cases.
pub fn assign_category(
    dashboard: &mut Dashboard,
    id: &str,
    raw_category: &str,
) -> Option<Assignment> {
    let category = normalize_category_name(raw_category)?;
    if !dashboard.set_category(id, &category) {
        return None;
    }
    let propagated = propagate_category(dashboard.transactions_mut(), id, &category);
    info!(id, category = %category, propagated = propagated.len(), "assigned category");
    Some(Assignment {
        id: id.to_string(),
        category,
        propagated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankview_core::{Totals, Transaction, TxnType};

    fn dashboard() -> Dashboard {
        let mut d = Dashboard::new();
        d.replace_all(
            vec![
                Transaction::new("1", "01.01.2024", 1.0, TxnType::Expense).with_payer("ACME 5"),
                Transaction::new("2", "02.01.2024", 2.0, TxnType::Expense).with_payer("ACME 9"),
                Transaction::new("3", "03.01.2024", 3.0, TxnType::Expense)
                    .with_payer("ACME 1")
                    .with_category("Food"),
            ],
            vec![],
            Totals::new(0.0, 6.0),
        );
        d
    }

    fn category_of<'a>(d: &'a Dashboard, id: &str) -> Option<&'a str> {
        d.transaction(id).and_then(|t| t.category.as_deref())
    }

    #[test]
    fn test_acme_example() {
        let mut d = dashboard();
        let a = assign_category(&mut d, "1", "Bills").unwrap();
        assert_eq!(a.propagated, vec!["2"]);
        assert_eq!(category_of(&d, "1"), Some("Bills"));
        assert_eq!(category_of(&d, "2"), Some("Bills"));
        assert_eq!(category_of(&d, "3"), Some("Food"));
    }

    #[test]
    fn test_explicit_assignment_replaces_existing() {
        let mut d = dashboard();
        let a = assign_category(&mut d, "3", "  Groceries ").unwrap();
        assert_eq!(a.category, "Groceries");
        assert_eq!(category_of(&d, "3"), Some("Groceries"));
        // 1 and 2 were uncategorized and share the key
        assert_eq!(a.propagated, vec!["1", "2"]);
    }

    #[test]
    fn test_blank_category_rejected() {
        let mut d = dashboard();
        assert!(assign_category(&mut d, "1", "   ").is_none());
        assert_eq!(category_of(&d, "1"), None);
    }

    #[test]
    fn test_unknown_id_rejected() {
        let mut d = dashboard();
        assert!(assign_category(&mut d, "99", "Bills").is_none());
        assert_eq!(category_of(&d, "2"), None);
    }
}
