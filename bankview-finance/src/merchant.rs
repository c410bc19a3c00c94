//! Merchant keys and one-shot category propagation.
//!
//! Statement descriptions for the same counterpart differ mostly in digits
//! (card refs, dates, invoice numbers). Stripping digits and normalizing
//! case/whitespace gives a key that groups them.

use bankview_core::Transaction;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("invalid digits regex"))
}

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("invalid ws regex"))
}

/// Normalize free text into a merchant key.
///
/// Trim, uppercase, drop digits, collapse whitespace, trim again.
/// Returns `None` when nothing is left.
pub fn normalize_merchant_key(text: &str) -> Option<String> {
    let upper = text.trim().to_uppercase();
    let no_digits = digits_re().replace_all(&upper, "");
    let collapsed = ws_re().replace_all(&no_digits, " ");
    let key = collapsed.trim();
    if key.is_empty() { None } else { Some(key.to_string()) }
}

/// Key for a transaction: description, else payer/payee.
pub fn merchant_key_of(t: &Transaction) -> Option<String> {
    let source = t
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .or(t.payer_payee.as_deref())?;
    normalize_merchant_key(source)
}

/// Give `category` to every other uncategorized transaction that shares the
/// merchant key of `source_id`.
///
/// Already categorized rows are never touched. Returns the ids that changed.
pub fn propagate_category(
    transactions: &mut [Transaction],
    source_id: &str,
    category: &str,
) -> Vec<String> {
    let Some(key) = transactions
        .iter()
        .find(|t| t.id == source_id)
        .and_then(merchant_key_of)
    else {
        return Vec::new();
    };

    let mut changed = Vec::new();
    for t in transactions.iter_mut() {
        if t.id == source_id || !t.is_uncategorized() {
            continue;
        }
        if merchant_key_of(t).as_deref() == Some(key.as_str()) {
            t.category = Some(category.to_string());
            changed.push(t.id.clone());
        }
    }

    debug!(merchant = %key, category, count = changed.len(), "propagated category");
    changed
}
