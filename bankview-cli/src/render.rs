//! Plain-text views: stats, month cards, transaction list, category legend.
//!
//! Every renderer returns a `String` so output can be checked without a TTY.

use bankview_core::categories::hex_to_rgb;
use bankview_core::{
    DEFAULT_CATEGORIES, FilterOptions, LegendEntry, MonthCard, Totals, Transaction,
    format_currency, format_eur, format_signed,
};
use crossterm::style::{Color, Stylize};
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct Style {
    pub symbol: String,
    pub color: bool,
}

impl Style {
    pub fn new(symbol: impl Into<String>, color: bool) -> Self {
        Self {
            symbol: symbol.into(),
            color,
        }
    }

    fn money(&self, amount: f64) -> String {
        match self.symbol.as_str() {
            "€" => format_eur(amount),
            symbol => format_currency(amount, symbol),
        }
    }

    fn green(&self, s: String) -> String {
        if self.color { s.green().to_string() } else { s }
    }

    fn red(&self, s: String) -> String {
        if self.color { s.red().to_string() } else { s }
    }

    fn swatch(&self, hex: &str) -> String {
        match (self.color, hex_to_rgb(hex)) {
            (true, Some((r, g, b))) => "■".with(Color::Rgb { r, g, b }).to_string(),
            _ => "■".to_string(),
        }
    }
}

pub fn render_stats(totals: &Totals, style: &Style) -> String {
    let net = totals.net();
    let state = if totals.is_surplus() { "surplus" } else { "deficit" };
    let net_text = style.money(net.abs());
    let net_text = if totals.is_surplus() { style.green(net_text) } else { style.red(net_text) };

    let mut s = String::new();
    let _ = writeln!(s, "Income:   {}", style.green(style.money(totals.income)));
    let _ = writeln!(s, "Expenses: {}", style.red(style.money(totals.expenses)));
    let _ = writeln!(s, "Net:      {net_text} ({state})");
    s
}

pub fn render_month_cards(cards: &[MonthCard], style: &Style) -> String {
    let mut s = String::new();
    for c in cards {
        let marker = if c.active { "*" } else { " " };
        let net = format_signed(c.net, &style.symbol);
        let net = if c.net >= 0.0 { style.green(net) } else { style.red(net) };
        let _ = writeln!(
            s,
            "{marker} {:<16} [{}]  income +{}  expenses -{}  net {}",
            c.label,
            c.month_key,
            style.money(c.income),
            style.money(c.expenses),
            net
        );
    }
    s
}

/// "1 transaction" / "N transactions"
pub fn transaction_count_label(n: usize) -> String {
    format!("{n} transaction{}", if n == 1 { "" } else { "s" })
}

pub fn render_transactions(txns: &[&Transaction], style: &Style) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{}", transaction_count_label(txns.len()));
    for t in txns {
        let badge = match t.category() {
            Some(c) => format!("[{c}]"),
            None => "+ Add category".to_string(),
        };
        let amount = if t.is_expense() {
            style.red(format!("-{}", style.money(t.amount)))
        } else {
            style.green(format!("+{}", style.money(t.amount)))
        };
        let _ = writeln!(
            s,
            "{:<10}  {:<36}  {:<24}  {:<18}  {}  ({})",
            t.date,
            truncate(t.display_description(), 36),
            truncate(t.payer_payee.as_deref().unwrap_or(""), 24),
            badge,
            amount,
            t.id
        );
    }
    s
}

pub fn render_legend(entries: &[LegendEntry], style: &Style) -> String {
    if entries.is_empty() {
        return "No expense data\n".to_string();
    }
    let mut s = String::new();
    for e in entries {
        let _ = writeln!(
            s,
            "{} {:<20} {:>14} ({:.1}%)",
            style.swatch(e.color),
            e.label,
            style.money(e.total),
            e.percentage
        );
    }
    s
}

pub fn render_categories(style: &Style) -> String {
    let mut s = String::new();
    for c in DEFAULT_CATEGORIES.iter() {
        let _ = writeln!(s, "{} {:<16} {}", style.swatch(c.color), c.name, c.color);
    }
    s
}

pub fn render_filter_options(opts: &FilterOptions) -> String {
    let mut s = String::from("Months:\n  all\n");
    for (key, label) in &opts.months {
        let _ = writeln!(s, "  {key}  ({label})");
    }
    s.push_str("Categories:\n  all\n  uncategorized\n");
    for c in &opts.categories {
        let _ = writeln!(s, "  {c}");
    }
    s
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankview_core::TxnType;

    fn plain() -> Style {
        Style::new("€", false)
    }

    #[test]
    fn test_stats_deficit() {
        let out = render_stats(&Totals::new(100.0, 150.5), &plain());
        assert!(out.contains("Income:   100,00 €"));
        assert!(out.contains("Expenses: 150,50 €"));
        assert!(out.contains("Net:      50,50 € (deficit)"));
    }

    #[test]
    fn test_stats_zero_is_surplus() {
        let out = render_stats(&Totals::default(), &plain());
        assert!(out.contains("(surplus)"));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(transaction_count_label(0), "0 transactions");
        assert_eq!(transaction_count_label(1), "1 transaction");
        assert_eq!(transaction_count_label(12), "12 transactions");
    }

    #[test]
    fn test_transactions_badge_and_sign() {
        let a = Transaction::new("a", "01.03.2024", 6.0, TxnType::Expense)
            .with_description("BESTERO")
            .with_category("Food & Drinks");
        let b = Transaction::new("b", "02.03.2024", 2.0, TxnType::Income).with_payer("ERIK H.");
        let out = render_transactions(&[&a, &b], &plain());
        assert!(out.starts_with("2 transactions\n"));
        assert!(out.contains("[Food & Drinks]"));
        assert!(out.contains("-6,00 €"));
        assert!(out.contains("+ Add category"));
        assert!(out.contains("+2,00 €"));
    }

    #[test]
    fn test_empty_legend() {
        assert_eq!(render_legend(&[], &plain()), "No expense data\n");
    }

    #[test]
    fn test_month_card_marks_active() {
        let cards = vec![MonthCard {
            month_key: "2024-03".into(),
            label: "March 2024".into(),
            income: 10.0,
            expenses: 25.0,
            net: -15.0,
            active: true,
        }];
        let out = render_month_cards(&cards, &plain());
        assert!(out.starts_with("* March 2024"));
        assert!(out.contains("net -15,00 €"));
    }

    #[test]
    fn test_custom_symbol() {
        let out = render_stats(&Totals::new(1234.5, 0.0), &Style::new("EUR", false));
        assert!(out.contains("Income:   1.234,50 EUR"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ABCDEFGHIJ", 5), "ABCD…");
    }
}
