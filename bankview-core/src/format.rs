//! Currency formatting in the Slovenian EUR style: `1.234,56 €`.

/// Format `amount` with `.` thousands, `,` decimals and a trailing symbol.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped},{frac:02} {symbol}")
}

pub fn format_eur(amount: f64) -> String {
    format_currency(amount, "€")
}

/// Net amount with an explicit `+` when non-negative.
pub fn format_signed(amount: f64, symbol: &str) -> String {
    if amount >= 0.0 {
        format!("+{}", format_currency(amount, symbol))
    } else {
        format_currency(amount, symbol)
    }
}
