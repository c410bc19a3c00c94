//! Category registry: default categories and their display colors/classes.
//!
//! Custom categories (anything the user types) are not registered; they get a
//! color from `EXTRA_COLORS` picked by their rank in the current render, so the
//! same custom category may change color between renders when its rank moves.

/// Reserved label for expenses without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Color used for the `Uncategorized` bucket.
pub const UNCATEGORIZED_COLOR: &str = "#4b5563";

/// Class used for categories not in the registry.
pub const FALLBACK_CLASS: &str = "category-other";

/// Palette for custom categories, indexed by render rank.
pub const EXTRA_COLORS: [&str; 7] = [
    "#f87171", "#a78bfa", "#34d399", "#fbbf24", "#38bdf8", "#fb7185", "#a3e635",
];

/// A registered category with a fixed display color and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub class: &'static str,
    pub color: &'static str,
}

const fn cat(name: &'static str, class: &'static str, color: &'static str) -> DefaultCategory {
    DefaultCategory { name, class, color }
}

pub const DEFAULT_CATEGORIES: [DefaultCategory; 13] = [
    cat("Food & Drinks", "category-food", "#fb923c"),
    cat("Transport", "category-transport", "#60a5fa"),
    cat("Entertainment", "category-entertainment", "#c084fc"),
    cat("Shopping", "category-shopping", "#f472b6"),
    cat("Bills", "category-bills", "#facc15"),
    cat("Subscriptions", "category-subscriptions", "#2dd4bf"),
    cat("Flik", "category-flik", "#f87171"),
    cat("Transfer", "category-transfer", "#d1d5db"),
    cat("Income", "category-income", "#4ade80"),
    cat("Other", "category-other", "#9ca3af"),
    cat("Spotify", "category-spotify", "#0ed51c"),
    cat("Steam", "category-steam", "#66c0f4"),
    cat("Petrol", "category-petrol", "#f59e0b"),
];

/// Exact, case-sensitive registry lookup.
pub fn find_default(name: &str) -> Option<&'static DefaultCategory> {
    DEFAULT_CATEGORIES.iter().find(|c| c.name == name)
}

/// Display color for a category.
///
/// `fallback_index` is the category's rank in the render being built.
pub fn resolve_color(name: &str, fallback_index: usize) -> &'static str {
    if let Some(c) = find_default(name) {
        return c.color;
    }
    if name == UNCATEGORIZED {
        return UNCATEGORIZED_COLOR;
    }
    EXTRA_COLORS[fallback_index % EXTRA_COLORS.len()]
}

/// CSS-style class for a category badge.
pub fn resolve_class(name: &str) -> &'static str {
    find_default(name).map(|c| c.class).unwrap_or(FALLBACK_CLASS)
}

/// Parse `#rrggbb` into components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.strip_prefix('#')?;
    if h.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some((r, g, b))
}
