//! bankview-core: transaction model, filtering, stats, category registry
//! and local category overrides.

pub mod categories;
pub mod filter;
pub mod format;
pub mod overrides;
pub mod stats;
pub mod store;
pub mod transaction;

pub use categories::{
    DEFAULT_CATEGORIES, DefaultCategory, UNCATEGORIZED, resolve_class, resolve_color,
};
pub use filter::{CategoryFilter, FilterCriteria, MonthFilter, TypeFilter};
pub use format::{format_currency, format_eur, format_signed};
pub use overrides::{OverrideMap, OverrideStore};
pub use stats::{CategoryTotal, LegendEntry, Totals, category_breakdown, legend, totals};
pub use store::{Dashboard, FilterOptions, MonthCard};
pub use transaction::{MonthSummary, Transaction, TxnType, normalize_category_name};
