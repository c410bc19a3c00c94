//! bankview-finance: merchant keys and category assignment with auto-propagation

pub mod assign;
pub mod merchant;

pub use assign::{Assignment, assign_category};
pub use merchant::{merchant_key_of, normalize_merchant_key, propagate_category};
