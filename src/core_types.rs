//! Core types used throughout the crate
//!
//! Type aliases that give plain integers a meaning at API boundaries.

/// Whole-unit currency amount (Indonesian Rupiah has no minor unit in use).
///
/// # Constraints:
/// - **Non-negative**: catalog prices and totals are never below zero
/// - **Whole units**: no decimal places are ever stored or displayed
pub type Rupiah = u64;

/// Quantity of a single order line. Always >= 1 while the line exists.
pub type Quantity = u32;

/// Position of a line inside an order, as last rendered by the UI.
pub type LineIndex = usize;

/// Preference key holding the UI theme.
pub const THEME_KEY: &str = "theme";
