//! kedai - storefront rules for a single-page coffee shop
//!
//! Cart, checkout handoff, reservation validation and the theme flag,
//! exposed as plain function calls that any UI layer can drive.
//!
//! # Modules
//!
//! - [`core_types`] - Type aliases (Rupiah, Quantity, LineIndex)
//! - [`models`] - OrderLine and Order (the cart)
//! - [`money`] - Price parsing and grouped currency display
//! - [`formatter`] - Order summary / handoff message rendering
//! - [`validation`] - Reservation and contact form rules
//! - [`catalog`] - Menu items, tabs, gallery filter, search
//! - [`handoff`] - WhatsApp link composition and delivery sinks
//! - [`preference`] - Persisted light/dark theme
//! - [`storefront`] - Session state wiring everything together

// Core types - must be first!
pub mod core_types;

pub mod catalog;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handoff;
pub mod logging;
pub mod models;
pub mod money;
pub mod preference;
pub mod storefront;
pub mod validation;

// Convenient re-exports at crate root
pub use catalog::{Catalog, CatalogError, MenuItem};
pub use config::{AppConfig, LogRotation, ShopConfig};
pub use core_types::{LineIndex, Quantity, Rupiah};
pub use error::ShopError;
pub use formatter::{OrderFormatter, format_order};
pub use handoff::{ConsoleSink, Handoff, HandoffSink, MemorySink, WhatsAppLink};
pub use models::{Order, OrderLine};
pub use money::{CurrencyFormat, MoneyError};
pub use preference::{FileStore, MemoryStore, PreferenceStore, Theme};
pub use storefront::Storefront;
pub use validation::{
    BusinessHours, ContactRequest, InvertedHours, ReservationRequest, Violation, validate_reservation,
};
