//! Storefront session
//!
//! ```text
//! ┌──────────┐    ┌────────────┐    ┌───────────┐    ┌──────────┐
//! │ UI event │───▶│ Storefront │───▶│ Formatter │───▶│ Handoff  │
//! │ (click)  │    │  (Order)   │    │  (text)   │    │  (link)  │
//! └──────────┘    └────────────┘    └───────────┘    └──────────┘
//! ```
//!
//! One owned instance per session, passed to UI handlers explicitly.
//! Handlers run to completion one at a time (`&mut self`).

use std::sync::Arc;

use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::config::ShopConfig;
use crate::core_types::{LineIndex, Quantity};
use crate::error::ShopError;
use crate::formatter::OrderFormatter;
use crate::handoff::{Handoff, HandoffSink, WhatsAppLink, contact_message, reservation_message};
use crate::models::{Order, OrderLine};
use crate::preference::{self, PreferenceStore, Theme};
use crate::validation::{
    ContactRequest, ReservationRequest, validate_booking_date, validate_contact,
    validate_reservation_with,
};

pub struct Storefront {
    order: Order,
    catalog: Catalog,
    config: ShopConfig,
    formatter: OrderFormatter,
    handoff: Handoff,
    preferences: Box<dyn PreferenceStore>,
}

impl Storefront {
    pub fn new(
        config: ShopConfig,
        catalog: Catalog,
        preferences: Box<dyn PreferenceStore>,
        sink: Arc<dyn HandoffSink>,
    ) -> Self {
        let handoff = Handoff::new(
            WhatsAppLink::new(&config.whatsapp_number),
            config.handoff_delay(),
            sink,
        );
        Self {
            order: Order::new(),
            catalog,
            formatter: OrderFormatter::new(config.currency.clone()),
            config,
            handoff,
            preferences,
        }
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Add-to-cart button. Price comes from the catalog; unknown items are
    /// ignored and reported with `false`.
    pub fn add_to_cart(&mut self, name: &str) -> bool {
        match self.catalog.price_of(name) {
            Some(price) => {
                self.order.add_item(name, price);
                true
            }
            None => {
                tracing::warn!(item = name, "add-to-cart ignored: not in catalog");
                false
            }
        }
    }

    /// "−" button next to a line: one unit fewer, line deleted at zero.
    /// Returns the remaining quantity, `None` for a stale index.
    pub fn decrement_in_cart(&mut self, index: LineIndex) -> Option<Quantity> {
        self.order.decrement_item(index)
    }

    pub fn remove_from_cart(&mut self, index: LineIndex) -> Option<OrderLine> {
        self.order.remove_item(index)
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Cart summary as rendered next to the cart
    pub fn cart_summary(&self) -> String {
        self.formatter.summary(&self.order)
    }

    /// Hand the order off. The cart is kept so the customer can reopen it.
    pub async fn checkout(&mut self) -> Result<String, ShopError> {
        if self.order.is_empty() {
            tracing::info!("checkout blocked: cart is empty");
            return Err(ShopError::EmptyOrder);
        }
        let message = self.formatter.message(&self.order);
        tracing::info!(
            lines = self.order.len(),
            total = self.order.total(),
            "checkout"
        );
        Ok(self.handoff.send(&message).await)
    }

    // ========================================================================
    // Forms
    // ========================================================================

    pub async fn submit_reservation(&self, req: &ReservationRequest) -> Result<String, ShopError> {
        let violations = validate_reservation_with(req, &self.config.business_hours);
        if !violations.is_empty() {
            return Err(ShopError::ValidationFailure(violations));
        }
        tracing::info!(guests = %req.guests.trim(), date = %req.date.trim(), "reservation submitted");
        Ok(self.handoff.send(&reservation_message(req)).await)
    }

    /// Like [`Self::submit_reservation`], additionally enforcing the
    /// booking window relative to `today`.
    pub async fn submit_reservation_on(
        &self,
        req: &ReservationRequest,
        today: NaiveDate,
    ) -> Result<String, ShopError> {
        let mut violations = validate_reservation_with(req, &self.config.business_hours);
        if !req.date.trim().is_empty() {
            if let Err(v) = validate_booking_date(&req.date, today, self.config.booking_window_days)
            {
                violations.push(v);
            }
        }
        if !violations.is_empty() {
            return Err(ShopError::ValidationFailure(violations));
        }
        Ok(self.handoff.send(&reservation_message(req)).await)
    }

    pub async fn submit_contact(&self, req: &ContactRequest) -> Result<String, ShopError> {
        let violations = validate_contact(req);
        if !violations.is_empty() {
            return Err(ShopError::ValidationFailure(violations));
        }
        Ok(self.handoff.send(&contact_message(req)).await)
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn theme(&self) -> Result<Theme, ShopError> {
        Ok(preference::load_theme(self.preferences.as_ref())?)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, ShopError> {
        Ok(preference::toggle_theme(self.preferences.as_mut())?)
    }
}
