// models.rs - Order line and in-memory order (cart) types

use serde::{Deserialize, Serialize};

use crate::core_types::{LineIndex, Quantity, Rupiah};

// ============================================================
// ORDER LINE
// ============================================================

/// One product entry in the cart.
///
/// `name` is the unique key inside an [`Order`]; `quantity` is always >= 1
/// while the line is part of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub unit_price: Rupiah,
    pub quantity: Quantity,
}

impl OrderLine {
    /// Create a fresh line with quantity 1
    pub fn new(name: impl Into<String>, unit_price: Rupiah) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// unit_price × quantity
    #[inline]
    pub fn line_total(&self) -> Rupiah {
        self.unit_price.saturating_mul(self.quantity as Rupiah)
    }
}

// ============================================================
// ORDER (the cart owned by a storefront session)
// ============================================================

/// Ordered sequence of [`OrderLine`]s, insertion order preserved for display.
///
/// Created empty at session start and discarded with the session. All
/// mutators are infallible: unknown positions are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    lines: Vec<OrderLine>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `name`.
    ///
    /// Increments the existing line when the name is already present,
    /// otherwise appends a new line with quantity 1. The price of an
    /// existing line is left untouched.
    pub fn add_item(&mut self, name: &str, unit_price: Rupiah) {
        match self.lines.iter_mut().find(|line| line.name == name) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                tracing::debug!(item = name, quantity = line.quantity, "order line incremented");
            }
            None => {
                self.lines.push(OrderLine::new(name, unit_price));
                tracing::debug!(item = name, unit_price, "order line added");
            }
        }
    }

    /// Delete the line at `index`. Out of bounds is a no-op.
    pub fn remove_item(&mut self, index: LineIndex) -> Option<OrderLine> {
        if index >= self.lines.len() {
            tracing::debug!(index, len = self.lines.len(), "remove ignored: index out of range");
            return None;
        }
        let removed = self.lines.remove(index);
        tracing::debug!(item = %removed.name, index, "order line removed");
        Some(removed)
    }

    /// Lower the quantity at `index` by one, deleting the line when it
    /// would reach zero. Returns the remaining quantity (0 = line deleted).
    pub fn decrement_item(&mut self, index: LineIndex) -> Option<Quantity> {
        let line = self.lines.get_mut(index)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            return Some(line.quantity);
        }
        self.lines.remove(index);
        Some(0)
    }

    /// Σ unit_price × quantity over all lines
    pub fn total(&self) -> Rupiah {
        self.lines
            .iter()
            .fold(0, |acc: Rupiah, line| acc.saturating_add(line.line_total()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in display order
    #[inline]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Total number of units across all lines (cart badge)
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }
}
