//! Order summary rendering for handoff
//!
//! Turns an [`Order`] into the text that ends up in the prefilled message.
//! Deterministic and side-effect free.

use crate::models::Order;
use crate::money::{CurrencyFormat, format_currency};

/// Header placed above the lines in the handoff message
pub const ORDER_HEADER: &str = "Order Details:";

/// Render `"{name} x{qty} = {line total}"` lines, a blank line, then
/// `"Total: {grand total}"`, with plain `,`-grouped digits.
///
/// ```rust
/// use kedai::formatter::format_order;
/// use kedai::models::Order;
///
/// let mut order = Order::new();
/// order.add_item("Latte", 25000);
/// order.add_item("Latte", 25000);
/// assert_eq!(format_order(&order), "Latte x2 = 50,000\n\nTotal: 50,000");
/// ```
pub fn format_order(order: &Order) -> String {
    OrderFormatter::new(CurrencyFormat::plain()).summary(order)
}

/// Order renderer bound to a currency display format.
#[derive(Debug, Clone, Default)]
pub struct OrderFormatter {
    currency: CurrencyFormat,
}

impl OrderFormatter {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    /// Line listing + grand total
    pub fn summary(&self, order: &Order) -> String {
        let lines = order
            .lines()
            .iter()
            .map(|line| {
                format!(
                    "{} x{} = {}",
                    line.name,
                    line.quantity,
                    format_currency(line.line_total(), &self.currency)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nTotal: {}",
            lines,
            format_currency(order.total(), &self.currency)
        )
    }

    /// Full handoff message: header line followed by [`Self::summary`]
    pub fn message(&self, order: &Order) -> String {
        format!("{}\n{}", ORDER_HEADER, self.summary(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte_and_croissant() -> Order {
        let mut order = Order::new();
        order.add_item("Latte", 25000);
        order.add_item("Latte", 25000);
        order.add_item("Croissant", 18000);
        order
    }

    #[test]
    fn test_format_single_line() {
        let mut order = Order::new();
        order.add_item("Latte", 25000);
        order.add_item("Latte", 25000);

        assert_eq!(format_order(&order), "Latte x2 = 50,000\n\nTotal: 50,000");
    }

    #[test]
    fn test_format_multiple_lines() {
        assert_eq!(
            format_order(&latte_and_croissant()),
            "Latte x2 = 50,000\nCroissant x1 = 18,000\n\nTotal: 68,000"
        );
    }

    #[test]
    fn test_message_with_currency_prefix() {
        let formatter = OrderFormatter::new(CurrencyFormat::default());
        assert_eq!(
            formatter.message(&latte_and_croissant()),
            "Order Details:\nLatte x2 = Rp 50,000\nCroissant x1 = Rp 18,000\n\nTotal: Rp 68,000"
        );
    }

    #[test]
    fn test_format_empty_order() {
        // Checkout blocks empty orders; the formatter itself stays total
        assert_eq!(format_order(&Order::new()), "\n\nTotal: 0");
    }
}
