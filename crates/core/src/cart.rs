//! Cart and cart line types
//!
//! A cart is the pending order for one conversation session. Lines are
//! aggregated by item name: adding an item that already has a line bumps the
//! quantity, and the line total is always recomputed from quantity and unit
//! price so the two can never drift apart.

use serde::{Deserialize, Serialize};

/// One aggregated (item, quantity, total) record within a pending order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Canonical (lowercase) item name
    pub item: String,
    /// Quantity, always positive
    pub quantity: u32,
    /// Unit price in whole currency units
    pub unit_price: u32,
    /// Line total, always `quantity * unit_price`. Widened so the product
    /// of two `u32` values cannot overflow.
    pub line_total: u64,
}

impl CartLine {
    /// Create a line with the total computed from quantity and price
    pub fn new(item: impl Into<String>, quantity: u32, unit_price: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
            unit_price,
            line_total: line_total(quantity, unit_price),
        }
    }
}

fn line_total(quantity: u32, unit_price: u32) -> u64 {
    u64::from(quantity) * u64::from(unit_price)
}

/// Ordered sequence of cart lines, scoped to one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not total quantity)
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add an item, merging into an existing line for the same name.
    ///
    /// Zero quantities are ignored so a line quantity stays positive.
    pub fn add(&mut self, item: &str, quantity: u32, unit_price: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item == item) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.line_total = line_total(line.quantity, line.unit_price);
        } else {
            self.lines.push(CartLine::new(item, quantity, unit_price));
        }
    }

    /// Sum of all line totals
    pub fn grand_total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.line_total))
    }

    /// Remove all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_total() {
        let mut cart = Cart::new();
        cart.add("burger", 2, 200);
        cart.add("coke", 1, 60);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].line_total, 400);
        assert_eq!(cart.lines()[1].line_total, 60);
        assert_eq!(cart.grand_total(), 460);
    }

    #[test]
    fn test_repeated_item_merges() {
        let mut cart = Cart::new();
        cart.add("burger", 1, 200);
        cart.add("burger", 2, 200);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[0].line_total, 600);
    }

    #[test]
    fn test_huge_quantity_does_not_overflow() {
        let mut cart = Cart::new();
        cart.add("burger", u32::MAX, 200);
        assert_eq!(cart.lines()[0].line_total, u64::from(u32::MAX) * 200);
        assert_eq!(cart.grand_total(), u64::from(u32::MAX) * 200);

        // Merging past u32::MAX saturates the quantity instead of wrapping
        cart.add("burger", u32::MAX, 200);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert_eq!(cart.lines()[0].line_total, u64::from(u32::MAX) * 200);
    }

    #[test]
    fn test_zero_quantity_ignored() {
        let mut cart = Cart::new();
        cart.add("burger", 0, 200);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add("coke", 1, 60);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.grand_total(), 0);
    }
}
