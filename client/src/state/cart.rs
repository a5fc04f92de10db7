//! Shopping cart state for the cart and checkout pages.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use crate::net::types::CartItem;

#[derive(Clone, Debug, PartialEq)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub loading: bool,
    pub error: Option<String>,
    /// Row currently being updated or removed, to disable its controls.
    pub busy_item: Option<u64>,
}

impl Default for CartState {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None, busy_item: None }
    }
}

impl CartState {
    pub fn load(&mut self, items: Vec<CartItem>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.busy_item = None;
        self.error = Some(message);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Apply a confirmed quantity change locally. Zero is ignored.
    pub fn set_quantity(&mut self, cart_id: u64, quantity: u64) {
        if quantity == 0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.cart_id == cart_id) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, cart_id: u64) {
        self.items.retain(|i| i.cart_id != cart_id);
    }
}
