use super::*;

fn item(cart_id: u64, price: f64, quantity: u64) -> CartItem {
    CartItem {
        cart_id,
        product_sku: format!("SKU{cart_id}"),
        title: format!("Item {cart_id}"),
        regular_price: price,
        quantity,
        ..CartItem::default()
    }
}

fn loaded() -> CartState {
    let mut cart = CartState::default();
    cart.load(vec![item(1, 150_000.0, 2), item(2, 75_000.0, 1)]);
    cart
}

#[test]
fn default_cart_is_loading_and_empty() {
    let cart = CartState::default();
    assert!(cart.loading);
    assert!(cart.is_empty());
}

#[test]
fn subtotal_sums_line_totals() {
    let cart = loaded();
    assert_eq!(cart.subtotal(), 375_000.0);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn set_quantity_updates_matching_row_only() {
    let mut cart = loaded();
    cart.set_quantity(2, 4);
    assert_eq!(cart.items[1].quantity, 4);
    assert_eq!(cart.items[0].quantity, 2);
    cart.set_quantity(99, 4);
    assert_eq!(cart.item_count(), 6);
}

#[test]
fn set_quantity_ignores_zero() {
    let mut cart = loaded();
    cart.set_quantity(1, 0);
    assert_eq!(cart.items[0].quantity, 2);
}

#[test]
fn remove_drops_row() {
    let mut cart = loaded();
    cart.remove(1);
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.subtotal(), 75_000.0);
}

#[test]
fn fail_records_error_and_clears_busy_row() {
    let mut cart = loaded();
    cart.busy_item = Some(1);
    cart.fail("Failed to load cart items.".to_owned());
    assert_eq!(cart.busy_item, None);
    assert_eq!(cart.error.as_deref(), Some("Failed to load cart items."));
}
