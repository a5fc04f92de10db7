//! Order history state with a status filter.

#[cfg(test)]
#[path = "orders_test.rs"]
mod orders_test;

use crate::net::types::Order;

#[derive(Clone, Debug, PartialEq)]
pub struct OrdersState {
    pub orders: Vec<Order>,
    /// `None` shows every status. Matched case-insensitively.
    pub status_filter: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for OrdersState {
    fn default() -> Self {
        Self { orders: Vec::new(), status_filter: None, loading: true, error: None }
    }
}

impl OrdersState {
    pub fn load(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn set_filter(&mut self, status: &str) {
        let status = status.trim();
        self.status_filter = (!status.is_empty() && !status.eq_ignore_ascii_case("all")).then(|| status.to_owned());
    }

    pub fn visible(&self) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| match &self.status_filter {
                Some(status) => o.order_status.eq_ignore_ascii_case(status),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Distinct statuses present in the loaded orders, in first-seen order.
    pub fn statuses(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for order in &self.orders {
            let status = order.order_status.trim();
            if !status.is_empty() && !out.iter().any(|s| s.eq_ignore_ascii_case(status)) {
                out.push(status.to_owned());
            }
        }
        out
    }
}

/// CSS badge modifier for an order status.
pub fn status_badge(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "delivered" | "completed" | "paid" => "success",
        "canceled" | "cancelled" | "rejected" => "danger",
        "pending" | "unpaid" => "warning",
        _ => "info",
    }
}
