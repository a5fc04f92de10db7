//! Checkout form state and order payload assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The checkout page owns one `CheckoutForm`. `build_payload` is the single
//! gate before `POST /user/orders`; an `Err` means nothing is sent.

#[cfg(test)]
#[path = "checkout_test.rs"]
mod checkout_test;

use crate::net::types::{Address, CreateOrderPayload};

pub const ADDRESS_REQUIRED: &str = "Please choose a shipping address.";
pub const CART_EMPTY: &str = "Your cart is empty.";
pub const PROOF_REQUIRED: &str = "Please upload proof of payment for bank transfer.";

/// Bank account customers transfer to when paying by bank transfer.
pub const TRANSFER_BANK: &str = "Bank BCA";
pub const TRANSFER_ACCOUNT_NUMBER: &str = "0391886481";
pub const TRANSFER_ACCOUNT_NAME: &str = "PT Pumacon Putra Manunggal";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [Self; 2] = [Self::BankTransfer, Self::CashOnDelivery];

    /// Wire code sent in `payment_method`.
    pub fn code(self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::CashOnDelivery => "cod",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BankTransfer => "Bank Transfer",
            Self::CashOnDelivery => "Cash on Delivery",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub address_id: Option<u64>,
    pub payment_method: PaymentMethod,
    pub notes: String,
    /// Whether a proof-of-payment file has been picked.
    pub has_proof: bool,
}

/// Preselected address: the default one, else the first.
pub fn default_address_id(addresses: &[Address]) -> Option<u64> {
    addresses.iter().find(|a| a.is_default).or_else(|| addresses.first()).map(|a| a.address_id)
}

impl CheckoutForm {
    /// Keep the chosen address if it still exists, otherwise fall back to
    /// the default.
    pub fn sync_addresses(&mut self, addresses: &[Address]) {
        let still_present = self.address_id.is_some_and(|id| addresses.iter().any(|a| a.address_id == id));
        if !still_present {
            self.address_id = default_address_id(addresses);
        }
    }

    /// # Errors
    ///
    /// Returns a display message when the cart is empty, no address is
    /// chosen, or a bank transfer lacks its proof of payment.
    pub fn build_payload(&self, cart_is_empty: bool) -> Result<CreateOrderPayload, &'static str> {
        if cart_is_empty {
            return Err(CART_EMPTY);
        }
        let Some(address_id) = self.address_id else {
            return Err(ADDRESS_REQUIRED);
        };
        if self.payment_method == PaymentMethod::BankTransfer && !self.has_proof {
            return Err(PROOF_REQUIRED);
        }
        Ok(CreateOrderPayload {
            shipping_address_id: address_id,
            payment_method: self.payment_method.code().to_owned(),
            notes: self.notes.trim().to_owned(),
        })
    }
}
