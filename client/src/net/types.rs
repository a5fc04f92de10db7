//! Shared REST DTOs for the storefront/API boundary.
//!
//! DESIGN
//! ======
//! The backend mixes naming styles: auth and catalog payloads are snake_case,
//! while cart, address, and order rows are serialized straight from database
//! models in PascalCase. These types accept both spellings through serde
//! aliases so pages never deal with raw JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /user/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /user/login`.
///
/// Only `token` is relied upon; the identity fields are informational because
/// the session always re-reads the profile after login.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub token: String,
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "hasAddress")]
    pub has_address: Option<bool>,
}

/// Body of `POST /user/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: Option<String>,
}

/// Failure body shape: `{ "error": ... }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
}

// =============================================================================
// PROFILE
// =============================================================================

/// The signed-in customer as returned by `GET /user/profile`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerProfile {
    #[serde(alias = "customerID", alias = "CustomerID")]
    pub customer_id: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub detail: Option<CustomerDetail>,
    pub addresses: Vec<Address>,
    #[serde(rename = "hasAddress")]
    pub has_address: Option<bool>,
}

impl CustomerProfile {
    /// "First Last" when the detail record is present, otherwise the email.
    pub fn display_name(&self) -> String {
        self.detail
            .as_ref()
            .map(|d| format!("{} {}", d.first_name, d.last_name).trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.email.clone())
    }

    /// Whether the customer has at least one saved address.
    ///
    /// Falls back to the embedded address list when the server omits the flag.
    pub fn has_any_address(&self) -> bool {
        self.has_address.unwrap_or(!self.addresses.is_empty())
    }
}

/// Personal details nested under `detail` in profile payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetail {
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub join_date: Option<String>,
    pub birthday: Option<String>,
}

/// Extract the profile from `{customer}`, `{user}`, or a bare object.
///
/// # Errors
///
/// Returns a serde error if the selected object does not match the profile shape.
pub fn parse_profile(value: serde_json::Value) -> Result<CustomerProfile, serde_json::Error> {
    let inner = match value {
        serde_json::Value::Object(mut map) => {
            if let Some(customer) = map.remove("customer").filter(|v| !v.is_null()) {
                customer
            } else if let Some(user) = map.remove("user").filter(|v| !v.is_null()) {
                user
            } else {
                serde_json::Value::Object(map)
            }
        }
        other => other,
    };
    serde_json::from_value(inner)
}

/// Body of `PUT /user/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileUpdateRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// Response of `PUT /user/profile`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileUpdateResponse {
    pub message: Option<String>,
    pub customer: Option<CustomerProfile>,
}

/// Body of `PUT /user/password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

// =============================================================================
// ADDRESSES
// =============================================================================

/// A saved shipping address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(alias = "AddressID", deserialize_with = "deserialize_u64_from_number")]
    pub address_id: u64,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Street")]
    pub street: String,
    #[serde(alias = "Additional")]
    pub additional: String,
    #[serde(alias = "DistrictCity")]
    pub district_city: String,
    #[serde(alias = "Province")]
    pub province: String,
    #[serde(alias = "PostCode")]
    pub post_code: String,
    #[serde(alias = "IsDefault")]
    pub is_default: bool,
}

impl Address {
    /// Single-line rendering used in checkout and address cards.
    pub fn one_line(&self) -> String {
        [
            self.street.as_str(),
            self.additional.as_str(),
            self.district_city.as_str(),
            self.province.as_str(),
            self.post_code.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Body of `POST /user/addresses` and `PUT /user/addresses/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AddressInput {
    pub title: String,
    pub street: String,
    pub additional: String,
    pub district_city: String,
    pub province: String,
    pub post_code: String,
    pub is_default: bool,
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        Self {
            title: address.title.clone(),
            street: address.street.clone(),
            additional: address.additional.clone(),
            district_city: address.district_city.clone(),
            province: address.province.clone(),
            post_code: address.post_code.clone(),
            is_default: address.is_default,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AddressListResponse {
    pub addresses: Vec<Address>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// A catalog product.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(alias = "ProductSKU")]
    pub product_sku: String,
    #[serde(alias = "Title")]
    pub title: String,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    #[serde(alias = "Descriptions")]
    pub descriptions: Option<String>,
    #[serde(alias = "RegularPrice")]
    pub regular_price: Option<f64>,
    #[serde(alias = "Stock")]
    pub stock: Option<i64>,
}

impl Product {
    /// Primary image: the first gallery image, then the list thumbnail.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str).or(self.image_url.as_deref())
    }
}

/// A catalog category used by the product list filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCategory {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub category_id: u64,
    pub category_name: String,
}

/// Response of `GET /products`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub categories: Vec<ProductCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProductDetailResponse {
    pub product: Option<Product>,
}

// =============================================================================
// NEWS
// =============================================================================

/// A news post as listed on `GET /news`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsSummary {
    pub news_id: String,
    pub title: String,
    pub image: Option<String>,
    pub publication_date: Option<String>,
    pub author_name: Option<String>,
    pub content_snippet: Option<String>,
}

impl NewsSummary {
    pub fn title_or_default(&self) -> &str {
        if self.title.trim().is_empty() { "Untitled Post" } else { &self.title }
    }

    pub fn author_or_default(&self) -> &str {
        self.author_name.as_deref().filter(|a| !a.trim().is_empty()).unwrap_or("Admin")
    }
}

/// A news category with the number of published posts in it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsCategory {
    pub category_id: String,
    pub category_name: String,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub post_count: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsPagination {
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub current_page: u64,
    #[serde(deserialize_with = "deserialize_u64_from_number")]
    pub total_pages: u64,
}

/// Response of `GET /news?page=N&limit=M`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsListResponse {
    pub news: Vec<NewsSummary>,
    pub categories: Vec<NewsCategory>,
    pub pagination: Option<NewsPagination>,
}

/// A full news post from `GET /news/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    pub news_id: String,
    pub title: String,
    pub image: Option<String>,
    pub content: String,
    pub publication_date: Option<String>,
    pub author_name: Option<String>,
    pub category_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NewsDetailResponse {
    pub news: Option<NewsArticle>,
}

// =============================================================================
// CART
// =============================================================================

/// A row in the signed-in customer's cart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    #[serde(alias = "CartID", deserialize_with = "deserialize_u64_from_number")]
    pub cart_id: u64,
    #[serde(alias = "ProductSKU")]
    pub product_sku: String,
    #[serde(alias = "Image")]
    pub image: Option<String>,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "RegularPrice")]
    pub regular_price: f64,
    #[serde(alias = "Quantity", deserialize_with = "deserialize_u64_from_number")]
    pub quantity: u64,
}

impl CartItem {
    /// Line total (`price * quantity`).
    #[allow(clippy::cast_precision_loss)]
    pub fn line_total(&self) -> f64 {
        self.regular_price * self.quantity as f64
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CartListResponse {
    pub cart_items: Vec<CartItem>,
}

/// Body of `POST /user/cart`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddToCartRequest {
    pub product_sku: String,
    pub quantity: u64,
}

/// Body of `PUT /user/cart/{id}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CartQuantityRequest {
    pub quantity: u64,
}

// =============================================================================
// ORDERS
// =============================================================================

/// A placed order as listed under the account page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(alias = "OrderID")]
    pub order_id: String,
    #[serde(alias = "OrderDateTime")]
    pub order_date_time: Option<String>,
    #[serde(alias = "PaymentMethod")]
    pub payment_method: String,
    #[serde(alias = "OrderStatus")]
    pub order_status: String,
    #[serde(alias = "GrandTotal")]
    pub grand_total: f64,
    #[serde(alias = "Notes")]
    pub notes: Option<String>,
    #[serde(alias = "OrderItems")]
    pub order_items: Vec<OrderItem>,
}

/// A line in a placed order, snapshotting product title and price.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    #[serde(alias = "ProductSKU")]
    pub product_sku: String,
    #[serde(alias = "Quantity", deserialize_with = "deserialize_u64_from_number")]
    pub quantity: u64,
    #[serde(alias = "PriceAtOrder")]
    pub price_at_order: f64,
    #[serde(alias = "ProductTitleSnapshot")]
    pub product_title_snapshot: String,
    #[serde(alias = "ProductImageSnapshot")]
    pub product_image_snapshot: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct OrderListResponse {
    pub orders: Vec<Order>,
}

/// JSON part (`order_data`) of the multipart `POST /user/orders` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateOrderPayload {
    pub shipping_address_id: u64,
    pub payment_method: String,
    pub notes: String,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn deserialize_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= 0.0
                && float <= u64::MAX as f64
            {
                return Ok(float as u64);
            }
            Err(D::Error::custom("expected non-negative integer"))
        }
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("expected integer string, got {raw:?}"))),
        serde_json::Value::Null => Ok(0),
        _ => Err(D::Error::custom("expected number")),
    }
}
