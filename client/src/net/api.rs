//! REST API helpers for communicating with the storefront backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call resolves to `ApiError::Unavailable`, since
//! the bearer token only exists in the browser.
//!
//! ERROR HANDLING
//! ==============
//! All helpers return `Result<_, ApiError>`. Status and body decoding go
//! through `decode_response`, so 401 detection and `{ "error": ... }`
//! extraction behave identically for every endpoint.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    AddToCartRequest, Address, AddressInput, AddressListResponse, CartItem, CartListResponse, CartQuantityRequest,
    CreateOrderPayload, CustomerProfile, LoginRequest, LoginResponse, MessageResponse, NewsArticle,
    NewsDetailResponse, NewsListResponse, Order, OrderListResponse,
    PasswordChangeRequest, Product, ProductDetailResponse, ProductListResponse, ProfileUpdateRequest,
    ProfileUpdateResponse, RegisterRequest, parse_profile,
};
use crate::config::ApiConfig;

/// The slice of the API the session store depends on.
///
/// Kept narrow so session behavior can be exercised against a stub backend.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /user/login`.
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// `POST /user/register`.
    async fn register(&self, input: &RegisterRequest) -> Result<MessageResponse, ApiError>;

    /// `GET /user/profile` with the given bearer token.
    async fn fetch_profile(&self, token: &str) -> Result<CustomerProfile, ApiError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A proof-of-payment upload attached to a new order.
#[derive(Clone, Debug)]
pub struct ProofOfPayment {
    pub name: String,
    #[cfg(feature = "hydrate")]
    pub file: web_sys::File,
}

/// HTTP client for the storefront REST API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpApi {
    config: ApiConfig,
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

fn product_endpoint(sku: &str) -> String {
    format!("/products/{}", sku.trim())
}

fn news_list_endpoint(page: usize, limit: usize) -> String {
    format!("/news?page={}&limit={limit}", page.max(1))
}

fn news_endpoint(news_id: &str) -> String {
    format!("/news/{}", news_id.trim())
}

fn address_endpoint(address_id: u64) -> String {
    format!("/user/addresses/{address_id}")
}

fn cart_item_endpoint(cart_id: u64) -> String {
    format!("/user/cart/{cart_id}")
}

/// Turn a status + raw body into a typed result.
///
/// Empty success bodies decode as `{}` so acknowledgement endpoints that reply
/// with no content still satisfy `MessageResponse`.
#[cfg(any(test, feature = "hydrate"))]
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status, body));
    }
    let raw = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(format!("{err:?}"))
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send<T, B>(&self, method: Method, path: &str, token: Option<&str>, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = self.config.endpoint(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Delete => Request::delete(&url),
            };
            if let Some(token) = token {
                builder = builder.header("Authorization", &bearer_header(token));
            }
            let resp = match body {
                Some(body) => {
                    builder
                        .json(body)
                        .map_err(|e| ApiError::Network(e.to_string()))?
                        .send()
                        .await
                }
                None => builder.send().await,
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            decode_response(status, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, token, body);
            Err(ApiError::Unavailable)
        }
    }

    // =========================================================================
    // CATALOG
    // =========================================================================

    /// `GET /products`: all public products plus their categories.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn list_products(&self) -> Result<ProductListResponse, ApiError> {
        self.send(Method::Get, "/products", None, None::<&()>).await
    }

    /// `GET /products/{sku}`. `Ok(None)` when the server answers without a product.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn product_detail(&self, sku: &str) -> Result<Option<Product>, ApiError> {
        let resp: ProductDetailResponse = self.send(Method::Get, &product_endpoint(sku), None, None::<&()>).await?;
        Ok(resp.product)
    }

    // =========================================================================
    // NEWS
    // =========================================================================

    /// `GET /news?page={page}&limit={limit}`: one page of posts plus the
    /// category sidebar.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn list_news(&self, page: usize, limit: usize) -> Result<NewsListResponse, ApiError> {
        self.send(Method::Get, &news_list_endpoint(page, limit), None, None::<&()>).await
    }

    /// `GET /news/{id}`. `Ok(None)` when the server answers without a post.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn news_detail(&self, news_id: &str) -> Result<Option<NewsArticle>, ApiError> {
        let resp: NewsDetailResponse = self.send(Method::Get, &news_endpoint(news_id), None, None::<&()>).await?;
        Ok(resp.news)
    }

    // =========================================================================
    // PROFILE
    // =========================================================================

    /// `PUT /user/profile`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn update_profile(&self, token: &str, input: &ProfileUpdateRequest) -> Result<ProfileUpdateResponse, ApiError> {
        self.send(Method::Put, "/user/profile", Some(token), Some(input)).await
    }

    /// `PUT /user/password`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the current password is rejected.
    pub async fn change_password(&self, token: &str, input: &PasswordChangeRequest) -> Result<MessageResponse, ApiError> {
        self.send(Method::Put, "/user/password", Some(token), Some(input)).await
    }

    // =========================================================================
    // ADDRESSES
    // =========================================================================

    /// `GET /user/addresses`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn list_addresses(&self, token: &str) -> Result<Vec<Address>, ApiError> {
        let resp: AddressListResponse = self.send(Method::Get, "/user/addresses", Some(token), None::<&()>).await?;
        Ok(resp.addresses)
    }

    /// `POST /user/addresses`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    pub async fn add_address(&self, token: &str, input: &AddressInput) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/user/addresses", Some(token), Some(input)).await
    }

    /// `PUT /user/addresses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    pub async fn update_address(&self, token: &str, address_id: u64, input: &AddressInput) -> Result<MessageResponse, ApiError> {
        self.send(Method::Put, &address_endpoint(address_id), Some(token), Some(input)).await
    }

    // =========================================================================
    // CART
    // =========================================================================

    /// `GET /user/cart`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn list_cart(&self, token: &str) -> Result<Vec<CartItem>, ApiError> {
        let resp: CartListResponse = self.send(Method::Get, "/user/cart", Some(token), None::<&()>).await?;
        Ok(resp.cart_items)
    }

    /// `POST /user/cart`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    pub async fn add_to_cart(&self, token: &str, input: &AddToCartRequest) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/user/cart", Some(token), Some(input)).await
    }

    /// `PUT /user/cart/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    pub async fn update_cart_quantity(&self, token: &str, cart_id: u64, quantity: u64) -> Result<MessageResponse, ApiError> {
        let body = CartQuantityRequest { quantity };
        self.send(Method::Put, &cart_item_endpoint(cart_id), Some(token), Some(&body)).await
    }

    /// `DELETE /user/cart/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails.
    pub async fn remove_cart_item(&self, token: &str, cart_id: u64) -> Result<MessageResponse, ApiError> {
        self.send(Method::Delete, &cart_item_endpoint(cart_id), Some(token), None::<&()>).await
    }

    // =========================================================================
    // ORDERS
    // =========================================================================

    /// `GET /user/orders`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the request fails or the body is malformed.
    pub async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ApiError> {
        let resp: OrderListResponse = self.send(Method::Get, "/user/orders", Some(token), None::<&()>).await?;
        Ok(resp.orders)
    }

    /// `POST /user/orders` as multipart: `order_data` JSON plus optional
    /// `proof_of_payment` file.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if the form cannot be built or the request fails.
    pub async fn create_order(
        &self,
        token: &str,
        payload: &CreateOrderPayload,
        proof: Option<ProofOfPayment>,
    ) -> Result<MessageResponse, ApiError> {
        let order_data = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let form = web_sys::FormData::new().map_err(|e| js_error(&e))?;
            form.append_with_str("order_data", &order_data).map_err(|e| js_error(&e))?;
            if let Some(proof) = proof {
                form.append_with_blob_and_filename("proof_of_payment", &proof.file, &proof.name)
                    .map_err(|e| js_error(&e))?;
            }
            let resp = Request::post(&self.config.endpoint("/user/orders"))
                .header("Authorization", &bearer_header(token))
                .body(form)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            decode_response(status, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, order_data, proof);
            Err(ApiError::Unavailable)
        }
    }
}

impl AuthApi for HttpApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send(Method::Post, "/user/login", None, Some(credentials)).await
    }

    async fn register(&self, input: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.send(Method::Post, "/user/register", None, Some(input)).await
    }

    async fn fetch_profile(&self, token: &str) -> Result<CustomerProfile, ApiError> {
        let raw: serde_json::Value = self.send(Method::Get, "/user/profile", Some(token), None::<&()>).await?;
        parse_profile(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
