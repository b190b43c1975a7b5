//! The backend API client.
//!
//! A thin wrapper over `reqwest` that attaches the bearer credential,
//! normalizes backend error bodies, and caches catalog reads.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use neon_bazaar_core::ProductId;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{
    AccessToken, CartItemRef, CartLine, Order, PaymentLink, Product, TopUpReceipt, Transaction,
    UserProfile, WalletReceipt, WishlistEntry, WishlistToggle,
};

const CATALOG_CACHE_KEY: &str = "products";
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Client for the Neon Bazaar backend API.
///
/// Cheaply cloneable via `Arc`. Holds the session's bearer credential;
/// requests made without one simply omit the `Authorization` header, and
/// callers are expected to short-circuit doomed mutations locally instead
/// of sending them (see the session crate).
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
    catalog: Cache<&'static str, Vec<Product>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        let catalog = Cache::builder()
            .max_capacity(8)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
                token: RwLock::new(None),
                catalog,
            }),
        })
    }

    // =========================================================================
    // Credential management
    // =========================================================================

    /// Install the bearer credential used for authenticated calls.
    pub fn set_token(&self, token: SecretString) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the bearer credential.
    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a bearer credential is present.
    ///
    /// Presence does not imply validity; a rejected credential surfaces as
    /// [`ApiError::Unauthorized`] on the next call.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The current bearer credential, if any.
    ///
    /// Exposed so a host application can persist the credential across
    /// sessions; treat the value as sensitive.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and decode a JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(builder).await?;

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse backend response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// Send a request, check the status, and ignore the response body.
    async fn execute_unit(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.execute_raw(builder).await.map(drop)
    }

    async fn execute_raw(&self, builder: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = self.authorize(builder).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            debug!(status = %status, "Backend returned non-success status");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_detail(&body),
            });
        }

        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.execute(self.inner.http.get(url)).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        self.execute(self.inner.http.post(url).json(body)).await
    }

    // =========================================================================
    // Catalog (cached - read-only data)
    // =========================================================================

    /// Get the product catalog.
    ///
    /// Results are cached for 5 minutes; use [`Self::invalidate_catalog`]
    /// to force a refresh. This endpoint requires no credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(products) = self.inner.catalog.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get("api/products").await?;

        self.inner
            .catalog
            .insert(CATALOG_CACHE_KEY, products.clone())
            .await;

        Ok(products)
    }

    /// Drop the cached catalog.
    pub async fn invalidate_catalog(&self) {
        self.inner.catalog.invalidate(CATALOG_CACHE_KEY).await;
    }

    // =========================================================================
    // Cart (not cached - mutable state)
    // =========================================================================

    /// Get the authenticated user's cart, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<Vec<CartLine>, ApiError> {
        self.get("api/cart").await
    }

    /// Add a product to the cart, or increase its quantity if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_cart_line(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("api/cart")?;
        let body = json!({ "product_id": product_id, "quantity": quantity });
        self.execute_unit(self.inner.http.post(url).json(&body))
            .await
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_cart_line(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/cart/{product_id}"))?;
        let body = json!({ "quantity": quantity });
        self.execute_unit(self.inner.http.put(url).json(&body))
            .await
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_cart_line(&self, product_id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/cart/{product_id}"))?;
        self.execute_unit(self.inner.http.delete(url)).await
    }

    // =========================================================================
    // Wishlist (not cached - mutable state)
    // =========================================================================

    /// Get the authenticated user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_wishlist(&self) -> Result<Vec<WishlistEntry>, ApiError> {
        self.get("api/wishlist").await
    }

    /// Toggle a product's wishlist membership.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn toggle_wishlist(&self, product_id: ProductId) -> Result<WishlistToggle, ApiError> {
        let url = self.endpoint(&format!("api/wishlist/{product_id}"))?;
        self.execute(self.inner.http.post(url)).await
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_wishlist(&self, product_id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/wishlist/{product_id}"))?;
        self.execute_unit(self.inner.http.delete(url)).await
    }

    // =========================================================================
    // Auth & account
    // =========================================================================

    /// Exchange credentials for a bearer token.
    ///
    /// The token is returned, not installed; call [`Self::set_token`] to
    /// adopt it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] on bad credentials, or another
    /// error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AccessToken, ApiError> {
        let url = self.endpoint("api/auth/login")?;
        // OAuth2 password flow: form-encoded, email travels as `username`.
        let form = [("username", email), ("password", password.expose_secret())];
        self.execute(self.inner.http.post(url).form(&form)).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserProfile, ApiError> {
        let body = json!({ "email": email, "password": password.expose_secret() });
        self.post_json("api/auth/register", &body).await
    }

    /// Get the authenticated user's profile, including the wallet balance.
    ///
    /// The backend reads the balance fresh on every call; this is the only
    /// way the client learns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.get("api/auth/me").await
    }

    /// Get the authenticated user's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("api/orders/my").await
    }

    /// Get the authenticated user's wallet transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn fetch_my_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get("api/transactions/my").await
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Add funds to the wallet.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the backend's message if the top-up is
    /// rejected, or another error if the request fails.
    #[instrument(skip(self))]
    pub async fn top_up(&self, amount_uzs: Decimal) -> Result<TopUpReceipt, ApiError> {
        let body = json!({ "amount_uzs": amount_uzs });
        self.post_json("api/balance/topup", &body).await
    }

    /// Settle the given cart lines from the wallet balance.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the backend's message (e.g. insufficient
    /// balance) if the payment is declined, or another error if the request
    /// fails.
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn pay_with_wallet(&self, items: &[CartItemRef]) -> Result<WalletReceipt, ApiError> {
        let body = json!({ "cart_items": items });
        self.post_json("api/orders/process-wallet-payment", &body)
            .await
    }

    /// Create an external payment-gateway link for the given cart lines.
    ///
    /// Settlement happens on the gateway; the returned URL is handed to the
    /// user as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn generate_payment_link(
        &self,
        lines: &[CartLine],
        total_usd: Decimal,
    ) -> Result<PaymentLink, ApiError> {
        let items: Vec<serde_json::Value> = lines
            .iter()
            .map(|line| json!({ "title": line.title, "image": line.image }))
            .collect();
        let body = json!({ "cart_items": items, "total_usd": total_usd });
        self.post_json("api/orders/generate-payment-link", &body)
            .await
    }
}

/// Pull the human-readable message out of a backend error body.
///
/// The backend wraps errors as `{"detail": …}`; anything else falls back to
/// a truncated copy of the raw body.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str().map(String::from))
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_error_body() {
        assert_eq!(
            extract_detail(r#"{"detail": "Mahsulot topilmadi"}"#),
            "Mahsulot topilmadi"
        );
    }

    #[test]
    fn test_extract_detail_fallback() {
        assert_eq!(extract_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(extract_detail(r#"{"error": "nope"}"#), r#"{"error": "nope"}"#);
    }
}
