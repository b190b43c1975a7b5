//! Domain types for the backend REST API.
//!
//! These mirror the backend's JSON payloads. Two normalizations happen here
//! rather than deeper in the call stack: prices arrive as numbers or
//! `"$49"`-style strings and become [`Money`], and catalog ids arrive as
//! numbers or numeric strings and become [`ProductId`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use neon_bazaar_core::{Money, OrderId, ProductId, TransactionId, UserId};

// =============================================================================
// Catalog
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id (the catalog endpoint stringifies it on the wire).
    #[serde(deserialize_with = "lenient_product_id")]
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Price in the base currency.
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Technology tags.
    #[serde(rename = "techStack", default)]
    pub tech_stack: Vec<String>,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the remote cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id; unique per line.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the base currency.
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Units of this product in the cart; never observable as 0.
    pub quantity: u32,
}

impl From<&Product> for CartLine {
    /// A fresh line for a product, at quantity 1.
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }
}

/// Reference to a cart line sent to financial endpoints.
///
/// Only the id and quantity travel; the backend re-prices from its own
/// records so a tampered client cannot change what is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartItemRef {
    /// Product id.
    pub product_id: ProductId,
    /// Units purchased.
    pub quantity: u32,
}

// =============================================================================
// Wishlist
// =============================================================================

/// One saved wishlist entry. Presence is boolean; there is no quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Product id; unique per entry.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Price in the base currency.
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Product> for WishlistEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            tags: product.tech_stack.clone(),
        }
    }
}

/// Result of the wishlist toggle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WishlistToggle {
    /// Whether the product is on the wishlist after the toggle.
    pub liked: bool,
}

// =============================================================================
// Auth & account
// =============================================================================

/// Bearer credential returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme; always `bearer`.
    pub token_type: String,
}

/// The authenticated user's profile, including the wallet balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id.
    pub id: UserId,
    /// Account email.
    pub email: String,
    /// Admin flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Role label (`admin`, `moderator`, `user`).
    #[serde(default)]
    pub role: Option<String>,
    /// Optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Wallet balance in UZS. Never guessed client-side; always refetched.
    #[serde(default)]
    pub balance: Decimal,
    /// Account creation time.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Number of completed orders.
    #[serde(default)]
    pub orders_count: u32,
    /// Lifetime spend in USD.
    #[serde(default)]
    pub total_spent_usd: Decimal,
}

// =============================================================================
// Orders & payments
// =============================================================================

/// A completed or pending order in the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order id.
    pub id: OrderId,
    /// Title of the purchased product.
    #[serde(default)]
    pub product_title: Option<String>,
    /// Image of the purchased product.
    #[serde(default)]
    pub product_image: Option<String>,
    /// Charged amount in USD.
    pub amount_usd: Decimal,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// A wallet transaction (top-up or purchase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction id.
    pub id: TransactionId,
    /// Transaction kind (`TOPUP` or `PURCHASE`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Currency code of `amount`.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn default_currency() -> String {
    "UZS".to_string()
}

/// Response of a successful top-up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopUpReceipt {
    /// Confirmation message from the backend.
    #[serde(default)]
    pub message: String,
    /// New wallet balance in UZS.
    pub balance: Decimal,
}

/// Response of a successful wallet payment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WalletReceipt {
    /// Confirmation message from the backend.
    #[serde(default)]
    pub message: String,
    /// New wallet balance in UZS after the purchase.
    pub new_balance: Decimal,
    /// Total charged in UZS.
    #[serde(default)]
    pub total_uzs: Decimal,
    /// Number of items settled.
    #[serde(default)]
    pub items_purchased: u32,
}

/// External payment-gateway redirect returned by the link generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentLink {
    /// Gateway URL the user is redirected to; settlement happens there.
    pub payment_url: String,
    /// Pending order created for this payment.
    pub order_id: OrderId,
}

// =============================================================================
// Wire helpers
// =============================================================================

/// Accept a product id as either a JSON number or a numeric string.
fn lenient_product_id<'de, D>(deserializer: D) -> Result<ProductId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(ProductId::new(n)),
        Raw::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(ProductId::new)
            .map_err(serde::de::Error::custom),
    }
}
