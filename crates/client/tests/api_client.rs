#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use neon_bazaar_client::{ApiClient, ApiConfig, ApiError};
use neon_bazaar_core::{Money, ProductId};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(&ApiConfig::new(base_url)).unwrap();
    (server, client)
}

fn password() -> SecretString {
    "hunter2".to_string().into()
}

// ── Auth tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_posts_form_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("username=user%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-123",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;

    let token = client.login("user@example.com", &password()).await.unwrap();
    assert_eq!(token.access_token, "token-123");
}

#[tokio::test]
async fn test_login_rejected_maps_to_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "bad credentials"})),
        )
        .mount(&server)
        .await;

    let result = client.login("user@example.com", &password()).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_bearer_header_attached_after_set_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.set_token("token-123".to_string().into());
    assert!(client.is_authenticated());
    client.fetch_cart().await.unwrap();
}

// ── Cart tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_cart_normalizes_price_forms() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Starter Kit", "price": "$49", "image": "", "category": "templates", "quantity": 1},
            {"id": 2, "title": "Dashboard", "price": 19.99, "image": "", "category": "templates", "quantity": 2}
        ])))
        .mount(&server)
        .await;

    let cart = client.fetch_cart().await.unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart[0].price, Money::parse_lenient("49").unwrap());
    assert_eq!(cart[1].price, Money::parse_lenient("19.99").unwrap());
}

#[tokio::test]
async fn test_add_cart_line_sends_product_id_and_quantity() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/cart"))
        .and(body_string_contains("\"product_id\":5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    client.add_cart_line(ProductId::new(5), 1).await.unwrap();
}

// ── Catalog cache tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_catalog_served_from_cache_on_second_read() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "title": "Starter Kit", "description": "", "price": "$49",
             "image": "", "category": "templates", "techStack": ["react"], "features": []}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let first = client.fetch_products().await.unwrap();
    let second = client.fetch_products().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].id, ProductId::new(1));
}

#[tokio::test]
async fn test_catalog_invalidate_forces_refetch() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    client.fetch_products().await.unwrap();
    client.invalidate_catalog().await;
    client.fetch_products().await.unwrap();
}

// ── Wishlist tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_wishlist_returns_membership() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/wishlist/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liked": true})))
        .mount(&server)
        .await;

    let toggle = client.toggle_wishlist(ProductId::new(3)).await.unwrap();
    assert!(toggle.liked);
}

// ── Error mapping tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_backend_detail_surfaced_in_api_error() {
    let (server, client) = setup().await;
    client.set_token("token-123".to_string().into());

    Mock::given(method("POST"))
        .and(path("/api/balance/topup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Summa 0 dan katta bo'lishi kerak"
        })))
        .mount(&server)
        .await;

    let result = client.top_up(Decimal::from(0)).await;

    match result {
        Err(ApiError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Summa 0 dan katta bo'lishi kerak");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_token_maps_to_unauthorized() {
    let (server, client) = setup().await;
    client.set_token("stale".to_string().into());

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .mount(&server)
        .await;

    let result = client.fetch_profile().await;
    assert!(result.as_ref().is_err_and(ApiError::is_unauthorized), "got: {result:?}");
}
