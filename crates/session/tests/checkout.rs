#![allow(clippy::unwrap_used)]
// Scenario tests for `Checkout` against a mock backend.
//
// Financial operations are the one place failures must be loud: the
// backend's message travels to the caller verbatim, and success is only
// reported after the balance has been refreshed from the server.

use rust_decimal::Decimal;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use neon_bazaar_client::{ApiClient, ApiConfig};
use neon_bazaar_session::{CheckoutError, Notice, Session};

// ── Helpers ─────────────────────────────────────────────────────────

async fn signed_in() -> (MockServer, Session) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(&ApiConfig::new(base_url)).unwrap();
    client.set_token("token-123".to_string().into());
    (server, Session::new(client))
}

fn profile_json(balance: i64) -> serde_json::Value {
    json!({
        "id": 3,
        "email": "user@example.com",
        "is_admin": false,
        "role": "user",
        "balance": balance,
        "orders_count": 1,
        "total_spent_usd": 49.0
    })
}

async fn preload_cart(server: &MockServer, session: &Session) {
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Product 1", "price": "$49", "image": "", "category": "templates", "quantity": 1}
        ])))
        .mount(server)
        .await;
    session.cart().load().await;
}

// ── Wallet payment ──────────────────────────────────────────────────

#[tokio::test]
async fn test_wallet_payment_refreshes_balance_before_success() {
    let (server, session) = signed_in().await;
    preload_cart(&server, &session).await;

    Mock::given(method("POST"))
        .and(path("/api/orders/process-wallet-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Xarid muvaffaqiyatli amalga oshirildi!",
            "new_balance": 100000.0,
            "total_uzs": 627200.0,
            "items_purchased": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(100_000)))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = session.checkout().pay_with_wallet().await.unwrap();

    assert_eq!(receipt.new_balance, Decimal::from(100_000));
    assert_eq!(
        session.account().balance(),
        Decimal::from(100_000),
        "balance must come from the refreshed profile, never be guessed"
    );
    assert!(session.cart().is_empty(), "cart clears locally after settlement");
    assert!(session.notices().drain().contains(&Notice::PurchaseCompleted));
}

#[tokio::test]
async fn test_declined_payment_surfaces_backend_message() {
    let (server, session) = signed_in().await;
    preload_cart(&server, &session).await;

    let detail = "Hamyonda mablag' yetarli emas. Balans: 5,000 so'm, kerakli: 627,200 so'm";
    Mock::given(method("POST"))
        .and(path("/api/orders/process-wallet-payment"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": detail })))
        .mount(&server)
        .await;

    let result = session.checkout().pay_with_wallet().await;

    match result {
        Err(CheckoutError::Declined(message)) => assert_eq!(message, detail),
        other => panic!("expected Declined, got: {other:?}"),
    }
    assert_eq!(
        session.cart().total_quantity(),
        1,
        "a declined payment leaves the cart alone"
    );
}

#[tokio::test]
async fn test_empty_cart_is_rejected_locally() {
    let (server, session) = signed_in().await;

    let result = session.checkout().pay_with_wallet().await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_signed_out_payment_is_rejected_locally() {
    let (server, session) = signed_in().await;
    session.sign_out();

    let result = session.checkout().pay_with_wallet().await;

    assert!(matches!(result, Err(CheckoutError::NotSignedIn)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Top-up ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_top_up_refreshes_balance_before_success() {
    let (server, session) = signed_in().await;

    Mock::given(method("POST"))
        .and(path("/api/balance/topup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Hamyon muvaffaqiyatli to'ldirildi",
            "balance": 50000.0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(50_000)))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = session
        .checkout()
        .top_up(Decimal::from(50_000))
        .await
        .unwrap();

    assert_eq!(receipt.balance, Decimal::from(50_000));
    assert_eq!(session.account().balance(), Decimal::from(50_000));
    assert!(session.notices().drain().contains(&Notice::WalletToppedUp));
}

#[tokio::test]
async fn test_non_positive_top_up_is_rejected_locally() {
    let (server, session) = signed_in().await;

    let result = session.checkout().top_up(Decimal::ZERO).await;

    assert!(matches!(result, Err(CheckoutError::InvalidAmount)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Gateway links ───────────────────────────────────────────────────

#[tokio::test]
async fn test_payment_link_returns_gateway_redirect() {
    let (server, session) = signed_in().await;
    preload_cart(&server, &session).await;

    Mock::given(method("POST"))
        .and(path("/api/orders/generate-payment-link"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_url": "https://my.click.uz/services/pay?amount=49",
            "order_id": 12
        })))
        .mount(&server)
        .await;

    let link = session.checkout().payment_link().await.unwrap();

    assert!(link.payment_url.starts_with("https://my.click.uz/"));
    assert_eq!(
        session.cart().total_quantity(),
        1,
        "the cart waits for the gateway; no local settlement"
    );
}
