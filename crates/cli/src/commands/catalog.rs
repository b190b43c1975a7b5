//! Product catalog browsing.

use neon_bazaar_client::Product;
use neon_bazaar_core::{CurrencyCode, ProductId, RateTable, format_money};
use neon_bazaar_session::Session;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Print the catalog with prices in the preferred display currency.
#[allow(clippy::print_stdout)]
pub async fn list(
    session: &Session,
    refresh: bool,
    currency: CurrencyCode,
    rates: &RateTable,
) -> Result<()> {
    if refresh {
        session.client().invalidate_catalog().await;
    }
    let products = session.client().fetch_products().await?;

    if products.is_empty() {
        println!("The catalog is empty");
        return Ok(());
    }

    for product in &products {
        let saved = if session.wishlist().is_saved(product.id) {
            " *"
        } else {
            ""
        };
        println!(
            "{:>4}  {:<40} {:>16}  {}{saved}",
            product.id,
            product.title,
            format_money(product.price, currency, rates),
            product.category,
        );
    }
    Ok(())
}

/// Look a product up by id, fetching the catalog if needed.
pub async fn find_product(session: &Session, id: i64) -> Result<Product> {
    let id = ProductId::new(id);
    let products = session.client().fetch_products().await?;

    products
        .into_iter()
        .find(|product| product.id == id)
        .ok_or_else(|| format!("no product with id {id}").into())
}
