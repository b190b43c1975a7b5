//! Cart commands.

use clap::Subcommand;

use neon_bazaar_core::{CurrencyCode, Money, ProductId, RateTable, format_money};
use neon_bazaar_session::Session;

use super::catalog::find_product;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    List,
    /// Add a product by id
    Add {
        /// Product id from `bazaar catalog`
        product_id: i64,
    },
    /// Remove a product by id
    Remove {
        /// Product id
        product_id: i64,
    },
    /// Set a line's quantity (0 removes the line)
    Set {
        /// Product id
        product_id: i64,
        /// New quantity
        quantity: u32,
    },
}

pub async fn run(
    session: &Session,
    action: CartAction,
    currency: CurrencyCode,
    rates: &RateTable,
) -> Result<()> {
    match action {
        CartAction::List => list(session, currency, rates),
        CartAction::Add { product_id } => {
            let product = find_product(session, product_id).await?;
            session.cart().add(&product).await;
        }
        CartAction::Remove { product_id } => {
            session.cart().remove(ProductId::new(product_id)).await;
        }
        CartAction::Set {
            product_id,
            quantity,
        } => {
            session
                .cart()
                .set_quantity(ProductId::new(product_id), quantity)
                .await;
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn list(session: &Session, currency: CurrencyCode, rates: &RateTable) {
    let cart = session.cart();
    let lines = cart.lines();

    if lines.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in &lines {
        println!(
            "{:>4}  {:<40} x{:<3} {:>16}",
            line.id,
            line.title,
            line.quantity,
            format_money(Money::new(line.price.times(line.quantity)), currency, rates),
        );
    }
    println!(
        "Total: {} item(s), {}",
        cart.total_quantity(),
        format_money(Money::new(cart.total_value()), currency, rates),
    );
}
