//! Wishlist commands.

use clap::Subcommand;

use neon_bazaar_core::{CurrencyCode, RateTable, format_money};
use neon_bazaar_session::Session;

use super::catalog::find_product;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Wishlist subcommands.
#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show the wishlist
    List,
    /// Toggle a product's membership by id
    Toggle {
        /// Product id from `bazaar catalog`
        product_id: i64,
    },
}

pub async fn run(
    session: &Session,
    action: WishlistAction,
    currency: CurrencyCode,
    rates: &RateTable,
) -> Result<()> {
    match action {
        WishlistAction::List => list(session, currency, rates),
        WishlistAction::Toggle { product_id } => {
            let product = find_product(session, product_id).await?;
            session.wishlist().toggle(&product).await;
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn list(session: &Session, currency: CurrencyCode, rates: &RateTable) {
    let entries = session.wishlist().entries();

    if entries.is_empty() {
        println!("Your wishlist is empty");
        return;
    }

    for entry in &entries {
        println!(
            "{:>4}  {:<40} {:>16}  {}",
            entry.id,
            entry.title,
            format_money(entry.price, currency, rates),
            entry.tags.join(", "),
        );
    }
}
