//! Checkout and wallet commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use neon_bazaar_session::Session;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// How to settle the cart.
#[derive(Subcommand)]
pub enum CheckoutMethod {
    /// Pay from the wallet balance
    Wallet,
    /// Create an external payment-gateway link
    Link,
}

pub async fn run(session: &Session, method: CheckoutMethod) -> Result<()> {
    match method {
        CheckoutMethod::Wallet => wallet(session).await,
        CheckoutMethod::Link => link(session).await,
    }
}

#[allow(clippy::print_stdout)]
async fn wallet(session: &Session) -> Result<()> {
    // Payment failures propagate with the backend's message - money is the
    // one place errors must be loud.
    let receipt = session.checkout().pay_with_wallet().await?;

    if !receipt.message.is_empty() {
        println!("{}", receipt.message);
    }
    println!(
        "Paid {} so'm for {} item(s); balance is now {} so'm",
        receipt.total_uzs.round_dp(0),
        receipt.items_purchased,
        receipt.new_balance.round_dp(0),
    );
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn link(session: &Session) -> Result<()> {
    let link = session.checkout().payment_link().await?;

    println!("Open this link to finish the payment:");
    println!("{}", link.payment_url);
    Ok(())
}

#[allow(clippy::print_stdout)]
pub async fn top_up(session: &Session, amount_uzs: Decimal) -> Result<()> {
    let receipt = session.checkout().top_up(amount_uzs).await?;

    if !receipt.message.is_empty() {
        println!("{}", receipt.message);
    }
    println!("Balance is now {} so'm", receipt.balance.round_dp(0));
    Ok(())
}
