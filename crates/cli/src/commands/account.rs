//! Account, history, and preference commands.

use clap::Subcommand;

use neon_bazaar_core::CurrencyCode;
use neon_bazaar_session::{Prefs, Session};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Account subcommands.
#[derive(Subcommand)]
pub enum AccountAction {
    /// Show the profile and wallet balance
    Show,
    /// Show the order history
    Orders,
    /// Show the wallet transaction history
    Transactions,
}

pub async fn run(session: &Session, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::Show => show(session),
        AccountAction::Orders => orders(session).await,
        AccountAction::Transactions => transactions(session).await,
    }
}

#[allow(clippy::print_stdout)]
fn show(session: &Session) -> Result<()> {
    let Some(profile) = session.account().profile() else {
        println!("Not signed in");
        return Ok(());
    };

    println!("Email:    {}", profile.email);
    if let Some(name) = &profile.full_name {
        println!("Name:     {name}");
    }
    println!("Role:     {}", profile.role.as_deref().unwrap_or("user"));
    println!("Balance:  {} so'm", profile.balance.round_dp(0));
    println!("Orders:   {}", profile.orders_count);
    println!("Spent:    ${:.2}", profile.total_spent_usd);
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn orders(session: &Session) -> Result<()> {
    let orders = session.client().fetch_my_orders().await?;

    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }

    for order in &orders {
        println!(
            "{:>4}  {:<40} ${:>8.2}  {}",
            order.id,
            order.product_title.as_deref().unwrap_or("-"),
            order.amount_usd,
            order
                .created_at
                .map_or_else(String::new, |t| t.format("%Y-%m-%d %H:%M").to_string()),
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn transactions(session: &Session) -> Result<()> {
    let transactions = session.client().fetch_my_transactions().await?;

    if transactions.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }

    for tx in &transactions {
        println!(
            "{:>4}  {:<10} {:>14} {}  {}",
            tx.id,
            tx.kind,
            tx.amount.round_dp(0),
            tx.currency,
            tx.description.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

/// Persist the preferred display currency.
#[allow(clippy::print_stdout)]
pub fn set_currency(prefs: &Prefs, code: CurrencyCode) -> Result<()> {
    let mut stored = prefs.load()?;
    stored.currency = code;
    prefs.save(&stored)?;

    println!("Prices will be shown in {code}");
    Ok(())
}
