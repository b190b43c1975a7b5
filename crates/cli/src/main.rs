//! Neon Bazaar CLI - Terminal storefront front end.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (persists the credential)
//! bazaar login -e user@example.com -p secret
//!
//! # Browse and shop
//! bazaar catalog
//! bazaar cart add 3
//! bazaar cart list
//! bazaar wishlist toggle 3
//!
//! # Wallet
//! bazaar topup 500000
//! bazaar checkout wallet
//! ```
//!
//! # Environment Variables
//!
//! - `BAZAAR_API_URL` - Base URL of the marketplace backend
//! - `BAZAAR_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use neon_bazaar_client::{ApiClient, ApiConfig};
use neon_bazaar_core::{CurrencyCode, RateTable};
use neon_bazaar_session::{Prefs, Session};

mod commands;

use commands::account::AccountAction;
use commands::cart::CartAction;
use commands::checkout::CheckoutMethod;
use commands::wishlist::WishlistAction;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Neon Bazaar terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the credential
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and drop the persisted credential
    Logout,
    /// Browse the product catalog
    Catalog {
        /// Bypass the catalog cache
        #[arg(long)]
        refresh: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Show the account, order history, or transactions
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Add funds to the wallet (amount in UZS)
    Topup {
        /// Amount in UZS
        amount: Decimal,
    },
    /// Check out the current cart
    Checkout {
        #[command(subcommand)]
        method: CheckoutMethod,
    },
    /// Set the preferred display currency (USD, UZS, RUB)
    Currency {
        /// Currency code
        code: CurrencyCode,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let session = Session::new(client);
    let prefs = Prefs::standard()?;
    let stored = prefs.load()?;

    // Everything except sign-in runs against the restored session.
    if !matches!(
        cli.command,
        Commands::Login { .. } | Commands::Register { .. }
    ) && let Some(token) = stored.token.clone()
    {
        session.restore(token).await;
    }

    let currency = stored.currency;
    let rates = RateTable::default();

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&session, &prefs, &email, password).await?;
        }
        Commands::Register { email, password } => {
            commands::auth::register(&session, &email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&session, &prefs)?,
        Commands::Catalog { refresh } => {
            commands::catalog::list(&session, refresh, currency, &rates).await?;
        }
        Commands::Cart { action } => {
            commands::cart::run(&session, action, currency, &rates).await?;
        }
        Commands::Wishlist { action } => {
            commands::wishlist::run(&session, action, currency, &rates).await?;
        }
        Commands::Account { action } => commands::account::run(&session, action).await?,
        Commands::Topup { amount } => commands::checkout::top_up(&session, amount).await?,
        Commands::Checkout { method } => commands::checkout::run(&session, method).await?,
        Commands::Currency { code } => commands::account::set_currency(&prefs, code)?,
    }

    // Whatever the stores queued for the user during this command.
    for notice in session.notices().drain() {
        println!("* {notice}");
    }

    Ok(())
}
