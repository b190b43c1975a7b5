//! Sign-in, registration, and sign-out.

use secrecy::SecretString;

use neon_bazaar_session::{Prefs, Session};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sign in and persist the credential for later commands.
#[allow(clippy::print_stdout)]
pub async fn login(session: &Session, prefs: &Prefs, email: &str, password: String) -> Result<()> {
    let password = SecretString::from(password);
    session.sign_in(email, &password).await?;

    let mut stored = prefs.load()?;
    stored.token = session.client().token();
    prefs.save(&stored)?;

    println!("Signed in as {email}");
    println!(
        "Cart: {} item(s), wishlist: {} item(s)",
        session.cart().total_quantity(),
        session.wishlist().entries().len()
    );
    Ok(())
}

/// Create an account. Does not sign in; run `bazaar login` afterwards.
#[allow(clippy::print_stdout)]
pub async fn register(session: &Session, email: &str, password: String) -> Result<()> {
    let password = SecretString::from(password);
    let profile = session.client().register(email, &password).await?;

    println!("Account created for {}", profile.email);
    Ok(())
}

/// Sign out locally and drop the persisted credential.
///
/// The remote cart and wishlist are untouched; they come back on the next
/// sign-in.
#[allow(clippy::print_stdout)]
pub fn logout(session: &Session, prefs: &Prefs) -> Result<()> {
    session.sign_out();

    let mut stored = prefs.load()?;
    stored.token = None;
    prefs.save(&stored)?;

    println!("Signed out");
    Ok(())
}
