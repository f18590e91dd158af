use anyhow::Result;
use famhub_core::FamhubError;
use famhub_core::clients::{IdentityProvider, ProviderIdentity};
use famhub_core::config::FamhubConfig;
use famhub_core::session::Session;

pub async fn run() -> Result<()> {
    let config = FamhubConfig::load()?;
    let identity = ProviderIdentity::new(&config);

    println!("Signing in with {}...", config.provider);

    let user = identity.sign_in().await?;

    // The allow-list gate: non-members are signed out again right away
    if !config.is_allowed(&user.email) {
        identity.sign_out().await?;
        return Err(FamhubError::NotAllowed(user.email).into());
    }

    Session::new(user.clone()).save()?;

    println!("Welcome, {}!", user.name());

    Ok(())
}
