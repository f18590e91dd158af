use anyhow::Result;
use famhub_core::clients::{IdentityProvider, ProviderIdentity};
use famhub_core::config::FamhubConfig;
use famhub_core::session::Session;

pub async fn run() -> Result<()> {
    let config = FamhubConfig::load()?;
    let identity = ProviderIdentity::new(&config);

    identity.sign_out().await?;
    Session::clear()?;

    println!("Signed out.");

    Ok(())
}
