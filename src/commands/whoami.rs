use anyhow::Result;
use famhub_core::session::Session;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let session = Session::load()?;

    match &session.user.display_name {
        Some(name) => println!("{} <{}>", name.bold(), session.user.email),
        None => println!("{}", session.user.email.bold()),
    }

    let signed_in = session
        .signed_in_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M");
    println!("{}", format!("Signed in {}", signed_in).dimmed());

    Ok(())
}
