mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use famhub_core::date_range::DateRange;
use famhub_core::session::Session;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "famhub")]
#[command(about = "Your family's shared calendar and photo album, in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a family member
    Login,
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// List events on the family calendar
    Events {
        /// Show events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add an event to the family calendar
    Add {
        title: String,

        /// Start: YYYY-MM-DD for all-day, YYYY-MM-DDTHH:MM for timed
        #[arg(short, long)]
        start: String,

        /// End (same format as --start; defaults to one hour / one day)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Edit an event
    Edit {
        event_id: String,

        #[arg(long)]
        title: Option<String>,

        /// New start (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: Option<String>,

        /// New end (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Remove an event
    Rm { event_id: String },
    /// The shared photo album
    Photos {
        #[command(subcommand)]
        command: PhotoCommands,
    },
    /// Swedish public holidays
    Holidays {
        /// Year to list (defaults to the current year)
        year: Option<i32>,

        /// Look up a single date (YYYY-MM-DD) instead of listing a year
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum PhotoCommands {
    /// List all photos, newest first
    List,
    /// Upload a photo
    Upload { path: PathBuf },
    /// Remove a photo
    Rm { photo_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login => commands::login::run().await,
        Commands::Logout => commands::logout::run().await,
        Commands::Whoami => commands::whoami::run(),
        Commands::Events { from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())?;
            commands::events::run(range).await
        }
        Commands::Add {
            title,
            start,
            end,
            description,
        } => commands::add::run(title, start, end, description).await,
        Commands::Edit {
            event_id,
            title,
            start,
            end,
            description,
        } => commands::edit::run(event_id, title, start, end, description).await,
        Commands::Rm { event_id } => commands::rm::run(event_id).await,
        Commands::Photos { command } => match command {
            PhotoCommands::List => commands::photos::list().await,
            PhotoCommands::Upload { path } => commands::photos::upload(path).await,
            PhotoCommands::Rm { photo_id } => commands::photos::rm(photo_id).await,
        },
        Commands::Holidays { year, date } => commands::holidays::run(year, date),
    }
}

/// Commands that talk to family services require a signed-in member.
fn require_session() -> Result<Session> {
    Ok(Session::load()?)
}
