//! Moviedesk - terminal client for the movie catalog
//!
#![doc = "Moviedesk - terminal client for the movie catalog"]
#![doc = "Main entry point for the Moviedesk application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moviedesk::cli::{Cli, Commands, MovieCommand};
use moviedesk::commands::{self, App};
use moviedesk::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/moviedesk.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let app = App::new(config)?;

    // Execute command
    match cli.command {
        Commands::Login { username, password } => {
            tracing::info!("Logging in as {}", username);
            commands::auth::login(&app, username, password).await
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            tracing::info!("Registering {}", username);
            commands::auth::register(&app, username, email, password).await
        }
        Commands::Logout => commands::auth::logout(&app),
        Commands::Status => {
            commands::auth::status(&app);
            Ok(())
        }
        Commands::Users { json } => commands::auth::users(&app, json).await,
        Commands::Movies { command } => match command {
            MovieCommand::List { json } => commands::movies::list(&app, json).await,
            MovieCommand::Show { id, json } => commands::movies::show(&app, id, json).await,
            MovieCommand::Add { imdb_id, api_key } => {
                commands::movies::add(&app, imdb_id, api_key).await
            }
            MovieCommand::Delete { id, yes } => commands::movies::delete(&app, id, yes).await,
        },
        Commands::Open { path } => commands::movies::open(&app, &path).await,
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays scriptable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "moviedesk=debug"
    } else {
        "moviedesk=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
