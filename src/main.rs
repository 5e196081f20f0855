mod cli;

use popcorn::{
    config::{self, Config},
    library,
    metadata::{MovieLookup, OmdbProvider},
    server,
};
use popcorn_common::{MovieId, Outcome, UserId};
use popcorn_db::{DataManager, MovieUpdate, SqliteDataManager};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;

fn open_manager(config: &Config) -> Result<SqliteDataManager> {
    let db_path = config.database.path.to_string_lossy();
    tracing::info!("Opening database at {}", db_path);
    SqliteDataManager::open(&db_path).context("Failed to open movie database")
}

/// Turn a non-success outcome into a command error.
fn require<T>(outcome: Outcome<T>, what: &str) -> Result<T> {
    Ok(outcome.into_result(what)?)
}

fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "popcorn=trace,popcorn_db=trace,tower_http=debug".to_string()
        } else {
            "popcorn=info,popcorn_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Start { host, port } => {
            let mut server_config = config.server.clone();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            let manager: Arc<dyn DataManager> = Arc::new(open_manager(&config)?);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(&server_config, manager))
        }
        Commands::Users => list_users(&config),
        Commands::AddUser { name } => add_user(&config, &name),
        Commands::Movies { user_id } => list_movies(&config, user_id),
        Commands::Lookup { title } => lookup(&config, &title),
        Commands::AddMovie { user_id, title } => add_movie(&config, user_id, &title),
        Commands::UpdateMovie { movie_id, fields } => update_movie(&config, movie_id, fields),
        Commands::DeleteMovie { movie_id } => delete_movie(&config, movie_id),
        Commands::Version => {
            println!("popcorn {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn list_users(config: &Config) -> Result<()> {
    let manager = open_manager(config)?;
    let users = require(manager.get_all_users(), "users")?;
    if users.is_empty() {
        println!("No users yet");
    }
    for user in users {
        println!("{:>4}  {}", user.id, user.name);
    }
    Ok(())
}

fn add_user(config: &Config, name: &str) -> Result<()> {
    let manager = open_manager(config)?;
    let user = require(manager.add_user(name), "user")?;
    println!("Added user {} ({})", user.name, user.id);
    Ok(())
}

fn list_movies(config: &Config, user_id: UserId) -> Result<()> {
    let manager = open_manager(config)?;
    let user = require(manager.get_user(user_id), &format!("user {user_id}"))?;
    let movies = require(manager.get_user_movies(user_id), "movies")?;

    println!("{}'s movies:", user.name);
    if movies.is_empty() {
        println!("  (none)");
    }
    for movie in movies {
        println!(
            "{:>4}  {} ({}) dir. {}  rating {:.1}",
            movie.id, movie.title, movie.year, movie.director, movie.rating
        );
        if let Some(link) = movie.link {
            println!("      {}", link);
        }
    }
    Ok(())
}

fn omdb(config: &Config) -> Result<OmdbProvider> {
    OmdbProvider::new(&config.omdb).context("OMDb lookups are not configured")
}

fn lookup(config: &Config, title: &str) -> Result<()> {
    let provider = omdb(config)?;
    let rt = tokio::runtime::Runtime::new()?;

    match rt.block_on(provider.retrieve_movie_data(title)) {
        Some(movie) => {
            println!("{}", serde_json::to_string_pretty(&movie)?);
            Ok(())
        }
        None => anyhow::bail!("No movie data for '{}'", title),
    }
}

fn add_movie(config: &Config, user_id: UserId, title: &str) -> Result<()> {
    let provider = omdb(config)?;
    let manager = open_manager(config)?;
    let rt = tokio::runtime::Runtime::new()?;

    let outcome = rt.block_on(library::add_movie_by_title(
        &provider, &manager, user_id, title,
    ));
    let movie = require(outcome, &format!("'{title}' for user {user_id}"))?;
    println!("Added {} ({}) as movie {}", movie.title, movie.year, movie.id);
    Ok(())
}

fn update_movie(config: &Config, movie_id: MovieId, fields: Vec<(String, String)>) -> Result<()> {
    let update = MovieUpdate::from_pairs(fields)?;
    let manager = open_manager(config)?;
    let movie = require(
        manager.update_movie(movie_id, update),
        &format!("movie {movie_id}"),
    )?;
    println!(
        "Updated movie {}: {} ({}) rating {:.1}",
        movie.id, movie.title, movie.year, movie.rating
    );
    Ok(())
}

fn delete_movie(config: &Config, movie_id: MovieId) -> Result<()> {
    let manager = open_manager(config)?;
    require(manager.delete_movie(movie_id), &format!("movie {movie_id}"))?;
    println!("Deleted movie {}", movie_id);
    Ok(())
}
