use clap::{Parser, Subcommand};
use popcorn_common::{MovieId, UserId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(author, version, about = "Personal movie lists enriched from OMDb")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List all users
    Users,

    /// Create a user
    AddUser {
        /// Display name
        name: String,
    },

    /// List a user's movies
    Movies {
        /// Owning user id
        user_id: UserId,
    },

    /// Look a title up on OMDb without storing it
    Lookup {
        /// Movie title
        title: String,
    },

    /// Look a title up on OMDb and add it to a user's list
    AddMovie {
        /// Owning user id
        user_id: UserId,

        /// Movie title
        title: String,
    },

    /// Overwrite fields of a stored movie
    UpdateMovie {
        /// Movie id
        movie_id: MovieId,

        /// Fields to set, e.g. rating=8.5 (title, director, year, rating, img_url, link)
        #[arg(required = true, value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },

    /// Remove a movie from its list
    DeleteMovie {
        /// Movie id
        movie_id: MovieId,
    },

    /// Display version information
    Version,
}

/// Split `key=value`; the value may itself contain `=`.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("rating=8.5").unwrap(),
            ("rating".to_string(), "8.5".to_string())
        );
        assert_eq!(
            parse_assignment("link=https://x.test/?a=b").unwrap(),
            ("link".to_string(), "https://x.test/?a=b".to_string())
        );
        assert!(parse_assignment("rating").is_err());
    }

    #[test]
    fn parse_update_command() {
        let cli = Cli::try_parse_from(["popcorn", "update-movie", "4", "rating=8.5", "year=1995"])
            .unwrap();
        match cli.command {
            Commands::UpdateMovie { movie_id, fields } => {
                assert_eq!(movie_id, MovieId::new(4));
                assert_eq!(fields.len(), 2);
            }
            _ => panic!("expected update-movie"),
        }
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["popcorn", "movies", "alice"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
