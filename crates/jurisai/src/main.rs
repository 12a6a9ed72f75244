use anyhow::Result;
use clap::{Parser, Subcommand};
use jurisai_common::{logger, AppConfig};
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "jurisai")]
#[command(about = "JurisAI - semantic search API for legal documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Database path
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
}

/// CLI arguments override the environment
fn apply_overrides(config: &mut AppConfig, command: Option<Commands>) {
    if let Some(Commands::Serve { host, port, db_path }) = command {
        if let Some(host) = host {
            config.server_host = host;
        }
        if let Some(port) = port {
            config.server_port = port;
        }
        if let Some(db_path) = db_path {
            config.db_base_path = db_path;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;
    apply_overrides(&mut config, cli.command);
    config.ensure_directories()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("JurisAI starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Collection: {} (persist={})", config.collection_name, config.persist_collection);
    tracing::info!("  Database: {}", config.db_base_path.display());
    tracing::info!("  Embedding: {} via {}", config.embedding_model, config.ollama_base_url);

    println!("Server listening on http://{}", config.server_bind_address());

    jurisai_server::start_server(config).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["jurisai", "serve", "--port", "8005", "--db-path", "/tmp/db"]);
        match cli.command {
            Some(Commands::Serve { host, port, db_path }) => {
                assert!(host.is_none());
                assert_eq!(port, Some(8005));
                assert_eq!(db_path, Some(PathBuf::from("/tmp/db")));
            }
            None => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_db_path_override_is_the_only_db_directory_created() {
        let dir = tempfile::tempdir().unwrap();
        let env_db = dir.path().join("env-db");
        let flag_db = dir.path().join("flag-db");

        let mut config = AppConfig {
            db_base_path: env_db.clone(),
            log_dir: dir.path().join("logs"),
            ..AppConfig::default()
        };
        let cli = Cli::parse_from([
            "jurisai",
            "serve",
            "--host",
            "127.0.0.1",
            "--db-path",
            flag_db.to_str().unwrap(),
        ]);

        apply_overrides(&mut config, cli.command);
        config.ensure_directories().unwrap();

        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.server_port, 8000);
        assert!(flag_db.is_dir());
        assert!(!env_db.exists());
    }

    #[test]
    fn test_no_command_keeps_environment() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, None);
        assert_eq!(config.db_base_path, PathBuf::from("./db"));
    }
}
