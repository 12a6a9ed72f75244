mod client;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jurisai_common::logger;
use serde_json::json;

use crate::client::ApiClient;

#[derive(Parser)]
#[command(name = "jurisai-cli")]
#[command(about = "Command-line client for the JurisAI semantic search API", long_about = None)]
struct Cli {
    /// Headless mode for automation
    #[arg(long, global = true)]
    headless: bool,

    /// API base URL
    #[arg(long, global = true, env = "JURISAI_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a semantic search through the API
    Search {
        /// Search terms
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 5)]
        limit: usize,

        /// Relevance threshold (0-1); accepted but not applied
        #[arg(long, default_value_t = 0.6)]
        threshold: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Print request details
        #[arg(long)]
        verbose: bool,
    },

    /// Index a document
    Index {
        /// Document content
        content: String,

        /// Document title
        #[arg(long, default_value = "Doc Test")]
        title: String,

        /// Print request details
        #[arg(long)]
        verbose: bool,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Search { verbose, .. } | Commands::Index { verbose, .. } => *verbose,
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.headless {
        println!("{}", render::HEADLESS_BANNER);
    }

    let client = ApiClient::new(&cli.api_url)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            threshold,
            format,
            verbose,
        } => {
            let payload = ApiClient::search_payload(&query, limit);
            if verbose {
                println!("[DEBUG] POST {} payload={}", client.search_url(), payload);
            }
            tracing::debug!("threshold {} is not applied to results", threshold);

            let results = client.search(&payload).await?;

            match format {
                OutputFormat::Json => println!("{}", render::render_json(&results)),
                OutputFormat::Text => print!("{}", render::render_text(&results)),
            }
        }
        Commands::Index {
            content,
            title,
            verbose,
        } => {
            let params = ApiClient::index_params(&content, &title);
            if verbose {
                let shown: serde_json::Map<String, serde_json::Value> = params
                    .iter()
                    .map(|(k, v)| (k.clone(), json!(v)))
                    .collect();
                println!(
                    "[DEBUG] POST {} params={}",
                    client.index_url(),
                    serde_json::Value::Object(shown)
                );
            }

            let body = client.index(&params).await?;
            println!("{}", body);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.command.verbose() { "debug" } else { "warn" };
    if let Err(e) = logger::setup_console_logging(level) {
        eprintln!("{}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}", render::render_error(&e));
        std::process::exit(1);
    }
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
    fn test_search_defaults() {
        let cli = Cli::parse_from(["jurisai-cli", "search", "contract law"]);
        assert!(!cli.headless);
        match cli.command {
            Commands::Search {
                query,
                limit,
                threshold,
                format,
                verbose,
            } => {
                assert_eq!(query, "contract law");
                assert_eq!(limit, 5);
                assert_eq!(threshold, 0.6);
                assert_eq!(format, OutputFormat::Json);
                assert!(!verbose);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_index_with_global_headless_flag() {
        let cli = Cli::parse_from([
            "jurisai-cli",
            "--headless",
            "index",
            "contract law basics",
            "--title",
            "Doc1",
            "--verbose",
        ]);
        assert!(cli.headless);
        assert!(cli.command.verbose());
        match cli.command {
            Commands::Index { content, title, .. } => {
                assert_eq!(content, "contract law basics");
                assert_eq!(title, "Doc1");
            }
            _ => panic!("expected index"),
        }
    }

    #[test]
    fn test_text_format_flag() {
        let cli = Cli::parse_from(["jurisai-cli", "search", "q", "--format", "text", "--limit", "2"]);
        match cli.command {
            Commands::Search { format, limit, .. } => {
                assert_eq!(format, OutputFormat::Text);
                assert_eq!(limit, 2);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["jurisai-cli", "search", "q", "--format", "xml"]).is_err());
    }
}
