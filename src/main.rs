use std::io::Read;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idealens::{AppError, Config, Evaluator, HttpChatClient, server};

#[derive(Parser)]
#[command(name = "idealens")]
#[command(version)]
#[command(about = "Score innovation concepts with an LLM evaluation rubric", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a concept description and print the scored feedback as JSON
    #[clap(visible_alias = "e")]
    Evaluate {
        /// Concept description text; omit to read from stdin
        idea: Option<String>,
    },
    /// Start the HTTP API exposing POST /api/evaluate
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Evaluate { idea } => evaluate(idea),
        Commands::Serve { port } => serve(port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn evaluate(idea: Option<String>) -> Result<(), AppError> {
    let idea = match idea.as_deref() {
        // `-` is the conventional stdin marker.
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(text) => text.to_string(),
    };

    // Boundary check: the prompt builder itself never validates input.
    let idea = idea.trim();
    if idea.is_empty() {
        return Err(AppError::config_error("Concept description must not be empty"));
    }

    match idealens::evaluate(idea) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(failure) => {
            let rendered =
                serde_json::to_string_pretty(&failure).unwrap_or_else(|_| failure.message.clone());
            eprintln!("{rendered}");
            std::process::exit(1);
        }
    }
}

fn serve(port: Option<u16>) -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = Config::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    let port = config.port;

    let client = HttpChatClient::new(&config)?;
    let evaluator = Arc::new(Evaluator::new(config, client));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(evaluator, port))
}
