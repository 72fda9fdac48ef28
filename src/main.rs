use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// formforge - AI assisted form builder API
#[derive(Parser)]
#[command(name = "formforge")]
#[command(about = "Generate, publish and collect web forms", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = formforge::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    formforge::observability::init_observability(
        "formforge",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.environment.is_production(),
    )?;

    if config.uses_fallback_secret() {
        tracing::warn!(
            "JWT secret is not configured, using the built-in development secret. \
             Set JWT_SECRET before deploying."
        );
    }

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
    }
}
