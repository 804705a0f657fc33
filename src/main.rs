use clap::{Parser, Subcommand};
use person_registry::api::{openapi, ApiServer};
use person_registry::config::{ConfigLoader, ConfigOverrides};
use person_registry::Registry;
use std::path::PathBuf;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

/// In-memory person registry with a REST API
#[derive(Parser)]
#[command(name = "person-registry")]
#[command(about = "Register and look up person records over HTTP", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default command)
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Do not serve the API documentation routes
        #[arg(long)]
        no_docs: bool,
    },
    /// Print the OpenAPI document as JSON
    Openapi {
        /// Base URL to advertise in the document
        #[arg(long, default_value = "http://localhost:3000")]
        server_url: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Serve {
            host,
            port,
            config,
            no_docs,
        }) => run_serve(cli.verbose, host, port, config, no_docs).await,
        Some(Commands::Openapi { server_url }) => {
            init_tracing(cli.verbose, None);
            print_openapi(&server_url)
        }
        None => run_serve(cli.verbose, None, None, None, false).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the fmt subscriber. A configured filter directive wins over -v flags.
fn init_tracing(verbose: u8, directive: Option<&str>) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        2 => "trace",
        _ => "trace,hyper=debug,tower=debug", // -vvv shows everything including dependencies
    };

    let filter = directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("person-registry started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

async fn run_serve(
    verbose: u8,
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
    no_docs: bool,
) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new().with_overrides(ConfigOverrides {
        host,
        port,
        disable_docs: no_docs,
    });
    if let Some(path) = config_path {
        loader = loader.with_file(path);
    }
    // Must precede init_tracing: the filter directive comes from config.
    let config = loader.load().await?;
    init_tracing(verbose, config.log_filter.as_deref());

    ApiServer::new(Registry::in_memory(), config).start().await
}

fn print_openapi(server_url: &str) -> anyhow::Result<()> {
    let document = openapi::document(server_url);
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
