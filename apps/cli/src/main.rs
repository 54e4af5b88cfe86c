//! McpReg command line
//!
//! `mcpreg serve` runs the HTTP API; `mcpreg build-static` renders the same
//! responses into a directory for static hosting.

mod logging;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mcpreg_api::{ApiConfig, RegistryServer};
use mcpreg_core::{branding, Catalog};
use mcpreg_static::ExportConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const DEFAULT_DATA_FILE: &str = "data/servers.json";

#[derive(Parser, Debug)]
#[command(name = "mcpreg", version, about = "Read-only MCP server registry")]
struct Cli {
    /// Also write daily-rotated log files into this directory
    #[arg(long, global = true, env = "MCPREG_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the registry API over HTTP
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = branding::DEFAULT_PORT, env = "PORT")]
        port: u16,

        /// Dataset file
        #[arg(long, default_value = DEFAULT_DATA_FILE, env = "MCPREG_DATA")]
        data: PathBuf,

        /// Do not send CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Export every API response as static files
    BuildStatic {
        /// Dataset file
        #[arg(long, default_value = DEFAULT_DATA_FILE, env = "MCPREG_DATA")]
        data: PathBuf,

        /// Output directory
        #[arg(long, default_value = "_site")]
        out: PathBuf,

        /// Directory holding index.html and .nojekyll
        #[arg(long, default_value = "site")]
        assets: PathBuf,

        /// Skip copying the passthrough assets
        #[arg(long)]
        no_assets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_tracing(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Serve {
            host,
            port,
            data,
            no_cors,
        } => {
            let catalog = load_catalog(&data)?;
            let config = ApiConfig {
                host,
                port,
                enable_cors: !no_cors,
            };
            info!(
                "[Startup] {} {} listening on {}",
                branding::DISPLAY_NAME,
                branding::API_VERSION,
                config.base_url()
            );
            RegistryServer::new(config, Arc::new(catalog)).run().await
        }
        Command::BuildStatic {
            data,
            out,
            assets,
            no_assets,
        } => {
            let catalog = load_catalog(&data)?;
            let config = ExportConfig {
                output_dir: out,
                assets_dir: (!no_assets).then_some(assets),
            };
            let report = mcpreg_static::export(&catalog, config)?;
            info!("[Startup] Export wrote {} files", report.files.len());
            Ok(())
        }
    }
}

fn load_catalog(path: &std::path::Path) -> anyhow::Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Failed to load dataset {}", path.display()))
}
