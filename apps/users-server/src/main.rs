use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use tokio_util::sync::CancellationToken;
use users::api::rest::{openapi::UsersApiDoc, routes::register_routes};
use users::domain::service::Service;
use users::infra::storage::InMemoryUsersRepository;
use utoipa::OpenApi;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const INGRESS_MODULE: &str = "api_ingress";

/// Users Server - in-memory users CRUD over HTTP
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - in-memory users CRUD over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address: ":3000", "3000" or "127.0.0.1:3000" (overrides config, default ":3000")
    #[arg(short, long)]
    port: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    // Before logging init so stdout carries only the YAML document.
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Users Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

/// The users document with server-level metadata.
fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = UsersApiDoc::openapi();
    doc.info = utoipa::openapi::Info::new("Users API", env!("CARGO_PKG_VERSION"));
    doc.info.description = Some("Create, read, update, delete and filter users".to_string());
    doc
}

async fn run_server(config: AppConfig) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let ingress_cfg: ApiIngressConfig = config.module_config(INGRESS_MODULE)?;

    // One store for the whole process, shared by every request.
    let repo = Arc::new(InMemoryUsersRepository::new());
    let service = Arc::new(Service::new(repo));

    let routes = register_routes(Router::new(), service);
    let router = ApiIngress::new(ingress_cfg)
        .build_router(routes, api_doc())
        .context("failed to build HTTP router")?;

    let cancel = CancellationToken::new();
    runtime::shutdown::cancel_on_shutdown(cancel.clone());

    tracing::info!(%addr, "Starting HTTP server");
    ApiIngress::serve(router, addr, cancel).await?;

    tracing::info!("Users Server stopped");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    config.server.socket_addr()?;
    config.module_config::<ApiIngressConfig>(INGRESS_MODULE)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}
