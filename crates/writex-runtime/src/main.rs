//! # WriteX CLI
//!
//! Entry point for the `writex` binary.
//!
//! ```text
//! writex register                      wallet → issuer → ledger → dashboard link
//! writex blogs --stealth 0x..          list published records
//! writex writer 0x..                   ledger address bound to a writer key
//! writex post --title .. --pointer ..  publish a record
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use wx_02_ledger_client::BlogEntry;
use wx_03_dashboard::DashboardView;
use writex_runtime::{Cli, Command, WritexConfig, WritexRuntime};
use writex_telemetry::{init_logging, TelemetryConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.verbose {
        telemetry = telemetry.verbose();
    }
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let mut config = WritexConfig::resolve(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    debug!("Resolved configuration: {:?}", config);

    let runtime = WritexRuntime::new(config).context("Failed to start WriteX runtime")?;
    info!("WriteX v{} ready", writex_runtime::VERSION);

    match cli.command {
        Command::Register => register(&runtime).await,
        Command::Blogs { stealth, route } => {
            let view = match (stealth, route) {
                (Some(stealth), _) => runtime.load_dashboard(&stealth).await,
                (None, Some(route)) => runtime.load_route(&route).await,
                (None, None) => bail!("Pass --stealth <address> or --route <route>"),
            }
            .context("Failed to load dashboard")?;
            print_view(&view);
            Ok(())
        }
        Command::Writer { key } => {
            let address = runtime
                .writer_address(&key)
                .await
                .context("Failed to read writer address")?;
            println!("{address}");
            Ok(())
        }
        Command::Post {
            title,
            pointer,
            key,
            proof,
        } => {
            let entry = BlogEntry {
                title,
                content_pointer: pointer,
                proof,
                key,
            };
            let receipt = runtime
                .post_blog(&entry)
                .await
                .context("Failed to publish record")?;
            println!("Published in transaction {}", receipt.tx_hash);
            Ok(())
        }
    }
}

async fn register(runtime: &WritexRuntime) -> Result<()> {
    let mut status = runtime.subscribe();
    let watcher = tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let message = status.borrow_and_update().clone();
            eprintln!("{message}");
        }
    });

    let state = runtime.register().await;
    watcher.abort();

    println!("{}", state.status());
    if let Some(kind) = state.failure() {
        bail!("Registration failed: {kind}");
    }
    match runtime.handoff() {
        Some(handoff) => {
            println!("Dashboard: {}", runtime.dashboard_link(&handoff));
            Ok(())
        }
        None => bail!("Registration ended in {state} without a dashboard handoff"),
    }
}

fn print_view(view: &DashboardView) {
    println!("Writer {}", view.short_address());
    println!("{}", view.status);
    for (i, record) in view.records.iter().enumerate() {
        println!("{:>3}. {}  ({})", i + 1, record.title, record.content_pointer);
    }
}
