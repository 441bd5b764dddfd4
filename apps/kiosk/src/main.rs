use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use kiosk_core::{
    load_config_from, CameraCapability, HttpPrescriptionLookup, KioskRuntime, MissingCamera,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

mod camera;
mod commands;
mod render;

use camera::{DeniedCamera, FeedCamera};
use commands::{parse_command, Command, HELP};
use render::render_update;

#[derive(Parser, Debug)]
struct Args {
    /// Flat TOML file with lookup and timing settings.
    #[arg(long, default_value = "kiosk.toml")]
    config: PathBuf,
    /// Overrides the configured prescription lookup endpoint.
    #[arg(long)]
    lookup_url: Option<Url>,
    /// Decoded QR payloads, one per line; a blank line is a frame without a code.
    #[arg(long, conflicts_with = "no_camera")]
    qr_feed: Option<PathBuf>,
    /// Behave as if camera permission were refused.
    #[arg(long)]
    no_camera: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut config = load_config_from(&args.config)?;
    if let Some(url) = args.lookup_url {
        config.lookup_url = url;
    }
    let lookup = HttpPrescriptionLookup::from_config(&config)
        .context("failed to build prescription lookup client")?;

    let camera: Arc<dyn CameraCapability> = match (&args.qr_feed, args.no_camera) {
        (Some(feed), _) => Arc::new(FeedCamera::from_file(feed).await?),
        (None, true) => Arc::new(DeniedCamera),
        (None, false) => Arc::new(MissingCamera),
    };

    info!(lookup_url = %config.lookup_url, "kiosk: starting");
    let (runtime, kiosk) = KioskRuntime::new(config.timings.clone(), Arc::new(lookup), camera);
    let mut updates = kiosk.subscribe();
    let runtime_task = tokio::spawn(runtime.run());

    let printer = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(update) => {
                    for line in render_update(&update) {
                        println!("{line}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "kiosk: display fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{HELP}");
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = stdin.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Action(action)) => kiosk.send(action).await?,
            Err(message) => println!("{message}"),
        }
    }

    drop(kiosk);
    if let Err(err) = runtime_task.await {
        error!(error = %err, "kiosk: runtime task failed");
    }
    printer.abort();
    Ok(())
}
