use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::{eyre::WrapErr, Result};
use gamepad_relay::AppConfig;
use input_simulator::Backend;
use network::WireFormat;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Forward a physical gamepad to a virtual one over UDP")]
struct Cli {
    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Capture a local controller and send its events
    Transmit {
        /// Receiver as host:port
        destination: Option<String>,
        /// Event node path or name substring
        #[arg(short, long)]
        device: Option<String>,
        /// Hide the controller from local applications while sending
        #[arg(long)]
        grab: bool,
        #[arg(long)]
        format: Option<WireFormat>,
    },
    /// Receive events and drive a virtual gamepad
    Receive {
        #[arg(short, long)]
        bind: Option<SocketAddr>,
        #[arg(long)]
        backend: Option<Backend>,
        /// Name of the virtual device
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        format: Option<WireFormat>,
    },
    /// Print captured events without sending them
    Monitor {
        #[arg(short, long)]
        device: Option<String>,
    },
}

fn setup_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("Invalid log level \"{}\"", level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

fn cancel_on_ctrl_c(cancellation_token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted");
                cancellation_token.cancel();
            }
            Err(err) => warn!("Could not listen for ctrl-c: {}", err),
        }
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    setup_logging(&config.log_level)?;

    let cancellation_token = CancellationToken::new();
    cancel_on_ctrl_c(cancellation_token.clone());

    match cli.command {
        Command::Transmit {
            destination,
            device,
            grab,
            format,
        } => {
            let mut settings = config.transmitter;
            if let Some(destination) = destination {
                settings.destination = destination;
            }
            if device.is_some() {
                settings.device = device;
            }
            settings.grab |= grab;
            if let Some(format) = format {
                settings.format = format;
            }
            transmitter::sender::input_event_sender(&settings, cancellation_token)
                .await
                .wrap_err("Transmitter stopped")?;
        }
        Command::Receive {
            bind,
            backend,
            name,
            format,
        } => {
            let mut settings = config.receiver;
            if let Some(bind) = bind {
                settings.bind = bind;
            }
            if let Some(backend) = backend {
                settings.backend = backend;
            }
            if let Some(name) = name {
                settings.device_name = name;
            }
            if let Some(format) = format {
                settings.format = format;
            }
            receiver::listener::input_event_listener(&settings, cancellation_token)
                .await
                .wrap_err("Receiver stopped")?;
        }
        Command::Monitor { device } => {
            let device = device.or(config.transmitter.device);
            transmitter::monitor::input_event_monitor(device.as_deref(), cancellation_token)
                .await
                .wrap_err("Monitor stopped")?;
        }
    }
    Ok(())
}
