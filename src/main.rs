//! `local-server`: HTTPS harness serving test pages, counting reporting
//! beacons and forwarding encrypted auction payloads to a B&A backend.

use std::path::PathBuf;

use ba_local_server::config::{load_config, validate_config, ConfigError, TlsConfig};
use ba_local_server::lifecycle;
use ba_local_server::observability::init_logging;
use ba_local_server::HarnessConfig;
use clap::Parser;

#[derive(Parser)]
#[command(name = "local-server")]
#[command(about = "Local HTTPS server for Bidding & Auction test pages", long_about = None)]
struct Cli {
    /// PEM certificate chain.
    certfile: PathBuf,

    /// PEM private key.
    keyfile: PathBuf,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document root for static files.
    #[arg(long)]
    root: Option<String>,

    /// Listen address, e.g. 127.0.0.1:50071.
    #[arg(long)]
    bind: Option<String>,

    /// selectAd endpoint of the B&A backend.
    #[arg(long)]
    backend_url: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<HarnessConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => HarnessConfig::default(),
        };

        if let Some(root) = self.root {
            config.files.root = root;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(url) = self.backend_url {
            config.auction.backend_url = url;
        }
        config.listener.tls = Some(TlsConfig {
            cert_path: self.certfile.to_string_lossy().into_owned(),
            key_path: self.keyfile.to_string_lossy().into_owned(),
        });

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.into_config()?;

    init_logging(&config.observability.log_level);
    tracing::info!("local-server v{} starting", env!("CARGO_PKG_VERSION"));

    lifecycle::start(config).await?;
    Ok(())
}
