use crate::config::{GatewayConfig, LogFormat};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "poweron-gateway")]
#[command(about = "REST/JSON gateway in front of the PowerOn customer SOAP service")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    pub config: Option<String>,

    /// Listen address, overrides server.bind
    #[arg(long, env = "GATEWAY_BIND")]
    pub bind: Option<String>,

    /// PowerOn SOAP endpoint, overrides poweron.url
    #[arg(long, env = "POWERON_URL")]
    pub poweron_url: Option<String>,

    /// Log output format, overrides logging.format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Validate configuration and exit without serving
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve(&self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(url) = &self.poweron_url {
            config.poweron.url = url.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }

        Ok(config)
    }
}
