use clap::Parser;
use poweron_gateway::app::server;
use poweron_gateway::utils::{logger, validation::Validate};
use poweron_gateway::{AppState, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose, config.logging.format);

    tracing::info!("Starting poweron-gateway");
    if args.verbose {
        tracing::debug!("Gateway config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN - configuration is valid, not serving");
        println!("✅ Configuration is valid");
        return Ok(());
    }

    let state = AppState::with_soap_client(&config.poweron)?;
    server::serve(&config, state).await?;

    Ok(())
}
