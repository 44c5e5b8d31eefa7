use clap::Parser;
use tfstate_json::utils::{logger, validation::Validate};
use tfstate_json::{
    encode_state, encode_state_pretty, CliConfig, LocalStorage, OutputFormat, StateError,
    StateLoader, StateSummary,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<(), StateError> {
    config.validate()?;

    let loader = StateLoader::new(LocalStorage::new(".".to_string())).strict(config.strict);
    let state = loader.load(&config.state).await?;

    match (config.format, &config.output) {
        (OutputFormat::Summary, _) => println!("{}", StateSummary::from_state(&state)),
        (format, Some(output)) => {
            loader
                .store(output, &state, format == OutputFormat::Pretty)
                .await?;
            println!("📁 Output saved to: {}", output);
        }
        (OutputFormat::Json, None) => println!("{}", encode_state(&state)?),
        (OutputFormat::Pretty, None) => println!("{}", encode_state_pretty(&state)?),
    }

    Ok(())
}
