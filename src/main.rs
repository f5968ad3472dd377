use anyhow::Context;
use clap::Parser;
use talk_generator::app::assembly;
use talk_generator::utils::error::ErrorSeverity;
use talk_generator::utils::{logger, validation::Validate};
use talk_generator::{CliConfig, TalkEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting talk-generator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli
        .resolve()
        .with_context(|| format!("failed to load configuration {:?}", cli.config))?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let schema = assembly::build_schema(&config)
        .await
        .context("failed to set up slide generators")?;
    let sink = assembly::build_sink(&config);
    let engine = TalkEngine::new(schema, sink, config);

    match engine.run().await {
        Ok(location) => {
            println!("✅ Saved talk to {}", location);
        }
        Err(e) => {
            tracing::error!(
                "Talk generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
