use anyhow::Context;
use clap::Parser;
use poem_index::config::toml_config::TomlConfig;
use poem_index::core::{ConfigProvider, Storage};
use poem_index::utils::{logger, validation::Validate};
use poem_index::{IndexEngine, LocalStorage, PoemError, PoemPipeline};
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-index")]
#[command(about = "Poem index with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "poem-index.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override check-only setting from config
    #[arg(long)]
    check_only: Option<bool>,

    /// Dry run - show which files would be checked without parsing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_logger(args.verbose, config.log_level());
    }

    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(check_only) = args.check_only {
        config.set_check_only(check_only);
        tracing::info!("🔧 Check-only overridden to: {}", check_only);
    }

    config.validate().context("configuration validation failed")?;

    display_config_summary(&config, &args);

    let storage = LocalStorage::new(config.output_path().to_string());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be parsed");
        perform_dry_run(&config, &storage).await?;
        return Ok(());
    }

    let engine = IndexEngine::new(PoemPipeline::new(storage, config));

    match engine.run().await {
        Ok(outputs) => {
            for output in outputs {
                println!("📁 Output saved to: {}", output);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Poem index failed: {} (Category: {:?})", e, e.category());
            if let PoemError::InvalidFiles { failures } = &e {
                for failure in failures {
                    eprintln!("{}", failure);
                }
            } else {
                eprintln!("❌ {}", e.user_friendly_message());
            }
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Index: {}", config.index.name);
    if let Some(description) = &config.index.description {
        println!("  Description: {}", description);
    }
    println!("  Inputs: {}", config.inputs().join(", "));
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Check Only: {}", config.check_only());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig, storage: &LocalStorage) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📜 Files to check:");
    let mut total = 0;
    for input in config.inputs() {
        let files = storage
            .list_text_files(Path::new(input))
            .await
            .with_context(|| format!("cannot list input '{}'", input))?;
        for file in &files {
            println!("  {}", file.display());
        }
        total += files.len();
    }
    println!("  Total: {}", total);

    println!();
    println!("💾 Output Configuration:");
    if config.check_only() {
        println!("  Check only, no index will be written");
    } else {
        for format in config.output_formats() {
            let name = match format.as_str() {
                "csv" => poem_index::core::pipeline::CSV_OUTPUT,
                _ => poem_index::core::pipeline::JSON_OUTPUT,
            };
            println!("  {}", Path::new(config.output_path()).join(name).display());
        }
    }

    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
