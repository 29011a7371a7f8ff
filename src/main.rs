use clap::Parser;
use poem_index::utils::{logger, validation::Validate};
use poem_index::{CliConfig, IndexEngine, LocalStorage, PoemError, PoemPipeline};

fn report(e: &PoemError) -> i32 {
    tracing::error!(
        "❌ Poem index failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    match e {
        PoemError::InvalidFiles { failures } => {
            for failure in failures {
                eprintln!("{}", failure);
            }
        }
        other => eprintln!("❌ {}", other.user_friendly_message()),
    }
    eprintln!("💡 {}", e.recovery_suggestion());

    e.exit_code()
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        std::process::exit(report(&e));
    }

    let check_only = config.check_only;
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = IndexEngine::new(PoemPipeline::new(storage, config));

    match engine.run().await {
        Ok(outputs) => {
            if check_only {
                println!("✅ All poem files are well-formed");
            }
            for output in outputs {
                println!("📁 {}", output);
            }
        }
        Err(e) => std::process::exit(report(&e)),
    }
}
