use bcb_tools::config::toml_config::PickupFileConfig;
use bcb_tools::utils::{logger, validation::Validate};
use bcb_tools::{CliConfig, LocalStorage, NiftiVoxelCounter, PickupEngine, PickupError, PickupSettings};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting pick-synth-lesions");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入設定檔並與命令列參數合併
    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    let engine = PickupEngine::new(NiftiVoxelCounter, LocalStorage::new(), settings);

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ Pick up completed successfully!");
            println!("✅ Picked {} synthetic lesion(s)", report.total_picked());
            for list in &report.lists {
                match &list.saved_to {
                    Some(path) => println!("📁 {} file(s) saved to: {}", list.files.len(), path.display()),
                    None => {
                        println!("🔍 {} file(s):", list.files.len());
                        for file in &list.files {
                            println!("  {}", file);
                        }
                    }
                }
                if let Some(folder) = &list.copied_to {
                    println!("📁 Files copied to: {}", folder.display());
                }
            }
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn load_settings(config: &CliConfig) -> bcb_tools::Result<PickupSettings> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let file_config = PickupFileConfig::from_file(path)?;
            file_config.validate()?;
            Some(file_config)
        }
        None => None,
    };

    let settings = PickupSettings::from_cli(config, file_config.as_ref())?;
    settings.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(settings)
}

fn exit_with(e: PickupError) -> ! {
    tracing::error!(
        "❌ Pick up failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
