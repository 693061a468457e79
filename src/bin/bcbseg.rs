use bcb_tools::utils::logger;
use bcb_tools::{PickupError, SegmentArgs, SegmentationJob};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = SegmentArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let dry_run = args.dry_run;
    let job = SegmentationJob::from(args);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - segmentation is not started");
        match job.dry_run() {
            Ok(line) => println!("{}", line),
            Err(e) => exit_with(e),
        }
        return Ok(());
    }

    if let Err(e) = job.run() {
        exit_with(e);
    }

    println!("✅ Segmentation completed: {}*", job.output_prefix);
    Ok(())
}

fn exit_with(e: PickupError) -> ! {
    tracing::error!("❌ Segmentation failed: {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
