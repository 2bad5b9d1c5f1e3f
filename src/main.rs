use clap::Parser;
use listed_export::core::ConfigProvider;
use listed_export::utils::{logger, validation::Validate};
use listed_export::{CliConfig, ExportConfig, ExportEngine, ExportError, FileSink, HttpListingSource, ListingPipeline};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting listed-export");

    let outcome = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match ExportConfig::from_file(path) {
                Ok(config) => {
                    let config = config.with_fallback_cookie(args.cookie.clone());
                    run(config, args.dry_run).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(args.clone(), args.dry_run).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "Export failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> Result<(), ExportError> {
    config.validate()?;

    tracing::info!(
        "Endpoint: {} (offset in {}), page size {}, {:?} between pages",
        config.endpoint(),
        config.offset_placement(),
        config.page_size(),
        config.delay()
    );
    if config.session().cookie.is_none() {
        tracing::warn!("No session cookie configured; the listing endpoint may reject requests");
    }

    let sink = FileSink::new(config.output_dir());

    if dry_run {
        let source = HttpListingSource::new(
            config.endpoint(),
            config.offset_placement(),
            config.session(),
        );
        let first = source.page_url(0, config.page_size())?;
        tracing::info!("DRY RUN - no requests will be sent");
        println!("First request: GET {}", first);
        println!(
            "Output file:   {}",
            sink.base_path().join(config.file_name()).display()
        );
        return Ok(());
    }

    let pipeline = ListingPipeline::from_config(sink, &config);
    let report = ExportEngine::new(pipeline).run().await?;

    println!(
        "✅ Exported {} records ({} requests)",
        report.record_count, report.page_count
    );
    println!("📁 Output saved to: {}", report.location);
    Ok(())
}
