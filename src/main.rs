use log::{error, info, warn};

use wmr_logger::config::LoggerConfig;
use wmr_logger::replay::{build_dispatcher, read_input, replay_bytes, ReplayReport};
use wmr_logger::utils::render_reading;
use wmr_logger::Codec;

async fn run(config: LoggerConfig) -> Result<ReplayReport, Box<dyn std::error::Error>> {
    let (mut dispatcher, latest) = build_dispatcher(&config)?;
    let codec = Codec::new(config.float_encoding);

    let bytes = match read_input(config.input.as_deref()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read encoded readings: {}", e);
            return Err(e.into());
        }
    };
    info!("Read {} bytes of encoded readings", bytes.len());

    let report = replay_bytes(&codec, bytes, &mut dispatcher);

    // Print summary
    for (kind, count) in &report.by_kind {
        info!("  {}: {} readings", kind, count);
    }
    if let Some(latest) = latest {
        match latest.lock() {
            Ok(latest) => {
                info!("Latest readings:");
                for reading in latest.iter() {
                    info!("  {}", render_reading(reading));
                }
            }
            Err(e) => error!("Latest snapshot unavailable: {}", e),
        }
    }

    if report.decoded == 0 {
        warn!("No readings decoded from input!");
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match LoggerConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(());
        }
    });

    tokio::select! {
        result = run(config) => {
            match result {
                Ok(report) => match report.error {
                    Some(e) => error!("Replay stopped early: {}", e),
                    None => info!("Replay completed successfully"),
                },
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        Ok(()) = &mut rx => {
            info!("Replay interrupted by user. Exiting gracefully.");
        }
    }

    Ok(())
}
