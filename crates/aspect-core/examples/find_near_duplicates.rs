use aspect_core::{config::LogLevel, logging, Aspect, Config};
use log::{error, info};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        log_level: LogLevel::Info,
        show_progress: true,
        ..Config::default()
    };
    logging::init_logger(&config)?;

    let images: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if images.is_empty() {
        error!("Usage: find_near_duplicates IMAGE...");
        return Ok(());
    }

    let aspect = Aspect::new(config)?;
    let report = aspect.compute(&images)?;
    let hashed: Vec<_> = report.fingerprints().collect();

    // Every pair above the configured threshold
    let mut pairs = 0;
    for (i, (path_a, fp_a)) in hashed.iter().enumerate() {
        for (path_b, fp_b) in hashed.iter().skip(i + 1) {
            if aspect.is_duplicate(fp_a, fp_b) {
                pairs += 1;
                println!(
                    "{:.6}  {}  {}",
                    fp_a.similarity(fp_b),
                    path_a.display(),
                    path_b.display()
                );
            }
        }
    }

    info!(
        "{} near-duplicate pairs among {} images ({} failed)",
        pairs,
        report.succeeded(),
        report.failed()
    );
    Ok(())
}
