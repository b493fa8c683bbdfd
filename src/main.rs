mod batch;
mod extract;
mod input;
mod metrics;
mod output;
mod readability;
mod sentiment;
mod settings;
mod text;

use anyhow::{Context, Result};
use batch::{BatchDriver, BatchStats};
use extract::ContentExtractor;
use metrics::MetricsEngine;
use readability::VowelGroups;
use sentiment::LexiconSentiment;
use settings::Settings;
use tracing::{error, info};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn build_engine(settings: &Settings) -> Result<MetricsEngine> {
    let Some(path) = &settings.lexicon_path else {
        return Ok(MetricsEngine::english()?);
    };
    let lexicon = LexiconSentiment::from_path(path)?;
    info!(path = ?path, entries = lexicon.len(), "custom sentiment lexicon loaded");
    Ok(MetricsEngine::new(Box::new(lexicon), Box::new(VowelGroups)))
}

fn main() -> Result<()> {
    init_tracing();
    let settings = settings::load().context("Failed to load settings")?;
    info!(settings_loaded = ?settings, msg = "Starting URL text analysis");

    println!("URL Text Metrics");
    println!("================\n");

    let entries = input::read_entries(&settings.input_path)
        .with_context(|| format!("Failed to read {:?}", settings.input_path))?;
    println!("Loaded {} URLs from {:?}\n", entries.len(), settings.input_path);

    let extractor = ContentExtractor::new(&settings.selectors)?;
    let engine = build_engine(&settings)?;

    let rows = BatchDriver::new(&extractor, &engine)
        .workers(settings.workers)
        .progress(settings.progress)
        .run(&entries);
    BatchStats::from_rows(&rows).print();

    if let Err(e) = output::write_results(&settings.output_path, &rows) {
        error!(path = ?settings.output_path, error = %e, "writing results failed");
        return Err(e).with_context(|| format!("Failed to write {:?}", settings.output_path));
    }

    println!("\nAnalysis complete. Results written to: {:?}", settings.output_path);
    Ok(())
}
