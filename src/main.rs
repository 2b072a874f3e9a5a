use clap::Parser;
use sentiment_endpoint::classifier::{Classify, SentimentClassifier};
use sentiment_endpoint::server;
use sentiment_endpoint::settings::Settings;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::parse();
    let device = settings.device()?;

    let classifier = match &settings.model_path {
        Some(path) => SentimentClassifier::load(path, device),
        None => SentimentClassifier::from_hub(&settings.model_id, &settings.revision, device),
    }
    .inspect_err(|err| tracing::error!(error = %err, "failed to load model"))?;
    let classifier: Arc<dyn Classify> = Arc::new(classifier);

    actix_web::rt::System::new().block_on(server::serve(
        classifier,
        &settings.host,
        settings.port,
        settings.workers,
    ))?;
    Ok(())
}
