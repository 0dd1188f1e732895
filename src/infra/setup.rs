use crate::{
    adapters::{http::app_state::AppState, persistence::JsonFileWaitlistStore},
    infra::config::AppConfig,
    use_cases::waitlist::{WaitlistRepo, WaitlistUseCases},
};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = Arc::new(JsonFileWaitlistStore::new(config.waitlist_path.clone()));

    // An unreadable file is reported per request as a 500; don't refuse to start.
    match store.count().await {
        Ok(count) => tracing::info!(
            path = %store.path().display(),
            count,
            "Waitlist store opened"
        ),
        Err(err) => tracing::warn!(
            path = %store.path().display(),
            error = ?err,
            "Waitlist store is not readable"
        ),
    }

    let waitlist_use_cases = WaitlistUseCases::new(store as Arc<dyn WaitlistRepo>);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
    })
}

pub fn init_tracing(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped if the file can't be created
    let (json_layer, file_err) = match File::create(log_file) {
        Ok(file) => {
            let layer = fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true);
            (Some(layer), None)
        }
        Err(err) => (None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if let Some(err) = file_err {
        tracing::warn!(
            path = %log_file.display(),
            error = %err,
            "Cannot create log file, JSON logs disabled"
        );
    }
}
