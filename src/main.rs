use creche_watch::utils::logger;
use creche_watch::{
    DaycareResultFetcher, FilePositionStore, LogFormat, PositionWatcher, TelegramNotifier,
    WatchConfig, WatchError,
};

fn fail(e: &WatchError) -> ! {
    println!("[ERROR] {}", e);
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    // No alert on config errors: the bot credentials may be what is missing
    let config = match WatchConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger(LogFormat::default());
            tracing::error!("❌ Configuration failed: {}", e);
            fail(&e);
        }
    };

    logger::init_logger(config.settings.log_format);
    tracing::info!("Starting creche-watch");
    tracing::debug!("Config: {:?}", config);

    let fetcher = match DaycareResultFetcher::new(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => fail(&e),
    };
    let notifier = match TelegramNotifier::new(&config) {
        Ok(notifier) => notifier,
        Err(e) => fail(&e),
    };
    let store = FilePositionStore::new(config.state_file());
    tracing::debug!("Position file: {}", store.path().display());

    let watcher = PositionWatcher::new(fetcher, store, notifier);

    match watcher.run().await {
        Ok(report) => {
            println!("{}", report.message);
            tracing::info!("✅ Check completed");
        }
        Err(e) => {
            tracing::error!(
                "❌ Check failed: {} (kind: {}); {}",
                e,
                e.kind(),
                e.recovery_suggestion()
            );
            fail(&e);
        }
    }
}
