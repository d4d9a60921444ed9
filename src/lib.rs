pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{DaycareResultFetcher, FilePositionStore, TelegramNotifier};
pub use config::{LogFormat, WatchConfig, WatchSettings};
pub use crate::core::{extractor::extract_position, watcher::PositionWatcher};
pub use utils::error::{ErrorKind, Result, WatchError};
