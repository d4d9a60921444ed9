// Adapters layer: concrete implementations for the waitlist site, the
// position file and the Telegram Bot API.

pub mod http;
pub mod storage;
pub mod telegram;

pub use http::DaycareResultFetcher;
pub use storage::FilePositionStore;
pub use telegram::TelegramNotifier;
