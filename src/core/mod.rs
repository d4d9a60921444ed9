pub mod extractor;
pub mod watcher;

pub use crate::domain::model::{PositionChange, QueuePosition, RunReport};
pub use crate::domain::ports::{Notifier, PositionStore, ResultSource};
pub use crate::utils::error::Result;
