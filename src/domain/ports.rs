use crate::domain::model::QueuePosition;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces the raw results page for the configured applicant.
#[async_trait]
pub trait ResultSource: Send + Sync {
    async fn fetch_html(&self) -> Result<String>;
}

pub trait PositionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<QueuePosition>>> + Send;
    fn save(
        &self,
        position: QueuePosition,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}
