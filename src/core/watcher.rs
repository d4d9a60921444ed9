use crate::core::extractor::extract_position;
use crate::domain::model::{PositionChange, RunReport};
use crate::domain::ports::{Notifier, PositionStore, ResultSource};
use crate::utils::error::{Result, WatchError};
use std::fmt;

/// Last stage a run reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    Fetched,
    Extracted,
    Compared,
    Persisted,
    Notified,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Start => "start",
            RunStage::Fetched => "fetched",
            RunStage::Extracted => "extracted",
            RunStage::Compared => "compared",
            RunStage::Persisted => "persisted",
            RunStage::Notified => "notified",
        };
        f.write_str(name)
    }
}

pub fn failure_message(error: &WatchError) -> String {
    format!("⚠️ Daycare monitor error:\n{}", error)
}

pub struct PositionWatcher<R: ResultSource, S: PositionStore, N: Notifier> {
    source: R,
    store: S,
    notifier: N,
}

impl<R: ResultSource, S: PositionStore, N: Notifier> PositionWatcher<R, S, N> {
    pub fn new(source: R, store: S, notifier: N) -> Self {
        Self {
            source,
            store,
            notifier,
        }
    }

    /// Runs one check. On failure a best-effort alert is sent and the
    /// original error is returned.
    pub async fn run(&self) -> Result<RunReport> {
        let mut stage = RunStage::Start;

        match self.check(&mut stage).await {
            Ok(report) => {
                tracing::debug!("Run finished at stage '{}'", stage);
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Run failed after stage '{}': {} (kind: {})", stage, e, e.kind());

                if let Err(notify_err) = self.notifier.send(&failure_message(&e)).await {
                    tracing::error!("Failed to send failure notification: {}", notify_err);
                }
                Err(e)
            }
        }
    }

    async fn check(&self, stage: &mut RunStage) -> Result<RunReport> {
        tracing::info!("Fetching waitlist results");
        let html = self.source.fetch_html().await?;
        *stage = RunStage::Fetched;

        let current = extract_position(&html)?;
        *stage = RunStage::Extracted;
        tracing::info!("Current queue position: {}", current);

        let previous = self.store.load().await?;
        let change = PositionChange::classify(previous, current);
        let message = change.message();
        *stage = RunStage::Compared;
        tracing::info!("{}", message);

        self.store.save(current).await?;
        *stage = RunStage::Persisted;

        self.notifier.send(&message).await?;
        *stage = RunStage::Notified;

        Ok(RunReport {
            previous,
            current,
            change,
            message,
        })
    }
}
