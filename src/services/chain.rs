use crate::domain::RecordSet;
use crate::error::{HarvestError, Result};
use crate::infrastructure::{Selectors, SnapshotExtractor};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// Extra settle time granted when the readiness poll gives up, before the
/// first extraction attempt runs anyway.
const READINESS_GRACE_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// Operations a live browser session exposes to the pipeline. The chain
/// drives the extraction methods; `close` consumes the source, so release
/// can run at most once per session.
#[async_trait]
pub trait TableSource {
    async fn navigate(&mut self) -> Result<()>;
    async fn await_readiness(&mut self) -> Readiness;
    async fn capture(&mut self) -> Result<String>;
    async fn evaluate_rows(&mut self) -> Result<RecordSet>;
    async fn close(self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    NavigatePending,
    WaitingForReadiness,
    AttemptingSnapshot,
    AttemptingLiveEvaluation,
    AttemptingSnapshotRetry,
    Succeeded,
    Failed,
}

/// Ordered extraction attempts with retry-on-empty semantics.
///
/// "Found nothing" is a signal, not a fault: an empty snapshot parse falls
/// through to live evaluation, an empty live evaluation falls through to a
/// fresh snapshot (the page may have finished an in-flight render by then),
/// and only after all three attempts come up empty does the run fail.
/// Session-level errors (navigation, driver) are not recovered here and
/// propagate to the caller.
pub struct ExtractionChain<'a> {
    selectors: &'a Selectors,
    extractor: SnapshotExtractor,
    grace_delay: Duration,
}

impl<'a> ExtractionChain<'a> {
    pub fn new(selectors: &'a Selectors) -> Self {
        Self {
            selectors,
            extractor: SnapshotExtractor,
            grace_delay: READINESS_GRACE_DELAY,
        }
    }

    #[allow(dead_code)]
    pub fn with_grace_delay(mut self, delay: Duration) -> Self {
        self.grace_delay = delay;
        self
    }

    /// Drives the full live pipeline to a terminal state.
    pub async fn run<S: TableSource + Send>(&self, source: &mut S) -> Result<RecordSet> {
        let mut state = ChainState::NavigatePending;
        let mut accepted = RecordSet::new();

        loop {
            state = match state {
                ChainState::NavigatePending => {
                    source.navigate().await?;
                    ChainState::WaitingForReadiness
                }
                ChainState::WaitingForReadiness => {
                    if source.await_readiness().await == Readiness::TimedOut {
                        warn!(
                            "Table widget not observed in time, continuing after {:?} grace delay",
                            self.grace_delay
                        );
                        tokio::time::sleep(self.grace_delay).await;
                    }
                    ChainState::AttemptingSnapshot
                }
                ChainState::AttemptingSnapshot => {
                    let markup = source.capture().await?;
                    let set = self.extractor.extract(&markup, self.selectors);
                    if set.is_empty() {
                        info!("Snapshot parse found no rows, trying live evaluation");
                        ChainState::AttemptingLiveEvaluation
                    } else {
                        accepted = set;
                        ChainState::Succeeded
                    }
                }
                ChainState::AttemptingLiveEvaluation => {
                    let set = source.evaluate_rows().await?;
                    if set.is_empty() {
                        info!("Live evaluation found no rows, retrying snapshot");
                        ChainState::AttemptingSnapshotRetry
                    } else {
                        accepted = set;
                        ChainState::Succeeded
                    }
                }
                ChainState::AttemptingSnapshotRetry => {
                    let markup = source.capture().await?;
                    let set = self.extractor.extract(&markup, self.selectors);
                    if set.is_empty() {
                        ChainState::Failed
                    } else {
                        accepted = set;
                        ChainState::Succeeded
                    }
                }
                ChainState::Succeeded | ChainState::Failed => break,
            };
        }

        if accepted.is_empty() {
            Err(HarvestError::ExtractionEmpty)
        } else {
            info!("Accepted {} rows", accepted.len());
            Ok(accepted)
        }
    }

    /// Offline recovery: only the snapshot technique, against supplied
    /// markup. Bypasses navigation, readiness, and live evaluation.
    pub fn run_offline(&self, markup: &str) -> Result<RecordSet> {
        let set = self.extractor.extract(markup, self.selectors);
        if set.is_empty() {
            Err(HarvestError::ExtractionEmpty)
        } else {
            info!("Accepted {} rows from archived snapshot", set.len());
            Ok(set)
        }
    }
}
