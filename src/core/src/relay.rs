//! Turns committed debit events into credits for the asset owners.

use crate::config::RelayConfig;
use crate::errors::LedgerError;
use crate::executor::Executor;
use crate::identity::Credential;
use crate::ownership::OwnershipResolver;
use crate::tx::StateStore;
use crate::types::DEBIT_EVENT;
use tracing::{error, info, warn};

/// Counts from one pass of the relay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelayReport {
    /// Debits that produced a committed credit
    pub credited: usize,
    /// Debits for assets without a price
    pub skipped: usize,
    /// Debits whose credit was rejected or failed to commit
    pub failed: usize,
    /// Sequence number to resume from
    pub cursor: u64,
}

/// Submits a credit for every committed debit event.
pub struct DebitRelay<'e, S, O> {
    executor: &'e Executor<S, O>,
    credential: Credential,
    config: RelayConfig,
}

impl<'e, S: StateStore, O: OwnershipResolver> DebitRelay<'e, S, O> {
    /// Creates a relay submitting credits through `executor` as `credential`.
    pub fn new(executor: &'e Executor<S, O>, credential: Credential, config: RelayConfig) -> Self {
        Self {
            executor,
            credential,
            config,
        }
    }

    /// Processes every event committed at or after `since`.
    pub fn run_once(&self, since: u64) -> Result<RelayReport, LedgerError> {
        let events = self.executor.store().events_since(since)?;
        let mut report = RelayReport {
            cursor: since,
            ..RelayReport::default()
        };

        for event in events {
            report.cursor = event.seq + 1;
            if event.name != DEBIT_EVENT {
                continue;
            }

            let asset = String::from_utf8_lossy(&event.payload).into_owned();
            let Some(price) = self.config.price_of(&asset) else {
                warn!(seq = event.seq, asset = %asset, "no price for debited asset");
                report.skipped += 1;
                continue;
            };

            let args = vec![asset.clone(), price.to_string()];
            match self.executor.submit(&self.credential, "credit", args) {
                Ok(receipt) if receipt.committed => {
                    info!(
                        seq = event.seq,
                        asset = %asset,
                        price,
                        tx_id = %receipt.tx_id,
                        "credited asset owner"
                    );
                    report.credited += 1;
                }
                Ok(receipt) => {
                    warn!(
                        seq = event.seq,
                        asset = %asset,
                        status = receipt.response.status,
                        "credit rejected: {}",
                        receipt.response.message
                    );
                    report.failed += 1;
                }
                Err(e) => {
                    error!(seq = event.seq, asset = %asset, "credit failed to commit: {}", e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
