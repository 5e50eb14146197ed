//! Background reconciler for provider/local dual-write failures.
//!
//! No transaction spans the local database and the DNS provider. When a
//! provider record has been created but the local side of the approval can
//! no longer be committed, the record is an orphan; tasks here delete it so
//! the request returns to a cleanly retryable pending state. Tasks are keyed
//! by provider record id and the delete is idempotent, so retries are safe.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::services::provider::DynDnsProvider;

const MAX_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub enum ReconcileTask {
    /// Delete a provider record that has no committed local linkage.
    DeleteOrphanRecord {
        provider_record_id: String,
        fqdn: String,
    },
}

/// Handle for enqueueing reconciliation work onto the background worker.
#[derive(Clone)]
pub struct Reconciler {
    tx: mpsc::UnboundedSender<ReconcileTask>,
}

impl Reconciler {
    /// Spawn the worker task and return a cloneable handle.
    pub fn spawn(dns: DynDnsProvider) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(dns, rx));
        Self { tx }
    }

    pub fn enqueue(&self, task: ReconcileTask) {
        tracing::warn!("Enqueueing reconciliation task: {:?}", task);
        if self.tx.send(task).is_err() {
            tracing::error!("Reconciler worker is gone; task dropped");
        }
    }
}

async fn run_worker(dns: DynDnsProvider, mut rx: mpsc::UnboundedReceiver<ReconcileTask>) {
    while let Some(task) = rx.recv().await {
        match task {
            ReconcileTask::DeleteOrphanRecord {
                provider_record_id,
                fqdn,
            } => {
                delete_orphan(&dns, &provider_record_id, &fqdn).await;
            }
        }
    }
}

async fn delete_orphan(dns: &DynDnsProvider, provider_record_id: &str, fqdn: &str) {
    for attempt in 1..=MAX_ATTEMPTS {
        match dns.delete_record(provider_record_id).await {
            Ok(()) => {
                tracing::info!(
                    "Reconciled orphaned provider record {} ({})",
                    provider_record_id,
                    fqdn
                );
                return;
            }
            Err(e) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(
                    "Orphan delete attempt {}/{} for {} failed: {}",
                    attempt,
                    MAX_ATTEMPTS,
                    provider_record_id,
                    e
                );
                tokio::time::sleep(RETRY_DELAY * attempt).await;
            }
            Err(e) => {
                tracing::error!(
                    "Giving up on orphaned provider record {} ({}): {} — manual cleanup required",
                    provider_record_id,
                    fqdn,
                    e
                );
            }
        }
    }
}
