//! Replenishment Worker Pool
//!
//! Attempt recording must never wait on exercise generation, so refills run
//! as jobs on a bounded queue drained by a small worker pool. A job failure
//! is retried with doubling backoff, then logged and dropped; it has no
//! caller to report to, and the pool heals the deficit on the next
//! consumption or cache miss.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::engine::PracticeEngine;

// == Replenish Job ==
/// One unit of background work: refill the pool for a (user, language) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplenishJob {
    pub user_id: String,
    pub language: String,
}

// == Replenish Queue ==
/// Submitting half of the bounded replenishment queue.
///
/// Cloning is cheap; all clones feed the same worker pool.
#[derive(Debug, Clone)]
pub struct ReplenishQueue {
    tx: mpsc::Sender<ReplenishJob>,
}

impl ReplenishQueue {
    /// Creates a bounded queue, returning the submitting half and the
    /// receiver to hand to `spawn_replenish_workers`.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ReplenishJob>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Submits a job without blocking.
    ///
    /// A full or closed queue drops the job with a warning rather than
    /// failing the caller; returns whether the job was accepted.
    pub fn submit(&self, job: ReplenishJob) -> bool {
        match self.tx.try_send(job) {
            Ok(()) => true,
            Err(TrySendError::Full(job)) => {
                warn!(
                    "Replenish queue full; dropping job for user {} language {}",
                    job.user_id, job.language
                );
                false
            }
            Err(TrySendError::Closed(job)) => {
                warn!(
                    "Replenish queue closed; dropping job for user {} language {}",
                    job.user_id, job.language
                );
                false
            }
        }
    }
}

// == Worker Pool ==
/// Spawns the worker pool draining the replenishment queue.
///
/// Each worker pulls jobs until the queue closes (every `ReplenishQueue`
/// clone dropped) and refills pools up to the engine's target size. Returns
/// the workers' join handles; abort them for immediate shutdown, or drop the
/// queue and await them to drain remaining jobs first.
pub fn spawn_replenish_workers(
    engine: Arc<PracticeEngine>,
    receiver: mpsc::Receiver<ReplenishJob>,
    config: &Config,
) -> Vec<JoinHandle<()>> {
    let receiver = Arc::new(Mutex::new(receiver));
    let worker_count = config.replenish_workers.max(1);
    let max_retries = config.replenish_max_retries;
    let base_backoff = Duration::from_millis(config.replenish_retry_backoff_ms);

    (0..worker_count)
        .map(|worker_id| {
            let engine = engine.clone();
            let receiver = receiver.clone();
            tokio::spawn(async move {
                info!("Replenish worker {} started", worker_id);
                loop {
                    // Lock only long enough to pull the next job
                    let job = { receiver.lock().await.recv().await };
                    let Some(job) = job else {
                        break;
                    };
                    run_job(&engine, &job, max_retries, base_backoff).await;
                }
                info!("Replenish worker {} stopped", worker_id);
            })
        })
        .collect()
}

/// Runs one job to completion, retrying transient failures with doubling
/// backoff. Failures are swallowed and logged; nothing propagates.
async fn run_job(
    engine: &PracticeEngine,
    job: &ReplenishJob,
    max_retries: u32,
    base_backoff: Duration,
) {
    for try_number in 0..=max_retries {
        let result = engine
            .replenish(&job.user_id, &job.language, engine.target_size())
            .await
            .with_context(|| {
                format!(
                    "replenishing cache for user {} language {}",
                    job.user_id, job.language
                )
            });

        match result {
            Ok(inserted) => {
                if inserted > 0 {
                    info!(
                        "Background replenish inserted {} exercises for user {} language {}",
                        inserted, job.user_id, job.language
                    );
                } else {
                    debug!(
                        "Background replenish found pool already full for user {} language {}",
                        job.user_id, job.language
                    );
                }
                return;
            }
            Err(err) => {
                warn!("Replenish job failed (try {}): {:#}", try_number + 1, err);
                if try_number < max_retries {
                    tokio::time::sleep(base_backoff * 2u32.pow(try_number)).await;
                }
            }
        }
    }
    error!(
        "Giving up on replenish job for user {} language {} after {} tries",
        job.user_id,
        job.language,
        max_retries + 1
    );
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::StubGenerator;
    use crate::store::Store;
    use std::collections::HashMap;

    fn test_config() -> Config {
        Config {
            cache_target_size: 3,
            replenish_workers: 2,
            replenish_queue_capacity: 8,
            replenish_max_retries: 0,
            replenish_retry_backoff_ms: 10,
        }
    }

    async fn engine_with_tokens() -> Arc<PracticeEngine> {
        let store = Store::open();
        let mut bank = HashMap::new();
        bank.insert("商店".to_string(), 1);
        store.tokenbanks().set_all("james", "cmn", bank).await;
        Arc::new(PracticeEngine::new(
            store,
            Arc::new(StubGenerator),
            &test_config(),
        ))
    }

    #[tokio::test]
    async fn test_workers_fill_pool_from_queue() {
        let engine = engine_with_tokens().await;
        let (queue, receiver) = ReplenishQueue::bounded(8);
        let handles = spawn_replenish_workers(engine.clone(), receiver, &test_config());

        assert!(queue.submit(ReplenishJob {
            user_id: "james".to_string(),
            language: "cmn".to_string(),
        }));

        // Give the pool a moment to drain the job
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(engine.store().cache().count_unused("james", "cmn").await, 3);

        drop(queue);
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_failed_job_does_not_kill_worker() {
        let engine = engine_with_tokens().await;
        let (queue, receiver) = ReplenishQueue::bounded(8);
        let handles = spawn_replenish_workers(engine.clone(), receiver, &test_config());

        // No tokenbank for this pair; the job fails and is swallowed
        queue.submit(ReplenishJob {
            user_id: "maria".to_string(),
            language: "spa".to_string(),
        });
        queue.submit(ReplenishJob {
            user_id: "james".to_string(),
            language: "cmn".to_string(),
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(engine.store().cache().count_unused("james", "cmn").await, 3);
        assert_eq!(engine.store().cache().count_unused("maria", "spa").await, 0);

        drop(queue);
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_full_queue_drops_job() {
        let (queue, _receiver) = ReplenishQueue::bounded(1);

        let job = ReplenishJob {
            user_id: "james".to_string(),
            language: "cmn".to_string(),
        };
        assert!(queue.submit(job.clone()));
        // No worker is draining; the second submit overflows
        assert!(!queue.submit(job));
    }

    #[tokio::test]
    async fn test_closed_queue_drops_job() {
        let (queue, receiver) = ReplenishQueue::bounded(1);
        drop(receiver);

        assert!(!queue.submit(ReplenishJob {
            user_id: "james".to_string(),
            language: "cmn".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_workers_stop_when_queue_dropped() {
        let engine = engine_with_tokens().await;
        let (queue, receiver) = ReplenishQueue::bounded(8);
        let handles = spawn_replenish_workers(engine, receiver, &test_config());

        drop(queue);
        for handle in handles {
            handle.await.unwrap();
        }
    }
}
