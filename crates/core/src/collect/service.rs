//! One concurrent collection pass.

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;

use chainfolio_sources::{BalanceRecord, BalanceSource, QueryTarget};

/// Sink capacity. Producers block (backpressure) rather than drop records
/// when the collector falls behind this many outstanding records.
pub const SINK_CAPACITY: usize = 1000;

/// Records at or below this USD value are dust: they are dropped by the
/// collector, which also keeps near-zero denominators out of the share
/// computation.
pub const MATERIALITY_FLOOR: Decimal = dec!(0.01);

/// One producer task: a source queried with one target.
#[derive(Clone)]
pub struct CollectionJob {
    pub source: Arc<dyn BalanceSource>,
    pub target: QueryTarget,
}

/// The full set of producer tasks for one pass, built by the caller as
/// the cross product of configured sources and their targets.
#[derive(Default)]
pub struct CollectionPlan {
    jobs: Vec<CollectionJob>,
}

impl CollectionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Arc<dyn BalanceSource>, target: QueryTarget) {
        self.jobs.push(CollectionJob { source, target });
    }

    /// Number of producer tasks this plan will launch.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Runs one collection pass and returns the retained records in arrival
/// order.
///
/// Every job gets its own task; a failing job logs and contributes
/// nothing. The coordinator task joins all producers and only then drops
/// the final sender, so the sink closes exactly once, after the last
/// record went in — no record can arrive after close. The collector
/// drains from the start, concurrently with the producers, so a full
/// sink never deadlocks against an idle consumer.
pub async fn collect(plan: CollectionPlan) -> Vec<BalanceRecord> {
    let (sender, mut receiver) = mpsc::channel::<BalanceRecord>(SINK_CAPACITY);

    debug!("dispatching {} collection tasks", plan.len());
    let handles: Vec<_> = plan
        .jobs
        .into_iter()
        .map(|job| {
            let sink = sender.clone();
            tokio::spawn(run_job(job, sink))
        })
        .collect();

    // Completion coordinator: the only place the sink is closed.
    let coordinator = tokio::spawn(async move {
        for result in join_all(handles).await {
            if let Err(err) = result {
                warn!("collection task panicked: {err}");
            }
        }
        drop(sender);
    });

    let mut records = Vec::new();
    while let Some(record) = receiver.recv().await {
        if record.usd_value > MATERIALITY_FLOOR {
            records.push(record);
        }
    }

    // The channel only closes after the coordinator dropped the last
    // sender, so this join never blocks meaningfully.
    let _ = coordinator.await;

    debug!("collected {} records above the materiality floor", records.len());
    records
}

async fn run_job(job: CollectionJob, sink: mpsc::Sender<BalanceRecord>) {
    match job.source.query(&job.target).await {
        Ok(records) => {
            for record in records {
                if sink.send(record).await.is_err() {
                    // Receiver dropped; nothing left to deliver to.
                    return;
                }
            }
        }
        Err(err) => {
            warn!(
                "source {} failed for {}: {err}",
                job.source.label(),
                job.target
            );
        }
    }
}
