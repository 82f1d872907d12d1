/*!
 * Minimal Scheduler - Demo Entry Point
 *
 * Registers the shared-queue scheduler with the in-process host and drives
 * it with a synthetic workload:
 * - one waker task admitting bursts of runnable tasks
 * - one task per simulated CPU dispatching and "running" each slice
 */

use miette::{IntoDiagnostic, WrapErr};
use minimal_scheduler::{
    init_tracing, CpuId, Dispatch, EnqueueFlags, Host, SchedulerConfig, SharedQueueScheduler,
    TaskHandle,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// How long the demo workload runs unless interrupted
const RUN_FOR: Duration = Duration::from_secs(2);

/// Tasks admitted per burst
const BURST: u64 = 16;

/// Idle CPUs poll again after this long
const IDLE_BACKOFF: Duration = Duration::from_micros(500);

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let config = SchedulerConfig::from_env().wrap_err("loading scheduler configuration")?;
    info!(config = ?config, "Minimal scheduler demo starting...");

    let scheduler = Arc::new(SharedQueueScheduler::from_config(config)?);
    let host = Host::new();
    let registration = Arc::new(host.register(Arc::clone(&scheduler))?);

    let nr_cpus = std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(4);
    info!(nr_cpus, "Spawning simulated CPUs");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let waker = {
        let registration = Arc::clone(&registration);
        let mut shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(20));
            let mut next_id = 0u64;
            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = shutdown.changed() => break,
                }
                for _ in 0..BURST {
                    registration.wake(TaskHandle(next_id), EnqueueFlags::NONE)?;
                    next_id += 1;
                }
            }
            Ok::<u64, minimal_scheduler::SchedulerError>(next_id)
        })
    };

    let mut cpus = Vec::with_capacity(nr_cpus as usize);
    for cpu in 0..nr_cpus {
        let registration = Arc::clone(&registration);
        let mut shutdown = shutdown_rx.clone();
        cpus.push(tokio::spawn(async move {
            let cpu = CpuId(cpu);
            let mut prev = None;
            loop {
                let wait = match registration.cpu_idle(cpu, prev) {
                    Dispatch::Task(dispatched) => {
                        prev = Some(dispatched.task);
                        dispatched.slice.as_duration()
                    }
                    Dispatch::Empty => IDLE_BACKOFF,
                };
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = shutdown.changed() => break,
                }
            }
        }));
    }

    tokio::select! {
        _ = tokio::time::sleep(RUN_FOR) => {}
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                warn!(error = %e, "Failed to listen for Ctrl+C");
            }
        }
    }
    shutdown_tx.send(true).ok();

    let admitted = waker
        .await
        .into_diagnostic()
        .wrap_err("waker task panicked")??;
    for cpu in cpus {
        cpu.await.into_diagnostic().wrap_err("CPU task panicked")?;
    }

    let stats = serde_json::to_string(&scheduler.stats()).into_diagnostic()?;
    info!(admitted, stats = %stats, "Demo finished");
    Ok(())
}
