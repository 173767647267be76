//! Tick pipeline and scheduler.
//!
//! `Monitor` runs one synchronous tick: collect -> power -> emissions ->
//! history append. `MonitorRuntime` wraps it in a timer-driven Tokio task
//! and publishes each outcome on a watch channel, so presenters subscribe
//! to plain structured reports instead of owning the loop.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;

use crate::core::config::Config;
use crate::error::Result;

use super::collector::{CollectorConfig, MetricsCollector, MetricsSource};
use super::emissions::{estimate_emissions, EmissionsEstimate};
use super::history::{HistoryBuffer, HistoryRecord};
use super::metrics::MetricsSnapshot;
use super::power::{estimate_power, PowerEstimate, PowerProfile};

/// Everything a presenter needs for one tick. Layout, color and refresh
/// mechanics are entirely the presenter's business.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub snapshot: MetricsSnapshot,
    pub power: PowerEstimate,
    pub emissions: EmissionsEstimate,
    /// `None` while the rolling window has too few samples
    pub anomaly: Option<bool>,
}

/// Per-tick outcome published to presenters.
#[derive(Debug, Clone)]
pub enum TickUpdate {
    /// Channel placeholder before the first tick completes
    Pending,
    Report(TickReport),
    /// Collection failed this tick; estimates are skipped and the loop
    /// continues at the next scheduled tick
    CollectionFailed { timestamp: i64, error: String },
}

/// The polling pipeline with its explicitly-owned rolling history.
pub struct Monitor {
    source: Box<dyn MetricsSource>,
    profile: PowerProfile,
    grid_emission_factor: f64,
    anomaly_factor: f64,
    history: HistoryBuffer,
}

impl Monitor {
    pub fn new(config: &Config, collector_config: CollectorConfig) -> Self {
        Self::with_source(
            Box::new(MetricsCollector::with_config(collector_config)),
            config,
        )
    }

    /// Build the pipeline over an arbitrary snapshot source.
    pub fn with_source(source: Box<dyn MetricsSource>, config: &Config) -> Self {
        Self {
            source,
            profile: config.power.clone(),
            grid_emission_factor: config.grid_emission_factor,
            anomaly_factor: config.anomaly_factor,
            history: HistoryBuffer::with_capacity(config.history_capacity, config.min_samples),
        }
    }

    /// Run one tick of the derivation pipeline.
    ///
    /// A collection failure is reported, not propagated: the caller keeps
    /// ticking and history is left untouched for that tick.
    pub fn tick(&mut self) -> TickUpdate {
        let snapshot = match self.source.collect() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Metric collection failed: {}", e);
                return TickUpdate::CollectionFailed {
                    timestamp: chrono::Utc::now().timestamp(),
                    error: e.to_string(),
                };
            }
        };

        let power = estimate_power(&self.profile, &snapshot);
        let emissions = estimate_emissions(power.facility_watts, self.grid_emission_factor);

        self.history.push(HistoryRecord {
            timestamp: snapshot.timestamp,
            cpu_usage_percent: snapshot.cpu_usage_percent,
            memory_percent: snapshot.memory_percent,
            it_total_watts: power.it_total_watts,
            facility_watts: power.facility_watts,
            hourly_co2_g: emissions.hourly_g,
        });

        let anomaly = self
            .history
            .power_anomaly(power.facility_watts, self.anomaly_factor);

        TickUpdate::Report(TickReport {
            snapshot,
            power,
            emissions,
            anomaly,
        })
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }
}

/// Timer-driven scheduler publishing tick outcomes on a watch channel.
///
/// Single writer, synchronous readers; shutdown is a broadcast signal and
/// losing the in-flight tick on shutdown is acceptable.
pub struct MonitorRuntime {
    update_rx: watch::Receiver<Arc<TickUpdate>>,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
    runtime: tokio::runtime::Runtime,
}

/// Clonable handle that stops the tick loop and wakes blocked readers.
/// Safe to call from a signal handler thread.
#[derive(Clone)]
pub struct ShutdownHandle(broadcast::Sender<()>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        let _ = self.0.send(());
    }
}

impl MonitorRuntime {
    /// Spawn the tick loop on a small dedicated runtime.
    pub fn new(monitor: Monitor, interval: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .thread_name("ecotop-tick")
            .build()?;

        let (update_tx, update_rx) = watch::channel(Arc::new(TickUpdate::Pending));
        let (shutdown_tx, loop_shutdown_rx) = broadcast::channel::<()>(1);
        let shutdown_rx = shutdown_tx.subscribe();

        runtime.spawn(tick_loop(monitor, interval, update_tx, loop_shutdown_rx));

        Ok(Self {
            update_rx,
            shutdown_tx,
            shutdown_rx,
            runtime,
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(self.shutdown_tx.clone())
    }

    /// Block until the next tick outcome is published.
    ///
    /// Returns `None` once the tick loop has stopped or a shutdown signal
    /// arrives, so a blocked reader wakes without waiting out the interval.
    pub fn next_update(&mut self) -> Option<Arc<TickUpdate>> {
        let rx = &mut self.update_rx;
        let shutdown = &mut self.shutdown_rx;
        self.runtime.block_on(async {
            tokio::select! {
                biased;
                _ = shutdown.recv() => None,
                changed = rx.changed() => {
                    changed.ok()?;
                    Some(rx.borrow_and_update().clone())
                }
            }
        })
    }

    /// Stop the tick loop. The runtime itself shuts down on drop.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn tick_loop(
    mut monitor: Monitor,
    interval: Duration,
    update_tx: watch::Sender<Arc<TickUpdate>>,
    mut shutdown: broadcast::Receiver<()>,
) {
    log::info!("Tick loop started (interval {:?})", interval);

    // CPU usage needs one measurement interval before the first read
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                log::info!("Tick loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let update = monitor.tick();
                // send() only fails when every receiver is gone
                if update_tx.send(Arc::new(update)).is_err() {
                    break;
                }
            }
        }
    }
}
