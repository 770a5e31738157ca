//! Simulation loop runner.
//!
//! This module provides [`Engine`], which drives [`run_tick`] on a fixed
//! period until a [`ShutdownSignal`] fires. Each step holds the world lock
//! for the whole tick, publishes the resulting snapshot into the
//! [`UpdateDistribution`] slots, then releases the lock.
//!
//! A failing tick is logged and the loop carries on with the next period.
//!
//! [`run_tick`]: crate::tick::run_tick

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};
use utte_agents::AgentConfig;
use utte_world::RandomSource;

use crate::handoff::UpdateDistribution;
use crate::shutdown::ShutdownSignal;
use crate::tick::{self, TickError, TickSummary};
use crate::world::SharedWorld;

/// Outcome of a finished [`Engine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Ticks that completed successfully.
    pub ticks_run: u64,
    /// Ticks that returned an error.
    pub ticks_failed: u64,
    /// Summary of the last successful tick.
    pub last_summary: Option<TickSummary>,
}

/// The simulation engine: world, hand-offs, randomness and timing.
pub struct Engine {
    world: SharedWorld,
    updates: UpdateDistribution,
    random: Box<dyn RandomSource>,
    agents: AgentConfig,
    tick_interval: Duration,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("agents", &self.agents)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Assemble an engine. `tick_interval` must be non-zero.
    pub fn new(
        world: SharedWorld,
        updates: UpdateDistribution,
        random: Box<dyn RandomSource>,
        agents: AgentConfig,
        tick_interval: Duration,
    ) -> Self {
        Self {
            world,
            updates,
            random,
            agents,
            tick_interval,
        }
    }

    /// Run one tick and publish its snapshot, holding the world lock
    /// throughout.
    pub async fn step(&mut self) -> Result<TickSummary, TickError> {
        let mut world = self.world.lock().await;
        let summary = tick::run_tick(&mut world, self.random.as_mut(), Utc::now(), &self.agents)?;
        self.updates.publish_world(&world);
        drop(world);
        Ok(summary)
    }

    /// Tick every period until `shutdown` fires.
    ///
    /// Cancellation is checked at the top of each iteration and raced
    /// against the interval, never in the middle of a tick.
    pub async fn run(mut self, shutdown: ShutdownSignal) -> RunReport {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;

        info!(tick_interval_ms = self.tick_interval.as_millis(), "simulation engine started");
        let mut report = RunReport::default();

        loop {
            if shutdown.is_requested() {
                break;
            }
            tokio::select! {
                () = shutdown.wait() => break,
                _ = interval.tick() => {}
            }

            match self.step().await {
                Ok(summary) => {
                    debug!(tick = summary.tick, "tick published");
                    report.ticks_run = report.ticks_run.saturating_add(1);
                    report.last_summary = Some(summary);
                }
                Err(err) => {
                    error!(%err, "tick failed");
                    report.ticks_failed = report.ticks_failed.saturating_add(1);
                }
            }
        }

        info!(
            ticks_run = report.ticks_run,
            ticks_failed = report.ticks_failed,
            "simulation engine stopped"
        );
        report
    }
}
