//! Engine binary for the UTTE Universe.
//!
//! Wires configuration, seeding, the tick loop and the observer server
//! together, then runs until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `utte-config.yaml` (or `UTTE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the random source, seeded when `world.rng_seed` is set
//! 4. Seed planets and NPCs
//! 5. Start the observer server
//! 6. Run the tick loop until Ctrl-C, then shut both down

mod error;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utte_core::config::LogFormat;
use utte_core::{Engine, SharedWorld, ShutdownSignal, UniverseConfig, UpdateDistribution, World};
use utte_observer::AppState;
use utte_world::{RngSource, seed_universe};

use crate::error::EngineError;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any startup step fails or a background task dies.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = UniverseConfig::load()?;

    // 2. Initialize structured logging.
    init_logging(config.logging.format);
    info!(
        tick_interval_ms = config.world.tick_interval_ms,
        rng_seed = ?config.world.rng_seed,
        port = config.server.port,
        market_cycle = config.agents.market_cycle,
        "configuration loaded"
    );

    // 3. Random source.
    let mut random = config
        .world
        .rng_seed
        .map_or_else(RngSource::from_entropy, RngSource::seeded);

    // 4. Seed the universe.
    let (planets, npcs) = seed_universe(&config.seed, &mut random, Utc::now())?;
    info!(planets = planets.len(), npcs = npcs.len(), "universe seeded");

    let world = SharedWorld::new(World::new(planets, npcs));
    let updates = UpdateDistribution::new();
    let shutdown = ShutdownSignal::new();

    // 5. Observer server.
    let app_state = Arc::new(AppState::new(world.clone(), updates.clone(), shutdown.clone()));
    let observer = utte_observer::spawn_observer(&config.server, app_state).await?;
    info!(addr = %observer.addr, "observer server started");

    // 6. Tick loop.
    let engine = Engine::new(
        world,
        updates,
        Box::new(random),
        config.agents.clone(),
        Duration::from_millis(config.world.tick_interval_ms),
    );
    let engine_task = tokio::spawn(engine.run(shutdown.clone()));

    tokio::signal::ctrl_c()
        .await
        .map_err(|source| EngineError::Signal { source })?;
    info!("shutdown requested");
    shutdown.request();

    let report = engine_task.await?;
    observer.task.await?;

    info!(
        ticks_run = report.ticks_run,
        ticks_failed = report.ticks_failed,
        "utte-engine exiting"
    );
    Ok(())
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` selects the filter, defaulting to `info`.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init(),
    }
}
