//! World model, tick cycle, and orchestration for the UTTE Universe.
//!
//! This crate owns the three-pass tick (production, events, agents) and the
//! machinery around it: the shared world handle, the hand-off slots that
//! feed observer streams, cancellation, and configuration.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `utte-config.yaml` with
//!   environment overrides.
//! - [`handoff`] -- Single-slot, latest-wins snapshot hand-offs.
//! - [`runner`] -- The periodic [`Engine`] loop.
//! - [`shutdown`] -- Shared [`ShutdownSignal`].
//! - [`tick`] -- One simulation step.
//! - [`world`] -- [`World`] and its [`SharedWorld`] handle.
//!
//! [`Engine`]: runner::Engine
//! [`ShutdownSignal`]: shutdown::ShutdownSignal
//! [`World`]: world::World
//! [`SharedWorld`]: world::SharedWorld

pub mod config;
pub mod handoff;
pub mod runner;
pub mod shutdown;
pub mod tick;
pub mod world;

pub use config::{ConfigError, UniverseConfig};
pub use handoff::{HandoffSlot, UpdateDistribution};
pub use runner::{Engine, RunReport};
pub use shutdown::ShutdownSignal;
pub use tick::{TickError, TickSummary, run_tick};
pub use world::{SharedWorld, World, WorldStatus};
