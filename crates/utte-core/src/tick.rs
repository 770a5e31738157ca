//! Tick cycle: the three-pass step that advances the universe.
//!
//! Each tick runs these passes in a fixed order over the whole world:
//!
//! 1. **Production** -- every building adds its output to its planet.
//! 2. **Events** -- maybe trigger one new event, then age every active
//!    event and revert the expired ones.
//! 3. **Agents** -- each NPC makes its colonization/trade decision, then
//!    (when the market cycle is enabled) runs one buy/sell cycle.
//!
//! [`run_tick`] is the single-step entry point. The scheduler in
//! [`runner`](crate::runner) calls it under the world lock.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use utte_agents::{AgentConfig, NpcAction, run_npc_logic, update_trade};
use utte_world::{RandomSource, maybe_trigger_event, produce_resources, update_events};

use crate::world::World;

/// Errors that can occur during tick execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    /// The tick counter cannot advance any further.
    #[error("tick counter overflowed at {tick}")]
    TickOverflow {
        /// The last completed tick.
        tick: u64,
    },
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number just completed.
    pub tick: u64,
    /// Total units produced across the universe.
    pub produced: u64,
    /// Events triggered this tick (0 or 1).
    pub events_triggered: usize,
    /// Events that expired this tick.
    pub events_expired: usize,
    /// Planets colonized this tick.
    pub colonizations: usize,
    /// Planet trades plus successful market trades.
    pub trades: usize,
    /// Events in effect after the tick.
    pub active_events: usize,
}

/// Advance `world` by one tick.
///
/// `now` drives colonization cooldowns. On error nothing is mutated.
pub fn run_tick(
    world: &mut World,
    random: &mut dyn RandomSource,
    now: DateTime<Utc>,
    config: &AgentConfig,
) -> Result<TickSummary, TickError> {
    let tick = world
        .tick
        .checked_add(1)
        .ok_or(TickError::TickOverflow { tick: world.tick })?;

    let mut summary = TickSummary {
        tick,
        ..TickSummary::default()
    };

    // Production
    summary.produced = produce_resources(&mut world.planets);

    // Events
    if maybe_trigger_event(&mut world.planets, &mut world.events, random) {
        summary.events_triggered = 1;
    }
    summary.events_expired = update_events(&mut world.events, &mut world.planets).len();

    // Agents
    for npc in &mut world.npcs {
        match run_npc_logic(npc, &mut world.planets, random, now) {
            NpcAction::Colonized { .. } => {
                summary.colonizations = summary.colonizations.saturating_add(1);
            }
            NpcAction::Traded { .. } => summary.trades = summary.trades.saturating_add(1),
            NpcAction::CooldownActive | NpcAction::Idle => {}
        }
        if config.market_cycle && update_trade(npc, &mut world.planets, random).is_success() {
            summary.trades = summary.trades.saturating_add(1);
        }
    }

    world.tick = tick;
    summary.active_events = world.events.len();

    debug!(?summary, "tick passes complete");
    if summary.events_triggered > 0 || summary.colonizations > 0 {
        info!(
            tick,
            produced = summary.produced,
            colonizations = summary.colonizations,
            active_events = summary.active_events,
            "tick completed"
        );
    }
    Ok(summary)
}
