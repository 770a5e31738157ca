//! NPC colonization and trading behaviour for the UTTE Universe.
//!
//! This crate contains the logic layer for NPCs: everything that operates
//! on NPC and planet state during the agent pass of a tick, without
//! touching scheduling or I/O.
//!
//! # Modules
//!
//! - [`cargo`] -- Checked cargo hold arithmetic.
//! - [`config`] -- Agent pass tunables ([`AgentConfig`]).
//! - [`error`] -- Error types for cargo and trade operations ([`AgentError`]).
//! - [`market`] -- The per-tick buy/sell cycle ([`update_trade`]).
//! - [`npc`] -- Colonization and planet trades ([`run_npc_logic`]).

pub mod cargo;
pub mod config;
pub mod error;
pub mod market;
pub mod npc;

// Re-export primary types at crate root for convenience.
pub use config::AgentConfig;
pub use error::AgentError;
pub use market::{TradeBlock, TradeOutcome, update_trade};
pub use npc::{NpcAction, TradeReport, colonize_planet, execute_trade, run_npc_logic};
