//! Tunables for NPC behaviour.
//!
//! The engine builds [`AgentConfig`] from the `agents` section of
//! `utte-config.yaml` and passes it into every agent pass.

use serde::{Deserialize, Serialize};

/// Configuration for the agent pass of each tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Run the market buy/sell cycle for every NPC after its colonization
    /// and trade decision (default: true).
    #[serde(default = "default_market_cycle")]
    pub market_cycle: bool,
}

const fn default_market_cycle() -> bool {
    true
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            market_cycle: default_market_cycle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_cycle_on_by_default() {
        assert!(AgentConfig::default().market_cycle);
    }
}
