//! The market cycle: small buy and sell trades at the NPC's offer price.
//!
//! Each tick [`update_trade`] picks a random planet and resource, then
//! flips a coin between buying and selling:
//!
//! - **Buy** 1 to 5 units from the planet at the NPC's offer price. Blocked
//!   when the hold is full or the planet has 5 units or fewer. The amount
//!   is capped by the planet's stock and by what the NPC can afford.
//! - **Sell** 1 to 5 units to the planet at offer price + 2. Blocked when
//!   the NPC carries none of the resource.
//!
//! A blocked trade is logged and mutates nothing.

use tracing::{debug, error, info};
use utte_types::{Npc, Planet, Resource};
use utte_world::RandomSource;

use crate::cargo::{add_cargo, is_full, remove_cargo};
use crate::error::AgentError;

/// A planet must hold more than this many units before an NPC buys.
pub const MIN_PLANET_STOCK: u32 = 5;

/// Largest single buy or sell, in units.
pub const MAX_LOT: usize = 5;

/// Markup over the offer price when selling.
pub const SELL_MARKUP: u32 = 2;

/// Why a market trade did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeBlock {
    /// There are no planets to trade with.
    NoPlanets,
    /// The NPC's hold is at capacity.
    CargoFull,
    /// The planet holds too little of the resource.
    InsufficientStock,
    /// The NPC cannot afford a single unit.
    InsufficientCredits,
    /// The NPC carries none of the resource.
    NoCargo,
    /// A checked computation overflowed.
    Overflow,
}

/// Result of one market cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// The NPC bought from a planet.
    Bought {
        /// Resource traded.
        resource: Resource,
        /// Units bought.
        amount: u32,
        /// Credits paid.
        price: u64,
    },
    /// The NPC sold to a planet.
    Sold {
        /// Resource traded.
        resource: Resource,
        /// Units sold.
        amount: u32,
        /// Credits received.
        price: u64,
    },
    /// Nothing was traded.
    Blocked(TradeBlock),
}

impl TradeOutcome {
    /// Whether resources changed hands.
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Blocked(_))
    }
}

/// Draw a lot size in `1..=MAX_LOT`.
fn lot_size(random: &mut dyn RandomSource) -> u32 {
    let lot = random.int_less_than(MAX_LOT).saturating_add(1);
    u32::try_from(lot).unwrap_or(1)
}

/// Try to buy `resource` from `planet`.
pub fn try_buy(
    npc: &mut Npc,
    planet: &mut Planet,
    resource: Resource,
    random: &mut dyn RandomSource,
) -> TradeOutcome {
    if is_full(&npc.cargo, npc.max_cargo) {
        error!(npc = %npc.name, "cargo full, cannot buy");
        return TradeOutcome::Blocked(TradeBlock::CargoFull);
    }
    let stock = planet.resource(resource);
    if stock <= MIN_PLANET_STOCK {
        error!(npc = %npc.name, planet = %planet.name, %resource, stock, "not enough stock to buy");
        return TradeOutcome::Blocked(TradeBlock::InsufficientStock);
    }

    let offer = npc.offer_price(resource);
    let mut amount = lot_size(random).min(stock);
    if offer > 0 {
        let affordable = npc.credits.checked_div(u64::from(offer)).unwrap_or(0);
        amount = amount.min(u32::try_from(affordable).unwrap_or(u32::MAX));
    }
    if amount == 0 {
        let err = AgentError::InsufficientCredits {
            required: u64::from(offer),
            available: npc.credits,
        };
        error!(npc = %npc.name, %resource, %err, "cannot afford to buy");
        return TradeOutcome::Blocked(TradeBlock::InsufficientCredits);
    }

    let price = u64::from(offer).saturating_mul(u64::from(amount));
    if let Err(err) = add_cargo(&mut npc.cargo, resource, amount) {
        error!(npc = %npc.name, %resource, %err, "buy rejected");
        return TradeOutcome::Blocked(TradeBlock::Overflow);
    }
    let pool = planet.resources.entry(resource).or_insert(0);
    *pool = pool.saturating_sub(amount);
    npc.credits = npc.credits.saturating_sub(price);
    info!(npc = %npc.name, planet = %planet.name, %resource, amount, price, "bought");
    TradeOutcome::Bought {
        resource,
        amount,
        price,
    }
}

/// Try to sell `resource` to `planet`.
pub fn try_sell(
    npc: &mut Npc,
    planet: &mut Planet,
    resource: Resource,
    random: &mut dyn RandomSource,
) -> TradeOutcome {
    let held = npc.cargo_of(resource);
    if held == 0 {
        error!(npc = %npc.name, %resource, "no cargo to sell");
        return TradeOutcome::Blocked(TradeBlock::NoCargo);
    }

    let amount = lot_size(random).min(held);
    let unit = npc.offer_price(resource).saturating_add(SELL_MARKUP);
    let price = u64::from(unit).saturating_mul(u64::from(amount));
    if let Err(err) = remove_cargo(&mut npc.cargo, resource, amount) {
        error!(npc = %npc.name, %resource, %err, "sell rejected");
        return TradeOutcome::Blocked(TradeBlock::NoCargo);
    }
    let pool = planet.resources.entry(resource).or_insert(0);
    *pool = pool.saturating_add(amount);
    npc.credits = npc.credits.saturating_add(price);
    info!(npc = %npc.name, planet = %planet.name, %resource, amount, price, "sold");
    TradeOutcome::Sold {
        resource,
        amount,
        price,
    }
}

/// Run one market cycle for `npc`.
pub fn update_trade(
    npc: &mut Npc,
    planets: &mut [Planet],
    random: &mut dyn RandomSource,
) -> TradeOutcome {
    if planets.is_empty() {
        debug!(npc = %npc.name, "no planets available for trade");
        return TradeOutcome::Blocked(TradeBlock::NoPlanets);
    }
    let pick = random.int_less_than(planets.len());
    let Some(planet) = planets.get_mut(pick) else {
        return TradeOutcome::Blocked(TradeBlock::NoPlanets);
    };
    let resource = Resource::ALL
        .get(random.int_less_than(Resource::ALL.len()))
        .copied()
        .unwrap_or(Resource::Iron);

    if random.uniform01() < 0.5 {
        debug!(npc = %npc.name, planet = %planet.name, %resource, "attempting buy");
        try_buy(npc, planet, resource, random)
    } else {
        debug!(npc = %npc.name, planet = %planet.name, %resource, "attempting sell");
        try_sell(npc, planet, resource, random)
    }
}
