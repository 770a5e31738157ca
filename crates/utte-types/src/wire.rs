//! Wire representations of the universe for stream and read clients.
//!
//! Every enum becomes its display name (`"Iron"`, `"Gas Giant"`,
//! `"Mine"`), multipliers are narrowed to `f32`, and timestamps are
//! RFC 3339 strings (empty when unset). A planet's owner is embedded as a
//! full [`NpcView`]; events name their target planet and building type.
//!
//! Types here are exported to `TypeScript` via `ts-rs` for the UI bridge.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingType, Resource};
use crate::structs::{Building, EventTarget, Npc, Planet, WorldEvent};

// ---------------------------------------------------------------------------
// Map conversion helpers
// ---------------------------------------------------------------------------

fn quantities(map: &BTreeMap<Resource, u32>) -> BTreeMap<String, u32> {
    map.iter().map(|(r, q)| (r.name().to_owned(), *q)).collect()
}

#[allow(clippy::cast_possible_truncation)]
fn multipliers(map: &BTreeMap<Resource, f64>) -> BTreeMap<String, f32> {
    map.iter().map(|(r, m)| (r.name().to_owned(), *m as f32)).collect()
}

// ---------------------------------------------------------------------------
// Entity views
// ---------------------------------------------------------------------------

/// Wire view of a [`Building`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingView {
    /// Building type name.
    #[serde(rename = "type")]
    pub building_type: String,
    /// Current level.
    pub level: u32,
    /// Base output per tick, keyed by resource name.
    pub production: BTreeMap<String, u32>,
    /// Building multipliers, keyed by resource name.
    pub modifiers: BTreeMap<String, f32>,
    /// Build cost, keyed by resource name.
    pub build_cost: BTreeMap<String, u32>,
}

impl From<&Building> for BuildingView {
    fn from(building: &Building) -> Self {
        Self {
            building_type: building.building_type.name().to_owned(),
            level: building.level,
            production: quantities(&building.production),
            modifiers: multipliers(&building.modifiers),
            build_cost: quantities(&building.build_cost),
        }
    }
}

/// Wire view of an [`Npc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NpcView {
    /// NPC name.
    pub name: String,
    /// Offered unit prices, keyed by resource name.
    pub offer: BTreeMap<String, u32>,
    /// Credit balance.
    #[ts(type = "number")]
    pub credits: u64,
    /// Carried cargo, keyed by resource name.
    pub cargo: BTreeMap<String, u32>,
    /// Cargo capacity.
    pub max_cargo: u32,
    /// RFC 3339 timestamp of the colonization cooldown, empty when unset.
    pub colonization_cooldown: String,
}

impl From<&Npc> for NpcView {
    fn from(npc: &Npc) -> Self {
        Self {
            name: npc.name.clone(),
            offer: quantities(&npc.offer),
            credits: npc.credits,
            cargo: quantities(&npc.cargo),
            max_cargo: npc.max_cargo,
            colonization_cooldown: npc
                .colonization_cooldown
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
        }
    }
}

/// Wire view of a [`Planet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlanetView {
    /// Planet name.
    pub name: String,
    /// Planet type display name.
    #[serde(rename = "type")]
    pub planet_type: String,
    /// Stored resources, keyed by resource name.
    pub resources: BTreeMap<String, u32>,
    /// Planet multipliers, keyed by resource name.
    pub modifiers: BTreeMap<String, f32>,
    /// Buildings in construction order.
    pub buildings: Vec<BuildingView>,
    /// Owning NPC, if colonized.
    pub owner: Option<NpcView>,
}

impl PlanetView {
    /// Build a view of `planet`, resolving its owner against `npcs`.
    ///
    /// An owner reference that does not resolve is rendered as no owner.
    pub fn from_planet(planet: &Planet, npcs: &[Npc]) -> Self {
        let owner = planet
            .owner
            .and_then(|id| npcs.iter().find(|npc| npc.id == id))
            .map(NpcView::from);
        Self {
            name: planet.name.clone(),
            planet_type: planet.planet_type.name().to_owned(),
            resources: quantities(&planet.resources),
            modifiers: multipliers(&planet.modifiers),
            buildings: planet.buildings.iter().map(BuildingView::from).collect(),
            owner,
        }
    }
}

/// Wire view of a [`WorldEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventView {
    /// Event name.
    pub name: String,
    /// Target discriminator: 0 = planet, 1 = building.
    pub target: u8,
    /// Name of the targeted planet (empty if it no longer resolves).
    pub target_planet: String,
    /// Type name of the targeted building, empty for planet targets.
    pub target_building: String,
    /// Boost multipliers, keyed by resource name.
    pub resource_boost: BTreeMap<String, f32>,
    /// Total lifetime in ticks.
    pub duration: u32,
    /// Ticks remaining.
    pub remaining_ticks: u32,
}

impl EventView {
    /// Build a view of `event`, resolving its target against `planets`.
    pub fn from_event(event: &WorldEvent, planets: &[Planet]) -> Self {
        let planet = planets.iter().find(|p| p.id == event.target.planet());
        let target_building = match event.target {
            EventTarget::Planet { .. } => String::new(),
            EventTarget::Building { index, .. } => planet
                .and_then(|p| p.buildings.get(index))
                .map(|b| b.building_type)
                .map(BuildingType::name)
                .unwrap_or_default()
                .to_owned(),
        };
        Self {
            name: event.name.clone(),
            target: event.target.code(),
            target_planet: planet.map(|p| p.name.clone()).unwrap_or_default(),
            target_building,
            resource_boost: multipliers(&event.boost),
            duration: event.duration,
            remaining_ticks: event.remaining_ticks,
        }
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Response body of the planets read endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlanetList {
    /// All planets.
    pub planets: Vec<PlanetView>,
}

/// Response body of the NPC read endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NpcList {
    /// All NPCs.
    pub npcs: Vec<NpcView>,
}

/// One outbound stream message: the latest planets, NPCs and events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UniverseState {
    /// Planet snapshot.
    pub planets: PlanetList,
    /// NPC snapshot.
    pub npcs: NpcList,
    /// Active events.
    pub events: Vec<EventView>,
}

/// Inbound stream command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum CommandType {
    /// Start receiving universe snapshots.
    Subscribe,
    /// Temporarily stop receiving snapshots.
    Pause,
    /// Continue after a pause.
    Resume,
    /// Stop receiving snapshots.
    Unsubscribe,
}

/// One inbound stream message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClientCommand {
    /// The command kind. Accepted under `type` or `command`.
    #[serde(rename = "type", alias = "command")]
    pub command: CommandType,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::enums::PlanetType;
    use crate::ids::PlanetId;

    fn sample_planet(owner: Option<&Npc>) -> Planet {
        let mut planet = Planet::new("Mars", PlanetType::GasGiant);
        planet.resources.insert(Resource::Fuel, 200);
        planet.modifiers.insert(Resource::Fuel, 2.5);
        let mut building = Building::new(BuildingType::Refinery);
        building.level = 3;
        building.production.insert(Resource::Fuel, 20);
        planet.buildings.push(building);
        planet.owner = owner.map(|n| n.id);
        planet
    }

    #[test]
    fn planet_view_uses_string_keys() {
        let npc = Npc::new("NPC2");
        let planet = sample_planet(Some(&npc));
        let view = PlanetView::from_planet(&planet, std::slice::from_ref(&npc));

        assert_eq!(view.name, "Mars");
        assert_eq!(view.planet_type, "Gas Giant");
        assert_eq!(view.resources.get("Fuel"), Some(&200));
        assert_eq!(view.modifiers.get("Fuel"), Some(&2.5_f32));
        assert_eq!(view.buildings.len(), 1);
        assert_eq!(view.buildings[0].building_type, "Refinery");
        assert_eq!(view.owner.as_ref().map(|o| o.name.as_str()), Some("NPC2"));
    }

    #[test]
    fn dangling_owner_renders_as_none() {
        let npc = Npc::new("Ghost");
        let planet = sample_planet(Some(&npc));
        let view = PlanetView::from_planet(&planet, &[]);
        assert!(view.owner.is_none());
    }

    #[test]
    fn npc_view_formats_cooldown() {
        let mut npc = Npc::new("NPC3");
        npc.credits = 300;
        npc.max_cargo = 60;
        assert_eq!(NpcView::from(&npc).colonization_cooldown, "");

        npc.colonization_cooldown = Some(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap());
        let view = NpcView::from(&npc);
        assert_eq!(view.colonization_cooldown, "2030-01-02T03:04:05Z");
        assert_eq!(view.credits, 300);
        assert_eq!(view.max_cargo, 60);
    }

    #[test]
    fn event_view_names_building_target() {
        let planet = sample_planet(None);
        let event = WorldEvent {
            name: String::from("Fuel Boost"),
            target: EventTarget::Building {
                planet: planet.id,
                index: 0,
            },
            boost: BTreeMap::from([(Resource::Fuel, 1.6)]),
            duration: 5,
            remaining_ticks: 4,
        };
        let view = EventView::from_event(&event, std::slice::from_ref(&planet));
        assert_eq!(view.target, 1);
        assert_eq!(view.target_planet, "Mars");
        assert_eq!(view.target_building, "Refinery");
        assert_eq!(view.remaining_ticks, 4);
    }

    #[test]
    fn event_view_planet_target_has_no_building() {
        let event = WorldEvent {
            name: String::from("Ice Storm"),
            target: EventTarget::Planet {
                planet: PlanetId::new(),
            },
            boost: BTreeMap::new(),
            duration: 5,
            remaining_ticks: 5,
        };
        let view = EventView::from_event(&event, &[]);
        assert_eq!(view.target, 0);
        assert!(view.target_planet.is_empty());
        assert!(view.target_building.is_empty());
    }

    #[test]
    fn client_command_accepts_type_and_command_keys() {
        let by_type: ClientCommand = serde_json::from_str(r#"{"type":"PAUSE"}"#).unwrap();
        assert_eq!(by_type.command, CommandType::Pause);
        let by_alias: ClientCommand =
            serde_json::from_str(r#"{"command":"UNSUBSCRIBE"}"#).unwrap();
        assert_eq!(by_alias.command, CommandType::Unsubscribe);
        assert!(serde_json::from_str::<ClientCommand>(r#"{"type":"JUMP"}"#).is_err());
    }

    #[test]
    fn universe_state_shape() {
        let json = serde_json::to_value(UniverseState::default()).unwrap();
        assert!(json["planets"]["planets"].is_array());
        assert!(json["npcs"]["npcs"].is_array());
        assert!(json["events"].is_array());
    }
}
