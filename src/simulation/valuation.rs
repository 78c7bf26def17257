//! Consumable usage and monetary valuation of losses.

use serde::{Deserialize, Serialize};

use crate::combat::model::{ActionSpec, NationCombatProfile, UnitLosses};

/// 24-hour average market prices, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePrices {
    pub gasoline: f64,
    pub munitions: f64,
    pub steel: f64,
    pub aluminum: f64,
}

impl Default for ResourcePrices {
    fn default() -> Self {
        Self {
            gasoline: 3000.0,
            munitions: 2000.0,
            steel: 3500.0,
            aluminum: 2500.0,
        }
    }
}

pub const SOLDIER_BASE_VALUE: f64 = 5.0;
pub const TANK_BASE_VALUE: f64 = 60.0;
pub const TANK_STEEL: f64 = 0.5;
pub const AIRCRAFT_BASE_VALUE: f64 = 4000.0;
pub const AIRCRAFT_ALUMINUM: f64 = 5.0;
pub const SHIP_BASE_VALUE: f64 = 50_000.0;
pub const SHIP_STEEL: f64 = 30.0;

const GROUND_MUNITIONS_PER_SOLDIER: f64 = 0.0002;
const GROUND_RESOURCE_PER_TANK: f64 = 0.01;
const AIR_RESOURCE_PER_AIRCRAFT: f64 = 0.25;
const NAVAL_GASOLINE_PER_SHIP: f64 = 2.0;
const NAVAL_MUNITIONS_PER_SHIP: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Consumables {
    pub gasoline: f64,
    pub munitions: f64,
}

impl Consumables {
    pub fn value(&self, prices: &ResourcePrices) -> f64 {
        self.gasoline * prices.gasoline + self.munitions * prices.munitions
    }
}

/// Per-unit replacement cost at the given prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitValues {
    pub soldier: f64,
    pub tank: f64,
    pub aircraft: f64,
    pub ship: f64,
}

impl UnitValues {
    pub fn at_prices(prices: &ResourcePrices) -> Self {
        Self {
            soldier: SOLDIER_BASE_VALUE,
            tank: TANK_BASE_VALUE + TANK_STEEL * prices.steel,
            aircraft: AIRCRAFT_BASE_VALUE + AIRCRAFT_ALUMINUM * prices.aluminum,
            ship: SHIP_BASE_VALUE + SHIP_STEEL * prices.steel,
        }
    }

    pub fn losses_value(&self, losses: &UnitLosses) -> f64 {
        losses.soldiers * self.soldier
            + losses.tanks * self.tank
            + losses.aircraft * self.aircraft
            + losses.ships * self.ship
    }
}

/// `(attacker, defender)` consumable usage for the action. Deterministic: depends only on
/// committed and available unit counts. The defender is assumed to field everything it has.
pub fn consumables_for(
    action: &ActionSpec,
    defender: &NationCombatProfile,
) -> (Consumables, Consumables) {
    match *action {
        ActionSpec::Ground {
            attacking_soldiers,
            attacking_tanks,
            arm_soldiers_with_munitions,
        } => {
            let attacker_soldier_munitions = if arm_soldiers_with_munitions {
                attacking_soldiers as f64 * GROUND_MUNITIONS_PER_SOLDIER
            } else {
                0.0
            };
            (
                ground_usage(attacking_tanks, attacker_soldier_munitions),
                ground_usage(
                    defender.tanks,
                    defender.soldiers as f64 * GROUND_MUNITIONS_PER_SOLDIER,
                ),
            )
        }
        ActionSpec::Air {
            attacking_aircraft, ..
        } => (air_usage(attacking_aircraft), air_usage(defender.aircraft)),
        ActionSpec::Naval { attacking_ships } => {
            (naval_usage(attacking_ships), naval_usage(defender.ships))
        }
    }
}

fn ground_usage(tanks: u64, soldier_munitions: f64) -> Consumables {
    let tank_usage = tanks as f64 * GROUND_RESOURCE_PER_TANK;
    Consumables {
        gasoline: tank_usage,
        munitions: soldier_munitions + tank_usage,
    }
}

fn air_usage(aircraft: u64) -> Consumables {
    let usage = aircraft as f64 * AIR_RESOURCE_PER_AIRCRAFT;
    Consumables {
        gasoline: usage,
        munitions: usage,
    }
}

fn naval_usage(ships: u64) -> Consumables {
    Consumables {
        gasoline: ships as f64 * NAVAL_GASOLINE_PER_SHIP,
        munitions: ships as f64 * NAVAL_MUNITIONS_PER_SHIP,
    }
}
