//! Ground battle resolution.
//!
//! Each side fields a soldier force and a tank force. A micro-round rolls all four forces,
//! compares the combined attacker roll to the combined defender roll, and books casualties
//! against the opposing rolls. Winners lose tanks at a slightly lower rate than losers.

use crate::combat::model::{
    CombatContext, ControlOwner, IterationResult, NationCombatProfile, UnitLosses,
};
use crate::combat::modifiers::Modifiers;
use crate::combat::rng::Rng;
use crate::combat::rounds::{
    clamp_loss, effect_variance, force_roll, improvement_destroy_chance, tier_fraction,
    MICRO_ROUNDS,
};

pub const MUNITIONS_SOLDIER_VALUE: f64 = 1.75;
pub const UNARMED_SOLDIER_VALUE: f64 = 1.0;
pub const DEFENDER_SOLDIER_VALUE: f64 = 1.75;
pub const TANK_VALUE: f64 = 40.0;
/// One extra defending soldier per this many residents of the defender's largest city.
pub const POPULATION_PER_RESISTANCE_SOLDIER: f64 = 400.0;

const SOLDIER_LOSS_PER_SOLDIER_ROLL: f64 = 0.0084;
const SOLDIER_LOSS_PER_TANK_ROLL: f64 = 0.0092;
/// `(per opposing soldier roll, per opposing tank roll)` tank losses for the round winner.
const WINNER_TANK_LOSS: (f64, f64) = (0.0004060606, 0.00066666666);
/// Same for the round loser.
const LOSER_TANK_LOSS: (f64, f64) = (0.00043225806, 0.00070967741);

const INFRA_PER_SOLDIER: f64 = 0.000606061;
const INFRA_PER_TANK: f64 = 0.01;
const INFRA_CAP_SHARE: f64 = 0.2;
const INFRA_CAP_FLAT: f64 = 25.0;

const LOOT_PER_SOLDIER: f64 = 1.1;
const LOOT_PER_TANK: f64 = 25.15;
const LOOT_VARIANCE: (f64, f64) = (0.8, 1.1);
const LOOT_CASH_SHARE: f64 = 0.75;
const LOOT_CASH_RESERVE: f64 = 1_000_000.0;

const IMPROVEMENT_BASE_CHANCE: f64 = 10.0;

/// Committed attacking force for a ground action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundOrder {
    pub soldiers: u64,
    pub tanks: u64,
    pub armed_with_munitions: bool,
}

/// Roll ceilings for the four forces after all strength modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundForces {
    pub attacker_soldiers: f64,
    pub attacker_tanks: f64,
    pub defender_soldiers: f64,
    pub defender_tanks: f64,
    /// Defending soldiers including the population resistance bonus.
    pub defender_effective_soldiers: f64,
}

impl GroundForces {
    pub fn new(order: &GroundOrder, defender: &NationCombatProfile, modifiers: &Modifiers) -> Self {
        let soldier_value = if order.armed_with_munitions {
            MUNITIONS_SOLDIER_VALUE
        } else {
            UNARMED_SOLDIER_VALUE
        };
        let defender_effective_soldiers = defender.soldiers as f64
            + defender.highest_city_population.max(0.0) / POPULATION_PER_RESISTANCE_SOLDIER;

        Self {
            attacker_soldiers: order.soldiers as f64 * soldier_value,
            attacker_tanks: order.tanks as f64 * TANK_VALUE * modifiers.attacker_tank_strength,
            defender_soldiers: defender_effective_soldiers * DEFENDER_SOLDIER_VALUE,
            defender_tanks: defender.tanks as f64 * TANK_VALUE * modifiers.defender_tank_strength,
            defender_effective_soldiers,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RoundRolls {
    attacker_soldiers: f64,
    defender_soldiers: f64,
    attacker_tanks: f64,
    defender_tanks: f64,
}

impl RoundRolls {
    fn draw(rng: &mut Rng, forces: &GroundForces) -> Self {
        Self {
            attacker_soldiers: force_roll(rng, forces.attacker_soldiers),
            defender_soldiers: force_roll(rng, forces.defender_soldiers),
            attacker_tanks: force_roll(rng, forces.attacker_tanks),
            defender_tanks: force_roll(rng, forces.defender_tanks),
        }
    }

    fn attacker_won(&self) -> bool {
        self.attacker_soldiers + self.attacker_tanks > self.defender_soldiers + self.defender_tanks
    }
}

pub fn simulate_ground(
    order: &GroundOrder,
    defender: &NationCombatProfile,
    context: &CombatContext,
    modifiers: &Modifiers,
    rng: &mut Rng,
) -> IterationResult {
    if order.soldiers == 0 && order.tanks == 0 {
        return IterationResult {
            money_looted: Some(0.0),
            improvement_destroy_chance: Some(0.0),
            ..IterationResult::default()
        };
    }

    let forces = GroundForces::new(order, defender, modifiers);

    let mut tier = 0u8;
    let mut attacker = UnitLosses::default();
    let mut defender_losses = UnitLosses::default();

    for _ in 0..MICRO_ROUNDS {
        let rolls = RoundRolls::draw(rng, &forces);
        let won = rolls.attacker_won();
        if won {
            tier += 1;
        }

        attacker.soldiers += rolls.defender_soldiers * SOLDIER_LOSS_PER_SOLDIER_ROLL
            + rolls.defender_tanks * SOLDIER_LOSS_PER_TANK_ROLL;
        defender_losses.soldiers += rolls.attacker_soldiers * SOLDIER_LOSS_PER_SOLDIER_ROLL
            + rolls.attacker_tanks * SOLDIER_LOSS_PER_TANK_ROLL;

        let (attacker_rates, defender_rates) = if won {
            (WINNER_TANK_LOSS, LOSER_TANK_LOSS)
        } else {
            (LOSER_TANK_LOSS, WINNER_TANK_LOSS)
        };
        attacker.tanks += rolls.defender_soldiers * attacker_rates.0
            + rolls.defender_tanks * attacker_rates.1;
        defender_losses.tanks += rolls.attacker_soldiers * defender_rates.0
            + rolls.attacker_tanks * defender_rates.1;
    }

    attacker.soldiers = clamp_loss(attacker.soldiers * modifiers.attacker_casualty, order.soldiers);
    attacker.tanks = clamp_loss(attacker.tanks * modifiers.attacker_casualty, order.tanks);
    defender_losses.soldiers = clamp_loss(
        defender_losses.soldiers * modifiers.defender_casualty,
        defender.soldiers,
    );
    defender_losses.tanks = clamp_loss(
        defender_losses.tanks * modifiers.defender_casualty,
        defender.tanks,
    );

    let mut result = IterationResult {
        tier,
        attacker_losses: attacker,
        defender_losses,
        money_looted: Some(0.0),
        improvement_destroy_chance: Some(0.0),
        ..IterationResult::default()
    };

    if tier == 0 {
        return result;
    }

    if context.ground_control == ControlOwner::Attacker {
        result.defender_losses.aircraft = clamp_loss(
            ground_control_aircraft_rate(tier) * order.tanks as f64,
            defender.aircraft,
        );
    }

    result.infra_destroyed = infra_destroyed(order, defender, &forces, modifiers, tier, rng);
    result.money_looted = Some(money_looted(order, defender, modifiers, tier, rng));
    result.improvement_destroy_chance = Some(improvement_destroy_chance(
        IMPROVEMENT_BASE_CHANCE,
        tier,
        context,
    ));

    result
}

/// Defender aircraft destroyed per attacking tank when the attacker holds ground control.
pub fn ground_control_aircraft_rate(tier: u8) -> f64 {
    match tier {
        3 => 0.005025,
        2 => 0.00335,
        1 => 0.001675,
        _ => 0.0,
    }
}

fn infra_destroyed(
    order: &GroundOrder,
    defender: &NationCombatProfile,
    forces: &GroundForces,
    modifiers: &Modifiers,
    tier: u8,
    rng: &mut Rng,
) -> f64 {
    let soldier_pressure =
        (order.soldiers as f64 - 0.5 * forces.defender_effective_soldiers) * INFRA_PER_SOLDIER;
    let tank_pressure = (order.tanks as f64 - 0.5 * defender.tanks as f64) * INFRA_PER_TANK;
    let raw = (soldier_pressure + tank_pressure) * effect_variance(rng) * tier_fraction(tier);
    let cap = INFRA_CAP_SHARE * defender.highest_city_infra.max(0.0) + INFRA_CAP_FLAT;
    raw.min(cap).max(0.0) * modifiers.infra_multiplier()
}

fn money_looted(
    order: &GroundOrder,
    defender: &NationCombatProfile,
    modifiers: &Modifiers,
    tier: u8,
    rng: &mut Rng,
) -> f64 {
    let base = order.soldiers as f64 * LOOT_PER_SOLDIER + order.tanks as f64 * LOOT_PER_TANK;
    let mut loot = base
        * f64::from(tier)
        * rng.next_float(LOOT_VARIANCE.0, LOOT_VARIANCE.1)
        * modifiers.loot_multiplier();
    if let Some(cash) = defender.money {
        let cap = (LOOT_CASH_SHARE * cash).min(cash - LOOT_CASH_RESERVE);
        loot = loot.min(cap);
    }
    loot.max(0.0)
}
