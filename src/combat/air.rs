//! Airstrike resolution.
//!
//! Aircraft duel over three micro-rounds. Against the `aircraft` target this is a dogfight and
//! both fleets bleed at the dogfight rates; against anything else the strike package is less
//! exposed. Unit targets (soldiers, tanks, ships) take attrition scaled by the outcome tier.

use crate::combat::model::{AirTarget, IterationResult, NationCombatProfile, UnitLosses};
use crate::combat::modifiers::Modifiers;
use crate::combat::rng::Rng;
use crate::combat::rounds::{clamp_loss, effect_variance, force_roll, tier_fraction, MICRO_ROUNDS};

pub const AIRCRAFT_VALUE: f64 = 3.0;

/// `(attacker, defender)` aircraft lost per point of the opposing roll.
const DOGFIGHT_LOSS_RATES: (f64, f64) = (0.01, 0.018337);
const STRIKE_LOSS_RATES: (f64, f64) = (0.006, 0.009091);

const INFRA_PER_AIRCRAFT: f64 = 0.35353535;
const INFRA_CAP_SHARE: f64 = 0.5;
const INFRA_CAP_FLAT: f64 = 100.0;
/// Infra damage is incidental unless infrastructure is the target.
const INCIDENTAL_INFRA_DIVISOR: f64 = 3.0;

/// Soft cap and per-net-aircraft factor for a unit target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttritionProfile {
    pub cap_share: f64,
    pub cap_flat: f64,
    pub base_factor: f64,
}

pub const SOLDIER_ATTRITION: AttritionProfile = AttritionProfile {
    cap_share: 0.75,
    cap_flat: 1000.0,
    base_factor: 35.0,
};
pub const TANK_ATTRITION: AttritionProfile = AttritionProfile {
    cap_share: 0.75,
    cap_flat: 10.0,
    base_factor: 1.25,
};
pub const SHIP_ATTRITION: AttritionProfile = AttritionProfile {
    cap_share: 0.5,
    cap_flat: 4.0,
    base_factor: 0.0285,
};

impl AttritionProfile {
    pub fn for_target(target: AirTarget) -> Option<Self> {
        match target {
            AirTarget::Soldiers => Some(SOLDIER_ATTRITION),
            AirTarget::Tanks => Some(TANK_ATTRITION),
            AirTarget::Ships => Some(SHIP_ATTRITION),
            AirTarget::Infra | AirTarget::Aircraft | AirTarget::Money => None,
        }
    }

    fn soft_cap(&self, units: u64) -> f64 {
        self.cap_share * units as f64 + self.cap_flat
    }
}

/// Share of the unit-attrition formula applied at each tier.
pub fn attrition_tier_multiplier(tier: u8) -> f64 {
    match tier {
        3 => 1.0,
        2 => 0.7,
        1 => 0.4,
        _ => 0.0,
    }
}

/// Committed strike package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirOrder {
    pub aircraft: u64,
    pub target: AirTarget,
}

pub fn simulate_air(
    order: &AirOrder,
    defender: &NationCombatProfile,
    modifiers: &Modifiers,
    rng: &mut Rng,
) -> IterationResult {
    if order.aircraft == 0 {
        return IterationResult::default();
    }

    let attacker_value = order.aircraft as f64 * AIRCRAFT_VALUE;
    let defender_value = defender.aircraft as f64 * AIRCRAFT_VALUE;
    let (attacker_rate, defender_rate) = if order.target.is_dogfight() {
        DOGFIGHT_LOSS_RATES
    } else {
        STRIKE_LOSS_RATES
    };

    let mut tier = 0u8;
    let mut attacker = UnitLosses::default();
    let mut defender_losses = UnitLosses::default();

    for _ in 0..MICRO_ROUNDS {
        let attacker_roll = force_roll(rng, attacker_value);
        let defender_roll = force_roll(rng, defender_value);
        if attacker_roll > defender_roll {
            tier += 1;
        }
        attacker.aircraft += defender_roll * attacker_rate;
        defender_losses.aircraft += attacker_roll * defender_rate;
    }

    attacker.aircraft = clamp_loss(attacker.aircraft * modifiers.attacker_casualty, order.aircraft);
    defender_losses.aircraft = clamp_loss(
        defender_losses.aircraft * modifiers.defender_casualty,
        defender.aircraft,
    );

    let mut result = IterationResult {
        tier,
        attacker_losses: attacker,
        defender_losses,
        ..IterationResult::default()
    };

    if tier == 0 {
        return result;
    }

    if let Some(profile) = AttritionProfile::for_target(order.target) {
        let available = match order.target {
            AirTarget::Soldiers => defender.soldiers,
            AirTarget::Tanks => defender.tanks,
            _ => defender.ships,
        };
        let killed = unit_attrition(
            order.aircraft,
            defender,
            available,
            profile,
            tier,
            modifiers,
            rng,
        );
        match order.target {
            AirTarget::Soldiers => result.defender_losses.soldiers = killed,
            AirTarget::Tanks => result.defender_losses.tanks = killed,
            _ => result.defender_losses.ships = killed,
        }
    }

    result.infra_destroyed = infra_destroyed(order, defender, modifiers, tier, rng);
    result
}

fn unit_attrition(
    aircraft: u64,
    defender: &NationCombatProfile,
    available: u64,
    profile: AttritionProfile,
    tier: u8,
    modifiers: &Modifiers,
    rng: &mut Rng,
) -> f64 {
    let raw = (aircraft as f64 - 0.5 * defender.aircraft as f64)
        * profile.base_factor
        * effect_variance(rng);
    let capped = raw.min(available as f64).min(profile.soft_cap(available)).max(0.0);
    clamp_loss(
        capped * attrition_tier_multiplier(tier) * modifiers.defender_casualty,
        available,
    )
}

fn infra_destroyed(
    order: &AirOrder,
    defender: &NationCombatProfile,
    modifiers: &Modifiers,
    tier: u8,
    rng: &mut Rng,
) -> f64 {
    let raw = (order.aircraft as f64 - 0.5 * defender.aircraft as f64)
        * INFRA_PER_AIRCRAFT
        * effect_variance(rng)
        * tier_fraction(tier);
    let cap = INFRA_CAP_SHARE * defender.highest_city_infra.max(0.0) + INFRA_CAP_FLAT;
    let mut infra = raw.min(cap).max(0.0) * modifiers.infra_multiplier();
    if order.target != AirTarget::Infra {
        infra /= INCIDENTAL_INFRA_DIVISOR;
    }
    infra
}
