//! Multiplicative adjustment factors derived once per request from war type, policies,
//! fortification, blitz state and air superiority.

use serde::Serialize;

use crate::combat::model::{CombatContext, ControlOwner, NationCombatProfile, WarPolicy, WarType};

pub const PIRATE_LOOT_BONUS: f64 = 1.4;
pub const MONEYBAGS_LOOT_PENALTY: f64 = 0.6;
pub const ATTRITION_INFRA_BONUS: f64 = 1.1;
pub const TURTLE_INFRA_FACTOR: f64 = 0.9;
pub const MONEYBAGS_INFRA_FACTOR: f64 = 1.05;
pub const COVERT_ARCANE_INFRA_FACTOR: f64 = 1.05;
pub const BLITZ_FACTOR: f64 = 1.1;
pub const FORTIFIED_CASUALTY_FACTOR: f64 = 1.25;
pub const AIR_SUPERIORITY_TANK_FACTOR: f64 = 0.5;

/// Read-only factor bundle shared by every trial of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Modifiers {
    pub infra_factor: f64,
    pub loot_factor: f64,
    pub attacker_loot_policy: f64,
    pub defender_loot_policy: f64,
    pub attacker_infra_policy: f64,
    pub defender_infra_policy: f64,
    pub attacker_blitz: f64,
    pub defender_blitz: f64,
    pub attacker_tank_strength: f64,
    pub defender_tank_strength: f64,
    pub attacker_casualty: f64,
    pub defender_casualty: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        resolve_modifiers(
            &CombatContext::default(),
            &NationCombatProfile::default(),
            &NationCombatProfile::default(),
        )
    }
}

impl Modifiers {
    /// Composite multiplier on infrastructure destroyed by the attacker.
    pub fn infra_multiplier(&self) -> f64 {
        self.infra_factor
            * self.attacker_infra_policy
            * self.defender_infra_policy
            * self.attacker_blitz
    }

    /// Composite multiplier on money looted by the attacker.
    pub fn loot_multiplier(&self) -> f64 {
        self.loot_factor * self.attacker_loot_policy * self.defender_loot_policy
    }
}

/// `(infra, loot)` factor pair for a war type.
pub const fn war_type_factors(war_type: WarType) -> (f64, f64) {
    match war_type {
        WarType::Attrition => (1.0, 0.25),
        WarType::Raid => (0.25, 1.0),
        WarType::Ordinary => (0.5, 0.5),
    }
}

/// Derives the factor bundle. Of the defender profile only `is_fortified` is read; the attacker
/// profile is accepted for symmetry and currently unused.
pub fn resolve_modifiers(
    context: &CombatContext,
    _attacker: &NationCombatProfile,
    defender: &NationCombatProfile,
) -> Modifiers {
    let (infra_factor, loot_factor) = war_type_factors(context.war_type);

    let attacker_loot_policy = if context.attacker_policy == WarPolicy::Pirate {
        PIRATE_LOOT_BONUS
    } else {
        1.0
    };
    let defender_loot_policy = if context.defender_policy == WarPolicy::Moneybags {
        MONEYBAGS_LOOT_PENALTY
    } else {
        1.0
    };

    let attacker_infra_policy = if context.attacker_policy == WarPolicy::Attrition {
        ATTRITION_INFRA_BONUS
    } else {
        1.0
    };
    let defender_infra_policy = defender_infra_policy(context.defender_policy);

    let attacker_blitz = if context.attacker_blitz { BLITZ_FACTOR } else { 1.0 };
    let defender_blitz = if context.defender_blitz { BLITZ_FACTOR } else { 1.0 };

    let (attacker_tank_strength, defender_tank_strength) = match context.air_superiority {
        ControlOwner::Defender => (AIR_SUPERIORITY_TANK_FACTOR, 1.0),
        ControlOwner::Attacker => (1.0, AIR_SUPERIORITY_TANK_FACTOR),
        ControlOwner::None => (1.0, 1.0),
    };

    let fortified = if defender.is_fortified {
        FORTIFIED_CASUALTY_FACTOR
    } else {
        1.0
    };

    Modifiers {
        infra_factor,
        loot_factor,
        attacker_loot_policy,
        defender_loot_policy,
        attacker_infra_policy,
        defender_infra_policy,
        attacker_blitz,
        defender_blitz,
        attacker_tank_strength,
        defender_tank_strength,
        attacker_casualty: defender_blitz * fortified,
        defender_casualty: attacker_blitz,
    }
}

fn defender_infra_policy(policy: WarPolicy) -> f64 {
    let mut factor = 1.0;
    if policy == WarPolicy::Turtle {
        factor *= TURTLE_INFRA_FACTOR;
    }
    if policy == WarPolicy::Moneybags {
        factor *= MONEYBAGS_INFRA_FACTOR;
    }
    if matches!(policy, WarPolicy::Covert | WarPolicy::Arcane) {
        factor *= COVERT_ARCANE_INFRA_FACTOR;
    }
    factor
}
