//! Pieces shared by the three action simulators: force rolls, round tallies and the
//! improvement-destroy rule.

use crate::combat::model::{CombatContext, WarPolicy};
use crate::combat::rng::Rng;

/// Every action is fought as this many micro-rounds.
pub const MICRO_ROUNDS: u8 = 3;

/// A force roll lands in `[ROLL_FLOOR × value, value)`.
pub const ROLL_FLOOR: f64 = 0.4;

/// Variance applied to infrastructure and unit-attrition formulas.
pub const EFFECT_VARIANCE: (f64, f64) = (0.85, 1.05);

#[inline]
pub fn force_roll(rng: &mut Rng, value: f64) -> f64 {
    rng.next_float(ROLL_FLOOR * value, value)
}

#[inline]
pub fn effect_variance(rng: &mut Rng) -> f64 {
    rng.next_float(EFFECT_VARIANCE.0, EFFECT_VARIANCE.1)
}

/// Share of the full effect earned at a given tier.
#[inline]
pub fn tier_fraction(tier: u8) -> f64 {
    f64::from(tier) / f64::from(MICRO_ROUNDS)
}

/// Clamps a loss figure into `[0, available]`.
#[inline]
pub fn clamp_loss(loss: f64, available: u64) -> f64 {
    loss.clamp(0.0, available as f64)
}

/// Chance (0-100) to destroy an improvement on a decisive win; zero below tier 3.
pub fn improvement_destroy_chance(base: f64, tier: u8, context: &CombatContext) -> f64 {
    if tier < MICRO_ROUNDS {
        return 0.0;
    }
    let mut chance = base;
    if context.attacker_policy == WarPolicy::Pirate {
        chance *= 2.0;
    }
    if context.attacker_policy == WarPolicy::Tactician {
        chance *= 2.0;
    }
    if context.defender_policy == WarPolicy::Guardian {
        chance *= 0.5;
    }
    chance.clamp(0.0, 100.0)
}
