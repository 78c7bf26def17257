//! Naval battle resolution. Same three-round shape as ground and air with a single force per side.

use crate::combat::model::{CombatContext, IterationResult, NationCombatProfile, UnitLosses};
use crate::combat::modifiers::Modifiers;
use crate::combat::rng::Rng;
use crate::combat::rounds::{
    clamp_loss, effect_variance, force_roll, improvement_destroy_chance, tier_fraction,
    MICRO_ROUNDS,
};

pub const SHIP_VALUE: f64 = 4.0;
const SHIP_LOSS_RATE: f64 = 0.01375;
const INFRA_PER_SHIP: f64 = 2.625;
const INFRA_CAP_SHARE: f64 = 0.5;
const INFRA_CAP_FLAT: f64 = 25.0;
const IMPROVEMENT_BASE_CHANCE: f64 = 15.0;

pub fn simulate_naval(
    attacking_ships: u64,
    defender: &NationCombatProfile,
    context: &CombatContext,
    modifiers: &Modifiers,
    rng: &mut Rng,
) -> IterationResult {
    if attacking_ships == 0 {
        return IterationResult {
            improvement_destroy_chance: Some(0.0),
            ..IterationResult::default()
        };
    }

    let attacker_value = attacking_ships as f64 * SHIP_VALUE;
    let defender_value = defender.ships as f64 * SHIP_VALUE;

    let mut tier = 0u8;
    let mut attacker = UnitLosses::default();
    let mut defender_losses = UnitLosses::default();

    for _ in 0..MICRO_ROUNDS {
        let attacker_roll = force_roll(rng, attacker_value);
        let defender_roll = force_roll(rng, defender_value);
        if attacker_roll > defender_roll {
            tier += 1;
        }
        attacker.ships += defender_roll * SHIP_LOSS_RATE;
        defender_losses.ships += attacker_roll * SHIP_LOSS_RATE;
    }

    attacker.ships = clamp_loss(attacker.ships * modifiers.attacker_casualty, attacking_ships);
    defender_losses.ships = clamp_loss(
        defender_losses.ships * modifiers.defender_casualty,
        defender.ships,
    );

    let mut result = IterationResult {
        tier,
        attacker_losses: attacker,
        defender_losses,
        improvement_destroy_chance: Some(0.0),
        ..IterationResult::default()
    };

    if tier == 0 {
        return result;
    }

    let raw = (attacking_ships as f64 - 0.5 * defender.ships as f64)
        * INFRA_PER_SHIP
        * effect_variance(rng)
        * tier_fraction(tier);
    let cap = INFRA_CAP_SHARE * defender.highest_city_infra.max(0.0) + INFRA_CAP_FLAT;
    result.infra_destroyed = raw.min(cap).max(0.0) * modifiers.infra_multiplier();
    result.improvement_destroy_chance = Some(improvement_destroy_chance(
        IMPROVEMENT_BASE_CHANCE,
        tier,
        context,
    ));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::model::WarPolicy;

    fn fleet(ships: u64) -> NationCombatProfile {
        NationCombatProfile {
            ships,
            highest_city_infra: 3000.0,
            ..Default::default()
        }
    }

    #[test]
    fn zero_ships_short_circuits() {
        let mut rng = Rng::new(3);
        let mut untouched = Rng::new(3);
        let result = simulate_naval(
            0,
            &fleet(20),
            &CombatContext::default(),
            &Modifiers::default(),
            &mut rng,
        );
        assert_eq!(result.tier, 0);
        assert_eq!(result.infra_destroyed, 0.0);
        assert_eq!(result.improvement_destroy_chance, Some(0.0));
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn blockade_fleet_wins_and_pirate_guardian_cancel_out() {
        let context = CombatContext {
            attacker_policy: WarPolicy::Pirate,
            defender_policy: WarPolicy::Guardian,
            ..Default::default()
        };
        let mut rng = Rng::new(10);
        for _ in 0..100 {
            let result =
                simulate_naval(300, &fleet(20), &context, &Modifiers::default(), &mut rng);
            assert_eq!(result.tier, 3);
            assert_eq!(result.improvement_destroy_chance, Some(15.0));
            assert!(result.defender_losses.ships <= 20.0);
            assert!(result.attacker_losses.ships <= 300.0);
            // (300 - 10) * 2.625 stays under the 1525 cap.
            assert!(result.infra_destroyed > 0.0 && result.infra_destroyed < 1525.0);
        }
    }

    #[test]
    fn outgunned_fleet_loses_every_round() {
        let mut rng = Rng::new(10);
        let result = simulate_naval(
            5,
            &fleet(500),
            &CombatContext::default(),
            &Modifiers::default(),
            &mut rng,
        );
        assert_eq!(result.tier, 0);
        assert_eq!(result.infra_destroyed, 0.0);
        assert!(result.attacker_losses.ships <= 5.0);
    }

    #[test]
    fn infra_is_capped_by_largest_city() {
        let small_city = NationCombatProfile {
            highest_city_infra: 10.0,
            ..fleet(20)
        };
        let mut rng = Rng::new(6);
        let result = simulate_naval(
            300,
            &small_city,
            &CombatContext::default(),
            &Modifiers::default(),
            &mut rng,
        );
        assert_eq!(result.tier, 3);
        // Cap is 0.5 * 10 + 25, then the ordinary-war infra factor of 0.5.
        assert!((result.infra_destroyed - 15.0).abs() < 1e-9);
    }
}
