//! Property-based checks over randomly generated requests.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use warodds::combat::{
    resolve_modifiers, simulate_action, ActionSpec, AirTarget, CombatContext, ControlOwner,
    NationCombatProfile, Rng, SimulationRequest, WarPolicy, WarType,
};
use warodds::simulation::{run_simulation, summarize, ResourcePrices};

fn policy_strategy() -> impl Strategy<Value = WarPolicy> {
    prop_oneof![
        Just(WarPolicy::None),
        Just(WarPolicy::Attrition),
        Just(WarPolicy::Turtle),
        Just(WarPolicy::Moneybags),
        Just(WarPolicy::Pirate),
        Just(WarPolicy::Tactician),
        Just(WarPolicy::Guardian),
        Just(WarPolicy::Covert),
        Just(WarPolicy::Arcane),
    ]
}

fn owner_strategy() -> impl Strategy<Value = ControlOwner> {
    prop_oneof![
        Just(ControlOwner::Attacker),
        Just(ControlOwner::Defender),
        Just(ControlOwner::None),
    ]
}

fn context_strategy() -> impl Strategy<Value = CombatContext> {
    (
        prop_oneof![
            Just(WarType::Ordinary),
            Just(WarType::Raid),
            Just(WarType::Attrition)
        ],
        policy_strategy(),
        policy_strategy(),
        owner_strategy(),
        owner_strategy(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(war_type, attacker_policy, defender_policy, air, ground, a_blitz, d_blitz)| {
                CombatContext {
                    war_type,
                    attacker_policy,
                    defender_policy,
                    air_superiority: air,
                    ground_control: ground,
                    naval_blockade: ControlOwner::None,
                    attacker_blitz: a_blitz,
                    defender_blitz: d_blitz,
                }
            },
        )
}

fn profile_strategy() -> impl Strategy<Value = NationCombatProfile> {
    (
        0..200_000u64,
        0..10_000u64,
        0..2_000u64,
        0..500u64,
        any::<bool>(),
        prop::option::of(0.0..50_000_000.0f64),
        0.0..5_000.0f64,
        0.0..2_000_000.0f64,
    )
        .prop_map(
            |(soldiers, tanks, aircraft, ships, is_fortified, money, infra, population)| {
                NationCombatProfile {
                    soldiers,
                    tanks,
                    aircraft,
                    ships,
                    is_fortified,
                    money,
                    highest_city_infra: infra,
                    highest_city_population: population,
                    ..Default::default()
                }
            },
        )
}

fn target_strategy() -> impl Strategy<Value = AirTarget> {
    prop_oneof![
        Just(AirTarget::Infra),
        Just(AirTarget::Aircraft),
        Just(AirTarget::Soldiers),
        Just(AirTarget::Tanks),
        Just(AirTarget::Ships),
        Just(AirTarget::Money),
    ]
}

/// An action that commits at most what the attacker holds.
fn action_for(
    attacker: &NationCombatProfile,
    kind: u8,
    share: f64,
    target: AirTarget,
    armed: bool,
) -> ActionSpec {
    let part = |n: u64| (n as f64 * share) as u64;
    match kind % 3 {
        0 => ActionSpec::Ground {
            attacking_soldiers: part(attacker.soldiers),
            attacking_tanks: part(attacker.tanks),
            arm_soldiers_with_munitions: armed,
        },
        1 => ActionSpec::Air {
            attacking_aircraft: part(attacker.aircraft),
            target,
        },
        _ => ActionSpec::Naval {
            attacking_ships: part(attacker.ships),
        },
    }
}

fn committed(action: &ActionSpec) -> [u64; 4] {
    match *action {
        ActionSpec::Ground {
            attacking_soldiers,
            attacking_tanks,
            ..
        } => [attacking_soldiers, attacking_tanks, 0, 0],
        ActionSpec::Air {
            attacking_aircraft, ..
        } => [0, 0, attacking_aircraft, 0],
        ActionSpec::Naval { attacking_ships } => [0, 0, 0, attacking_ships],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn trial_results_stay_within_bounds(
        attacker in profile_strategy(),
        defender in profile_strategy(),
        context in context_strategy(),
        kind in 0u8..3,
        share in 0.0..=1.0f64,
        target in target_strategy(),
        armed in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let action = action_for(&attacker, kind, share, target, armed);
        let request = SimulationRequest {
            iterations: 100,
            seed: Some(seed),
            attacker,
            defender,
            context,
            action,
        };
        prop_assert!(request.validate().is_ok());
        let modifiers = resolve_modifiers(&request.context, &request.attacker, &request.defender);
        let [soldiers, tanks, aircraft, ships] = committed(&request.action);
        let mut rng = Rng::new(seed);
        for _ in 0..50 {
            let r = simulate_action(&request, &modifiers, &mut rng);
            prop_assert!(r.tier <= 3);
            let committed_limits = [
                (r.attacker_losses.soldiers, soldiers),
                (r.attacker_losses.tanks, tanks),
                (r.attacker_losses.aircraft, aircraft),
                (r.attacker_losses.ships, ships),
            ];
            for (lost, limit) in committed_limits {
                prop_assert!(lost >= 0.0 && lost <= limit as f64);
            }
            let d = &request.defender;
            let available_limits = [
                (r.defender_losses.soldiers, d.soldiers),
                (r.defender_losses.tanks, d.tanks),
                (r.defender_losses.aircraft, d.aircraft),
                (r.defender_losses.ships, d.ships),
            ];
            for (lost, limit) in available_limits {
                prop_assert!(lost >= 0.0 && lost <= limit as f64);
            }
            prop_assert!(r.infra_destroyed >= 0.0 && r.infra_destroyed.is_finite());
            if let Some(chance) = r.improvement_destroy_chance {
                prop_assert!((0.0..=100.0).contains(&chance));
            }
            if let Some(loot) = r.money_looted {
                prop_assert!(loot >= 0.0);
                if let Some(cash) = request.defender.money {
                    prop_assert!(loot <= (0.75 * cash).max(0.0) + 1e-6);
                }
            }
            prop_assert!(r.money_destroyed.is_none());
        }
    }

    #[test]
    fn outcome_probabilities_sum_to_one_hundred(
        defender in profile_strategy(),
        context in context_strategy(),
        iterations in -10i64..400,
        seed in any::<u64>(),
    ) {
        let attacker = NationCombatProfile {
            soldiers: 3000,
            tanks: 200,
            aircraft: 100,
            ships: 40,
            ..Default::default()
        };
        let request = SimulationRequest {
            iterations,
            seed: Some(seed),
            attacker,
            defender,
            context,
            action: ActionSpec::Ground {
                attacking_soldiers: 3000,
                attacking_tanks: 200,
                arm_soldiers_with_munitions: true,
            },
        };
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let report = run_simulation(&request, &ResourcePrices::default(), at).unwrap();
        prop_assert!(report.meta.iterations >= 100 && report.meta.iterations <= 20_000);
        prop_assert!((report.outcomes.probabilities.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn summary_is_ordered(samples in prop::collection::vec(0.0..1e6f64, 1..300)) {
        let s = summarize(&samples);
        prop_assert!(s.min <= s.p5 && s.p5 <= s.p25 && s.p25 <= s.p50);
        prop_assert!(s.p50 <= s.p75 && s.p75 <= s.p95 && s.p95 <= s.max);
        prop_assert!(s.min <= s.mean + 1e-6 && s.mean <= s.max + 1e-6);
    }
}
