//! Monte Carlo orchestration: runs N trials of one action and aggregates the samples into a
//! percentile report.

pub mod export;
pub mod ledger;
pub mod percentile;
pub mod report;
pub mod valuation;

use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info, instrument};

use crate::combat::{
    resolve_modifiers, simulate_action, ActionSpec, AirTarget, ControlOwner, Modifiers, Rng,
    SimulationRequest,
};
use crate::error::SimulationError;

pub use ledger::{SideCosts, SideSamples, TrialLedger};
pub use percentile::{summarize, DistributionSummary};
pub use report::{AggregatedReport, Metrics, OutcomeProbabilities, Outcomes, ReportMeta};
pub use valuation::{consumables_for, Consumables, ResourcePrices, UnitValues};

/// Per-request inputs computed once and shared read-only by every trial.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub iterations: u32,
    pub modifiers: Modifiers,
    pub unit_values: UnitValues,
    pub attacker_costs: SideCosts,
    pub defender_costs: SideCosts,
}

impl RunPlan {
    /// Validates the request and resolves everything that does not vary per trial.
    pub fn prepare(
        request: &SimulationRequest,
        prices: &ResourcePrices,
    ) -> Result<Self, SimulationError> {
        request.validate()?;

        let modifiers = resolve_modifiers(&request.context, &request.attacker, &request.defender);
        let (attacker_usage, defender_usage) = consumables_for(&request.action, &request.defender);
        debug!(?modifiers, ?attacker_usage, ?defender_usage, "resolved run plan");

        Ok(Self {
            iterations: request.resolved_iterations(),
            modifiers,
            unit_values: UnitValues::at_prices(prices),
            attacker_costs: SideCosts {
                usage: attacker_usage,
                usage_value: attacker_usage.value(prices),
            },
            defender_costs: SideCosts {
                usage: defender_usage,
                usage_value: defender_usage.value(prices),
            },
        })
    }

    /// Runs `count` trials against `rng` in order and records each into a fresh ledger.
    pub fn run_trials(
        &self,
        request: &SimulationRequest,
        rng: &mut Rng,
        count: usize,
    ) -> TrialLedger {
        let mut ledger = TrialLedger::with_capacity(count);
        for _ in 0..count {
            let result = simulate_action(request, &self.modifiers, rng);
            ledger.record(
                &result,
                self.unit_values.losses_value(&result.attacker_losses),
                self.unit_values.losses_value(&result.defender_losses),
                &self.attacker_costs,
                &self.defender_costs,
            );
        }
        ledger
    }
}

/// Runs the request sequentially and returns the aggregated report.
pub fn run_simulation(
    request: &SimulationRequest,
    prices: &ResourcePrices,
    generated_at: DateTime<Utc>,
) -> Result<AggregatedReport, SimulationError> {
    simulate_with_ledger(request, prices, generated_at).map(|(report, _)| report)
}

/// Like [run_simulation] but also hands back every per-trial sample.
#[instrument(skip_all, fields(action = ?request.action.kind()))]
pub fn simulate_with_ledger(
    request: &SimulationRequest,
    prices: &ResourcePrices,
    generated_at: DateTime<Utc>,
) -> Result<(AggregatedReport, TrialLedger), SimulationError> {
    let started = Instant::now();
    let plan = RunPlan::prepare(request, prices)?;
    let (mut rng, seed) = match request.seed {
        Some(seed) => (Rng::new(seed), seed),
        None => Rng::from_entropy(),
    };

    let ledger = plan.run_trials(request, &mut rng, plan.iterations as usize);
    let report = assemble_report(request, &plan, &ledger, prices, seed, generated_at);

    info!(
        iterations = plan.iterations,
        seed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation complete"
    );
    Ok((report, ledger))
}

/// Builds the report from a finished ledger.
pub fn assemble_report(
    request: &SimulationRequest,
    plan: &RunPlan,
    ledger: &TrialLedger,
    prices: &ResourcePrices,
    effective_seed: u64,
    generated_at: DateTime<Utc>,
) -> AggregatedReport {
    AggregatedReport {
        meta: ReportMeta {
            iterations: plan.iterations,
            seed: request.seed,
            effective_seed,
            action: request.action.kind(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            prices: *prices,
        },
        outcomes: Outcomes {
            probabilities: OutcomeProbabilities::from_counts(&ledger.tier_counts),
        },
        metrics: Metrics::from_ledger(ledger),
        assumptions: assumptions(request),
    }
}

/// Modeling disclosures attached to every report, plus notes triggered by the request.
pub fn assumptions(request: &SimulationRequest) -> Vec<String> {
    let mut notes: Vec<String> = vec![
        "Each trial is three micro-rounds; the outcome tier counts rounds won by the attacker."
            .into(),
        "Force rolls are uniform between 40% and 100% of each force's strength.".into(),
        "Gasoline and munitions usage is deterministic per committed or available unit.".into(),
        "Unit losses are valued at base cost plus 24h average steel/aluminum prices.".into(),
        "Infrastructure value is not estimated.".into(),
        "The defender is assumed to field its full available force.".into(),
    ];

    let context = &request.context;
    match request.action {
        ActionSpec::Ground { .. } => {
            if request.defender.money.is_none() {
                notes.push("Defender cash unknown, loot reflects max potential.".into());
            }
            if context.ground_control == ControlOwner::Attacker {
                notes.push(
                    "Attacker holds ground control; victories also destroy defender aircraft."
                        .into(),
                );
            }
            notes.push(
                "Defender soldiers include one resistance soldier per 400 residents of its \
                 largest city."
                    .into(),
            );
        }
        ActionSpec::Air { target, .. } => {
            if target == AirTarget::Money {
                notes.push("Money destroyed is unmodeled for this target.".into());
            }
            if target != AirTarget::Infra {
                notes.push(
                    "Infrastructure damage is incidental (one third) when not targeting \
                     infrastructure."
                        .into(),
                );
            }
        }
        ActionSpec::Naval { .. } => {}
    }

    if context.air_superiority != ControlOwner::None {
        notes.push("Air superiority halves opposing tank strength.".into());
    }
    if request.defender.is_fortified {
        notes.push("Defender is fortified; attacker casualties are increased by 25%.".into());
    }
    if context.attacker_blitz || context.defender_blitz {
        notes.push(
            "Blitz raises the active side's casualties and infrastructure damage by 10%.".into(),
        );
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatContext, NationCombatProfile};
    use chrono::TimeZone;

    fn request(action: ActionSpec) -> SimulationRequest {
        SimulationRequest {
            iterations: 200,
            seed: Some(7),
            attacker: NationCombatProfile {
                soldiers: 1000,
                tanks: 10,
                aircraft: 10,
                ships: 10,
                ..Default::default()
            },
            defender: NationCombatProfile {
                soldiers: 500,
                tanks: 5,
                aircraft: 5,
                ships: 5,
                ..Default::default()
            },
            context: CombatContext::default(),
            action,
        }
    }

    #[test]
    fn ground_report_carries_loot_and_cash_note() {
        let req = request(ActionSpec::Ground {
            attacking_soldiers: 1000,
            attacking_tanks: 10,
            arm_soldiers_with_munitions: true,
        });
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let report = run_simulation(&req, &ResourcePrices::default(), at).expect("valid request");
        assert_eq!(report.meta.iterations, 200);
        assert_eq!(report.meta.generated_at, "2026-01-02T03:04:05Z");
        assert!(report.metrics.money_looted.is_some());
        assert!(report.metrics.money_destroyed.is_none());
        assert!(report.metrics.improvement_destroy_chance.is_some());
        assert!(report
            .assumptions
            .iter()
            .any(|a| a.contains("Defender cash unknown")));
    }

    #[test]
    fn air_money_target_flags_unmodeled_money() {
        let req = request(ActionSpec::Air {
            attacking_aircraft: 10,
            target: AirTarget::Money,
        });
        let notes = assumptions(&req);
        assert!(notes.iter().any(|a| a.contains("unmodeled")));
        assert!(!notes.iter().any(|a| a.contains("Defender cash unknown")));
    }

    #[test]
    fn incidental_infra_note_covers_every_non_infra_target() {
        let incidental = |target| {
            assumptions(&request(ActionSpec::Air {
                attacking_aircraft: 10,
                target,
            }))
            .iter()
            .any(|a| a.contains("when not targeting infrastructure"))
        };
        assert!(incidental(AirTarget::Money));
        assert!(incidental(AirTarget::Aircraft));
        assert!(incidental(AirTarget::Ships));
        assert!(!incidental(AirTarget::Infra));
    }

    #[test]
    fn over_committed_request_fails_fast() {
        let req = request(ActionSpec::Naval { attacking_ships: 11 });
        assert!(matches!(
            RunPlan::prepare(&req, &ResourcePrices::default()),
            Err(SimulationError::InvalidAction(_))
        ));
    }
}
