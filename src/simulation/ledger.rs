//! Per-trial sample accumulation.

use crate::combat::model::{IterationResult, UnitLosses};
use crate::simulation::valuation::Consumables;

/// Samples for one side, one entry per trial.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideSamples {
    pub soldiers: Vec<f64>,
    pub tanks: Vec<f64>,
    pub aircraft: Vec<f64>,
    pub ships: Vec<f64>,
    pub gasoline: Vec<f64>,
    pub munitions: Vec<f64>,
    pub consumables_value: Vec<f64>,
    pub unit_losses_value: Vec<f64>,
    pub total_value: Vec<f64>,
}

impl SideSamples {
    fn with_capacity(n: usize) -> Self {
        Self {
            soldiers: Vec::with_capacity(n),
            tanks: Vec::with_capacity(n),
            aircraft: Vec::with_capacity(n),
            ships: Vec::with_capacity(n),
            gasoline: Vec::with_capacity(n),
            munitions: Vec::with_capacity(n),
            consumables_value: Vec::with_capacity(n),
            unit_losses_value: Vec::with_capacity(n),
            total_value: Vec::with_capacity(n),
        }
    }

    fn record(
        &mut self,
        losses: &UnitLosses,
        usage: &Consumables,
        usage_value: f64,
        losses_value: f64,
    ) {
        self.soldiers.push(losses.soldiers);
        self.tanks.push(losses.tanks);
        self.aircraft.push(losses.aircraft);
        self.ships.push(losses.ships);
        self.gasoline.push(usage.gasoline);
        self.munitions.push(usage.munitions);
        self.consumables_value.push(usage_value);
        self.unit_losses_value.push(losses_value);
        self.total_value.push(usage_value + losses_value);
    }

    fn append(&mut self, other: &mut SideSamples) {
        self.soldiers.append(&mut other.soldiers);
        self.tanks.append(&mut other.tanks);
        self.aircraft.append(&mut other.aircraft);
        self.ships.append(&mut other.ships);
        self.gasoline.append(&mut other.gasoline);
        self.munitions.append(&mut other.munitions);
        self.consumables_value.append(&mut other.consumables_value);
        self.unit_losses_value.append(&mut other.unit_losses_value);
        self.total_value.append(&mut other.total_value);
    }
}

/// Valuation inputs that stay fixed for every trial of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideCosts {
    pub usage: Consumables,
    pub usage_value: f64,
}

/// Everything recorded across a run, in trial order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialLedger {
    /// Trials per outcome tier, indexed by tier.
    pub tier_counts: [u64; 4],
    pub tiers: Vec<u8>,
    pub attacker: SideSamples,
    pub defender: SideSamples,
    pub infra_destroyed: Vec<f64>,
    /// Optional metrics keep one slot per trial; `None` where the action did not model them.
    pub money_looted: Vec<Option<f64>>,
    pub money_destroyed: Vec<Option<f64>>,
    pub improvement_destroy_chance: Vec<Option<f64>>,
}

impl TrialLedger {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            tier_counts: [0; 4],
            tiers: Vec::with_capacity(n),
            attacker: SideSamples::with_capacity(n),
            defender: SideSamples::with_capacity(n),
            infra_destroyed: Vec::with_capacity(n),
            money_looted: Vec::with_capacity(n),
            money_destroyed: Vec::with_capacity(n),
            improvement_destroy_chance: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn record(
        &mut self,
        result: &IterationResult,
        attacker_losses_value: f64,
        defender_losses_value: f64,
        attacker_costs: &SideCosts,
        defender_costs: &SideCosts,
    ) {
        let tier = result.tier.min(3);
        self.tier_counts[usize::from(tier)] += 1;
        self.tiers.push(tier);

        self.attacker.record(
            &result.attacker_losses,
            &attacker_costs.usage,
            attacker_costs.usage_value,
            attacker_losses_value,
        );
        self.defender.record(
            &result.defender_losses,
            &defender_costs.usage,
            defender_costs.usage_value,
            defender_losses_value,
        );

        self.infra_destroyed.push(result.infra_destroyed);
        self.money_looted.push(result.money_looted);
        self.money_destroyed.push(result.money_destroyed);
        self.improvement_destroy_chance
            .push(result.improvement_destroy_chance);
    }

    /// Appends `other` after this ledger's trials.
    pub fn merge(&mut self, mut other: TrialLedger) {
        for (count, extra) in self.tier_counts.iter_mut().zip(other.tier_counts) {
            *count += extra;
        }
        self.tiers.append(&mut other.tiers);
        self.attacker.append(&mut other.attacker);
        self.defender.append(&mut other.defender);
        self.infra_destroyed.append(&mut other.infra_destroyed);
        self.money_looted.append(&mut other.money_looted);
        self.money_destroyed.append(&mut other.money_destroyed);
        self.improvement_destroy_chance
            .append(&mut other.improvement_destroy_chance);
    }
}
