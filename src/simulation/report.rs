//! Aggregated report shape returned to callers.

use serde::Serialize;

use crate::combat::model::ActionKind;
use crate::simulation::ledger::{SideSamples, TrialLedger};
use crate::simulation::percentile::{summarize, DistributionSummary};
use crate::simulation::valuation::ResourcePrices;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedReport {
    pub meta: ReportMeta,
    pub outcomes: Outcomes,
    pub metrics: Metrics,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    pub iterations: u32,
    /// Seed as requested; `None` means the run drew one from OS entropy.
    pub seed: Option<u64>,
    pub effective_seed: u64,
    pub action: ActionKind,
    pub generated_at: String,
    pub prices: ResourcePrices,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcomes {
    pub probabilities: OutcomeProbabilities,
}

/// Percent of trials landing in each tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OutcomeProbabilities {
    /// Three rounds won.
    #[serde(rename = "IT")]
    pub decisive: f64,
    /// Two rounds won.
    #[serde(rename = "MS")]
    pub moderate: f64,
    /// One round won.
    #[serde(rename = "PV")]
    pub pyrrhic: f64,
    /// No rounds won.
    #[serde(rename = "UF")]
    pub failure: f64,
}

impl OutcomeProbabilities {
    pub fn from_counts(counts: &[u64; 4]) -> Self {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Self::default();
        }
        let pct = |n: u64| n as f64 * 100.0 / total as f64;
        Self {
            decisive: pct(counts[3]),
            moderate: pct(counts[2]),
            pyrrhic: pct(counts[1]),
            failure: pct(counts[0]),
        }
    }

    pub fn total(&self) -> f64 {
        self.decisive + self.moderate + self.pyrrhic + self.failure
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossSummary {
    pub soldiers: DistributionSummary,
    pub tanks: DistributionSummary,
    pub aircraft: DistributionSummary,
    pub ships: DistributionSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConsumptionSummary {
    pub gasoline: DistributionSummary,
    pub munitions: DistributionSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub consumables_value: DistributionSummary,
    pub unit_losses_value: DistributionSummary,
    /// Infrastructure is not valued.
    pub infra_value: Option<DistributionSummary>,
    pub total_value: DistributionSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub attacker_losses: LossSummary,
    pub defender_losses: LossSummary,
    pub infra_destroyed: DistributionSummary,
    pub money_looted: Option<DistributionSummary>,
    pub money_destroyed: Option<DistributionSummary>,
    pub resources_consumed_attacker: ConsumptionSummary,
    pub resources_consumed_defender: ConsumptionSummary,
    pub cost_estimates: CostSummary,
    pub cost_estimates_defender: CostSummary,
    pub improvement_destroy_chance: Option<DistributionSummary>,
}

impl Metrics {
    pub fn from_ledger(ledger: &TrialLedger) -> Self {
        Self {
            attacker_losses: loss_summary(&ledger.attacker),
            defender_losses: loss_summary(&ledger.defender),
            infra_destroyed: summarize(&ledger.infra_destroyed),
            money_looted: optional_summary(&ledger.money_looted),
            money_destroyed: optional_summary(&ledger.money_destroyed),
            resources_consumed_attacker: consumption_summary(&ledger.attacker),
            resources_consumed_defender: consumption_summary(&ledger.defender),
            cost_estimates: cost_summary(&ledger.attacker),
            cost_estimates_defender: cost_summary(&ledger.defender),
            improvement_destroy_chance: optional_summary(&ledger.improvement_destroy_chance),
        }
    }
}

/// Metrics no trial reported stay `None` rather than a zeroed summary.
fn optional_summary(samples: &[Option<f64>]) -> Option<DistributionSummary> {
    let present: Vec<f64> = samples.iter().flatten().copied().collect();
    (!present.is_empty()).then(|| summarize(&present))
}

fn loss_summary(side: &SideSamples) -> LossSummary {
    LossSummary {
        soldiers: summarize(&side.soldiers),
        tanks: summarize(&side.tanks),
        aircraft: summarize(&side.aircraft),
        ships: summarize(&side.ships),
    }
}

fn consumption_summary(side: &SideSamples) -> ConsumptionSummary {
    ConsumptionSummary {
        gasoline: summarize(&side.gasoline),
        munitions: summarize(&side.munitions),
    }
}

fn cost_summary(side: &SideSamples) -> CostSummary {
    CostSummary {
        consumables_value: summarize(&side.consumables_value),
        unit_losses_value: summarize(&side.unit_losses_value),
        infra_value: None,
        total_value: summarize(&side.total_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities_sum_to_one_hundred() {
        let p = OutcomeProbabilities::from_counts(&[1, 2, 3, 994]);
        assert!((p.total() - 100.0).abs() < 1e-9);
        assert!((p.decisive - 99.4).abs() < 1e-9);
        assert!((p.failure - 0.1).abs() < 1e-9);
    }

    #[test]
    fn probabilities_serialize_with_tier_labels() {
        let p = OutcomeProbabilities::from_counts(&[0, 0, 0, 4]);
        let json = serde_json::to_value(p).expect("serializable");
        assert_eq!(json["IT"], 100.0);
        assert_eq!(json["UF"], 0.0);
    }

    #[test]
    fn optional_summary_skips_unmodeled_trials() {
        assert_eq!(optional_summary(&[None, None]), None);
        let summary = optional_summary(&[None, Some(2.0), Some(4.0)]).expect("two samples");
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 4.0);
        assert!((summary.mean - 3.0).abs() < 1e-12);
    }
}
