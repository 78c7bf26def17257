//! Per-trial CSV export of a [TrialLedger], for auditing a run outside the report.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::ExportError;
use crate::simulation::ledger::TrialLedger;

#[derive(Debug, Serialize)]
struct TrialRow {
    trial: usize,
    tier: u8,
    attacker_soldiers: f64,
    attacker_tanks: f64,
    attacker_aircraft: f64,
    attacker_ships: f64,
    defender_soldiers: f64,
    defender_tanks: f64,
    defender_aircraft: f64,
    defender_ships: f64,
    infra_destroyed: f64,
    money_looted: Option<f64>,
    improvement_destroy_chance: Option<f64>,
    attacker_total_value: f64,
    defender_total_value: f64,
}

/// Writes one CSV row per trial. Optional columns are blank when the action does not model them.
pub fn write_ledger<W: Write>(writer: W, ledger: &TrialLedger) -> Result<(), ExportError> {
    let mut rows = csv::Writer::from_writer(writer);
    let a = &ledger.attacker;
    let d = &ledger.defender;
    for (i, &tier) in ledger.tiers.iter().enumerate() {
        rows.serialize(TrialRow {
            trial: i,
            tier,
            attacker_soldiers: a.soldiers[i],
            attacker_tanks: a.tanks[i],
            attacker_aircraft: a.aircraft[i],
            attacker_ships: a.ships[i],
            defender_soldiers: d.soldiers[i],
            defender_tanks: d.tanks[i],
            defender_aircraft: d.aircraft[i],
            defender_ships: d.ships[i],
            infra_destroyed: ledger.infra_destroyed[i],
            money_looted: ledger.money_looted[i],
            improvement_destroy_chance: ledger.improvement_destroy_chance[i],
            attacker_total_value: a.total_value[i],
            defender_total_value: d.total_value[i],
        })?;
    }
    rows.flush()?;
    Ok(())
}

pub fn write_ledger_csv(path: impl AsRef<Path>, ledger: &TrialLedger) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_ledger(file, ledger)
}
