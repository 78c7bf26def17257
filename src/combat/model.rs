//! Request-side data model: nation snapshots, combat context and the action being resolved.
//!
//! Everything here is an immutable snapshot handed in by the caller. The simulators read it and
//! never write back.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

pub const MIN_ITERATIONS: u32 = 100;
pub const MAX_ITERATIONS: u32 = 20_000;

/// Doctrine tag carried by a nation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarPolicy {
    #[default]
    None,
    Attrition,
    Turtle,
    Blitzkrieg,
    Fortress,
    Moneybags,
    Pirate,
    Tactician,
    Guardian,
    Covert,
    Arcane,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarType {
    #[default]
    Ordinary,
    Raid,
    Attrition,
}

/// Which side holds a strategic control state (air superiority, ground control, blockade).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOwner {
    Attacker,
    Defender,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirTarget {
    Infra,
    Aircraft,
    Soldiers,
    Tanks,
    Ships,
    Money,
}

impl AirTarget {
    pub fn is_dogfight(self) -> bool {
        matches!(self, Self::Aircraft)
    }
}

/// Military and economic snapshot of one nation. Same shape for attacker and defender.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationCombatProfile {
    pub soldiers: u64,
    pub tanks: u64,
    pub aircraft: u64,
    pub ships: u64,
    /// Informational. Policy effects are read from [CombatContext::attacker_policy] and
    /// [CombatContext::defender_policy]; a disagreeing tag here is only warned about.
    pub war_policy: WarPolicy,
    pub is_fortified: bool,
    /// Cash on hand, when known. Loot is only capped when this is present.
    pub money: Option<f64>,
    pub cities: u32,
    pub highest_city_infra: f64,
    pub highest_city_population: f64,
    pub avg_infra: f64,
}

impl NationCombatProfile {
    fn finite_figures(&self) -> [(&'static str, f64); 4] {
        [
            ("money", self.money.unwrap_or(0.0)),
            ("highest_city_infra", self.highest_city_infra),
            ("highest_city_population", self.highest_city_population),
            ("avg_infra", self.avg_infra),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatContext {
    pub war_type: WarType,
    pub attacker_policy: WarPolicy,
    pub defender_policy: WarPolicy,
    pub air_superiority: ControlOwner,
    pub ground_control: ControlOwner,
    pub naval_blockade: ControlOwner,
    pub attacker_blitz: bool,
    pub defender_blitz: bool,
}

/// The single action resolved by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionSpec {
    Ground {
        attacking_soldiers: u64,
        attacking_tanks: u64,
        #[serde(default)]
        arm_soldiers_with_munitions: bool,
    },
    Air {
        attacking_aircraft: u64,
        target: AirTarget,
    },
    Naval {
        attacking_ships: u64,
    },
}

impl ActionSpec {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Ground { .. } => ActionKind::Ground,
            Self::Air { .. } => ActionKind::Air,
            Self::Naval { .. } => ActionKind::Naval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Ground,
    Air,
    Naval,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Requested trial count. Anything outside `[100, 20000]` is clamped.
    #[serde(default = "default_iterations")]
    pub iterations: i64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(rename = "nation_attacker")]
    pub attacker: NationCombatProfile,
    #[serde(rename = "nation_defender")]
    pub defender: NationCombatProfile,
    #[serde(default)]
    pub context: CombatContext,
    pub action: ActionSpec,
}

fn default_iterations() -> i64 {
    1000
}

impl SimulationRequest {
    /// Builds a request and validates it in one step.
    pub fn new(
        iterations: i64,
        seed: Option<u64>,
        attacker: NationCombatProfile,
        defender: NationCombatProfile,
        context: CombatContext,
        action: ActionSpec,
    ) -> Result<Self, SimulationError> {
        let request = Self {
            iterations,
            seed,
            attacker,
            defender,
            context,
            action,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn resolved_iterations(&self) -> u32 {
        clamp_iterations(self.iterations)
    }

    /// Rejects actions that commit more units than the attacker holds, and non-finite figures.
    /// Sides whose profile names a policy other than the one the context applies.
    pub fn policy_mismatches(&self) -> Vec<&'static str> {
        [
            ("attacker", self.attacker.war_policy, self.context.attacker_policy),
            ("defender", self.defender.war_policy, self.context.defender_policy),
        ]
        .into_iter()
        .filter(|&(_, profile, applied)| profile != WarPolicy::None && profile != applied)
        .map(|(side, _, _)| side)
        .collect()
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for side in self.policy_mismatches() {
            tracing::warn!(side, "profile war_policy differs from context policy; context wins");
        }
        for (side, profile) in [("attacker", &self.attacker), ("defender", &self.defender)] {
            for (field, value) in profile.finite_figures() {
                if !value.is_finite() {
                    return Err(SimulationError::InvalidProfile { side, field });
                }
            }
        }

        let over_commit = |unit: &'static str, committed: u64, available: u64| {
            if committed > available {
                Err(SimulationError::InvalidAction(format!(
                    "{:?} action commits {committed} {unit} but attacker holds {available}",
                    self.action.kind()
                )))
            } else {
                Ok(())
            }
        };

        match self.action {
            ActionSpec::Ground {
                attacking_soldiers,
                attacking_tanks,
                ..
            } => {
                over_commit("soldiers", attacking_soldiers, self.attacker.soldiers)?;
                over_commit("tanks", attacking_tanks, self.attacker.tanks)
            }
            ActionSpec::Air {
                attacking_aircraft, ..
            } => over_commit("aircraft", attacking_aircraft, self.attacker.aircraft),
            ActionSpec::Naval { attacking_ships } => {
                over_commit("ships", attacking_ships, self.attacker.ships)
            }
        }
    }
}

pub fn clamp_iterations(requested: i64) -> u32 {
    requested.clamp(MIN_ITERATIONS as i64, MAX_ITERATIONS as i64) as u32
}

/// Loss figures for one side. Fractional, like the game's own casualty reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UnitLosses {
    pub soldiers: f64,
    pub tanks: f64,
    pub aircraft: f64,
    pub ships: f64,
}

/// Outcome of one trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IterationResult {
    /// Micro-rounds won by the attacker, 0 through 3.
    pub tier: u8,
    pub attacker_losses: UnitLosses,
    pub defender_losses: UnitLosses,
    pub infra_destroyed: f64,
    pub money_looted: Option<f64>,
    pub money_destroyed: Option<f64>,
    pub improvement_destroy_chance: Option<f64>,
}
