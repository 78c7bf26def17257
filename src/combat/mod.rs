pub mod air;
pub mod ground;
pub mod model;
pub mod modifiers;
pub mod naval;
pub mod rng;
pub mod rounds;

pub use air::{simulate_air, AirOrder};
pub use ground::{simulate_ground, GroundForces, GroundOrder};
pub use model::{
    clamp_iterations, ActionKind, ActionSpec, AirTarget, CombatContext, ControlOwner,
    IterationResult, NationCombatProfile, SimulationRequest, UnitLosses, WarPolicy, WarType,
    MAX_ITERATIONS, MIN_ITERATIONS,
};
pub use modifiers::{resolve_modifiers, Modifiers};
pub use naval::simulate_naval;
pub use rng::Rng;

/// Runs one trial of the request's action.
pub fn simulate_action(
    request: &SimulationRequest,
    modifiers: &Modifiers,
    rng: &mut Rng,
) -> IterationResult {
    match request.action {
        ActionSpec::Ground {
            attacking_soldiers,
            attacking_tanks,
            arm_soldiers_with_munitions,
        } => simulate_ground(
            &GroundOrder {
                soldiers: attacking_soldiers,
                tanks: attacking_tanks,
                armed_with_munitions: arm_soldiers_with_munitions,
            },
            &request.defender,
            &request.context,
            modifiers,
            rng,
        ),
        ActionSpec::Air {
            attacking_aircraft,
            target,
        } => simulate_air(
            &AirOrder {
                aircraft: attacking_aircraft,
                target,
            },
            &request.defender,
            modifiers,
            rng,
        ),
        ActionSpec::Naval { attacking_ships } => simulate_naval(
            attacking_ships,
            &request.defender,
            &request.context,
            modifiers,
            rng,
        ),
    }
}
