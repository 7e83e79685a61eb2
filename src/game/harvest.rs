//! Resource harvesting.
//!
//! Each accepted visit advances a resource by exactly one step. The visit that
//! reaches the required step count grants the yield and consumes the resource.

use tracing::debug;

use crate::game::{Encounter, GameEvent, Resource};

/// Advance `resource` by one step, granting the yield when it completes.
///
/// Returns `true` if this step completed the resource.
pub fn harvest_step(resource: &mut Resource, encounter: &mut Encounter<'_>) -> bool {
    if resource.consumed {
        return false;
    }

    resource.steps_done = resource.steps_done.saturating_add(1);
    encounter.emit(GameEvent::Harvested {
        steps_done: resource.steps_done,
        steps_required: resource.steps_required,
    });

    if resource.steps_done < resource.steps_required {
        return false;
    }

    resource.steps_done = resource.steps_required;
    resource.consumed = true;
    encounter.player.add(&resource.name, resource.yield_amount);
    debug!(resource = %resource.name, amount = resource.yield_amount, "harvest complete");
    encounter.emit(GameEvent::HarvestComplete {
        name: resource.name.clone(),
    });
    encounter.emit(GameEvent::LootGained {
        item: resource.name.clone(),
        amount: resource.yield_amount,
    });
    true
}

/// Visit a resource: offer one harvest step.
///
/// Always allows the move, whatever the player decides.
pub fn harvest(resource: &mut Resource, encounter: &mut Encounter<'_>) -> bool {
    encounter.emit(GameEvent::ResourceFound {
        name: resource.name.clone(),
        category: resource.category,
        steps_done: resource.steps_done,
        steps_required: resource.steps_required,
    });

    if encounter.controller.harvest(resource) {
        harvest_step(resource, encounter);
    } else {
        encounter.emit(GameEvent::HarvestDeclined);
    }

    true
}
