//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger on a state produced by [`GameState::new`] and
//! [`GameState::take_turn`]. If they do, the engine has a bug.

use crate::game::{Coord, GameState, Status, TileContent};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });
    let grid = state.grid();

    let bosses = grid.boss_count();
    if bosses > 1 {
        violation(format!("{bosses} bosses on the grid"));
    }
    if grid.content(Coord::ORIGIN).is_some_and(TileContent::is_boss) {
        violation("Boss placed at the origin".to_string());
    }

    for (coord, content) in grid.occupied() {
        if content.is_consumed() {
            violation(format!("Consumed content left at {coord:?}"));
        }
        match content {
            TileContent::Resource(resource) => {
                if resource.steps_required == 0 {
                    violation(format!("Resource at {coord:?} requires no steps"));
                }
                if resource.steps_done > resource.steps_required {
                    violation(format!(
                        "Resource at {coord:?} has progress {}/{}",
                        resource.steps_done, resource.steps_required
                    ));
                }
            }
            TileContent::Creature(creature) if creature.is_defeated() => {
                violation(format!(
                    "Defeated {} at {coord:?} still on the grid",
                    creature.name
                ));
            }
            TileContent::Creature(_) | TileContent::Shop(_) => {}
        }
    }

    let player = state.player();
    if !grid.in_bounds(player.position) {
        violation(format!("Player outside the grid at {:?}", player.position));
    }

    match state.status() {
        Status::Playing if player.is_dead() => {
            violation(format!("Playing with health {}", player.health));
        }
        Status::Playing if bosses == 0 => violation("Playing without a boss".to_string()),
        Status::Lost if !player.is_dead() => {
            violation(format!("Lost with health {}", player.health));
        }
        _ => {}
    }

    violations
}
