//! Simulation step
//!
//! Advances every body by one frame and resolves wall and body contacts.

use super::body::Arena;
use super::collision::{contain, reflect_walls, resolve_collisions};
use super::store::BodyStore;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Bodies that touched at least one wall
    pub wall_hits: usize,
    /// Body pairs that overlapped and were resolved
    pub contacts: usize,
}

/// Advance the store by one unit timestep inside `arena`.
///
/// 1. Integrate every position by its velocity.
/// 2. Reflect each body off the walls (side, then bottom, then top).
/// 3. Resolve overlapping pairs sequentially in store order.
/// 4. Clamp centers back inside the arena, since push-apart corrections can
///    carry a body across a wall.
pub fn step(store: &mut BodyStore, arena: &Arena) -> StepReport {
    let mut report = StepReport::default();

    for body in store.iter_mut() {
        body.integrate();
        if reflect_walls(body, arena).any() {
            report.wall_hits += 1;
        }
    }

    report.contacts = resolve_collisions(store.as_mut_slice());

    for body in store.iter_mut() {
        contain(body, arena);
    }

    report
}
