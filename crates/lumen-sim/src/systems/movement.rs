//! Integrates velocity into position.

use hecs::World;

use lumen_core::constants::DT;
use lumen_core::types::{Position, Velocity};

pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * DT;
    }
}
