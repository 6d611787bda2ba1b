//! Experience shards and the pickup magnetism policy.

use std::time::Duration;

use ember_arena_core::{
    ArenaPoint, ShardId, EXP_MAGNET_BASE_SPEED, EXP_MAGNET_SPEED_GROWTH, SHARD_SNAP_EPSILON,
    SHARD_SPIN_RATE,
};

/// One dropped experience shard awaiting pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Shard {
    pub(crate) id: ShardId,
    pub(crate) value: u32,
    pub(crate) position: ArenaPoint,
    pub(crate) angle: f32,
    pub(crate) magnetized: bool,
    pub(crate) magnet_time: Duration,
}

impl Shard {
    pub(crate) fn new(id: ShardId, value: u32, position: ArenaPoint, angle: f32) -> Self {
        Self {
            id,
            value,
            position,
            angle,
            magnetized: false,
            magnet_time: Duration::ZERO,
        }
    }
}

/// Outcome of stepping one shard for one gameplay tick.
pub(crate) enum ShardStep {
    /// The shard remains in the arena.
    Drifting,
    /// The shard reached the player and should be collected.
    Collected,
}

/// Advances one shard by `dt` of open gameplay time.
///
/// A shard magnetizes once the player enters `pickup_radius`; once magnetized
/// it interpolates toward the live player position at a speed that grows with
/// time since magnetization, snapping onto the player inside a small epsilon
/// to avoid asymptotic-approach jitter.
pub(crate) fn step_shard(
    shard: &mut Shard,
    player: ArenaPoint,
    pickup_radius: f32,
    dt: Duration,
) -> ShardStep {
    let dt_secs = dt.as_secs_f32();
    shard.angle = (shard.angle + SHARD_SPIN_RATE * dt_secs) % 360.0;

    if !shard.magnetized && shard.position.distance_to(player) <= pickup_radius {
        shard.magnetized = true;
    }

    if !shard.magnetized {
        return ShardStep::Drifting;
    }

    shard.magnet_time = shard.magnet_time.saturating_add(dt);
    let speed = EXP_MAGNET_BASE_SPEED + shard.magnet_time.as_secs_f32() * EXP_MAGNET_SPEED_GROWTH;
    let amount = (dt_secs * speed).clamp(0.0, 1.0);
    let next = shard.position.lerp_toward(player, amount);

    if next.distance_to(player) <= SHARD_SNAP_EPSILON {
        shard.position = player;
        ShardStep::Collected
    } else {
        shard.position = next;
        ShardStep::Drifting
    }
}
