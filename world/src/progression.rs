//! Experience ledger: level/XP accounting and shard decomposition.

use ember_arena_core::{
    exp_required_for_level, DEFAULT_PICKUP_RADIUS, EXP_TIERS,
};

/// Player progression counters mutated exclusively by the ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerStats {
    level: u32,
    exp: f32,
    total_exp: f32,
    exp_to_next: u32,
    pickup_radius: f32,
}

impl PlayerStats {
    pub(crate) fn new() -> Self {
        Self {
            level: 1,
            exp: 0.0,
            total_exp: 0.0,
            exp_to_next: exp_required_for_level(1),
            pickup_radius: DEFAULT_PICKUP_RADIUS,
        }
    }

    /// Current player level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated within the current level.
    #[must_use]
    pub const fn exp(&self) -> f32 {
        self.exp
    }

    /// Monotonic experience counter across the whole run.
    #[must_use]
    pub const fn total_exp(&self) -> f32 {
        self.total_exp
    }

    /// Experience threshold that triggers the next level-up.
    #[must_use]
    pub const fn exp_to_next(&self) -> u32 {
        self.exp_to_next
    }

    /// Radius within which shards magnetize toward the player.
    #[must_use]
    pub const fn pickup_radius(&self) -> f32 {
        self.pickup_radius
    }
}

/// Queued and active level-up bookkeeping.
///
/// The ledger is the sole writer of `pending`; upgrade-session commands are
/// the sole driver of `active`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelUpState {
    pending: u32,
    active: bool,
}

impl LevelUpState {
    /// Level-ups gained but not yet resolved into a menu session.
    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.pending
    }

    /// Reports whether an upgrade-selection session is live.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, value: bool) {
        self.active = value;
    }

    pub(crate) fn consume_pending(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.pending = 0;
        self.active = false;
    }
}

/// Awards experience, looping through any level thresholds it crosses.
///
/// Returns the levels reached, one entry per level-up, so the caller can emit
/// one event (and queue one pending session) per gained level. Overflow
/// experience carries into subsequent levels rather than being discarded.
pub(crate) fn grant(stats: &mut PlayerStats, level_up: &mut LevelUpState, amount: f32) -> Vec<u32> {
    let mut gained = Vec::new();
    if amount <= 0.0 {
        return gained;
    }

    stats.total_exp += amount;
    stats.exp += amount;

    while stats.exp_to_next > 0 && stats.exp >= stats.exp_to_next as f32 {
        stats.exp -= stats.exp_to_next as f32;
        stats.level += 1;
        stats.exp_to_next = exp_required_for_level(stats.level);
        level_up.pending += 1;
        gained.push(stats.level);
    }

    gained
}

/// Decomposes a lump experience award into shard denominations.
///
/// Greedy largest-first over the descending tier table, with any non-zero
/// remainder emitted as one final shard of exactly that value. Minimal for
/// the shipped `{25, 5, 1}` set; a non-superincreasing replacement table
/// would need an explicit coin-change pass instead.
#[must_use]
pub(crate) fn decompose_exp(total: f32) -> Vec<u32> {
    let mut drops = Vec::new();
    let mut remaining = total.floor() as i64;
    if remaining <= 0 {
        return drops;
    }

    for tier in &EXP_TIERS {
        while remaining >= i64::from(tier.value) {
            drops.push(tier.value);
            remaining -= i64::from(tier.value);
        }
    }

    if remaining > 0 {
        drops.push(remaining as u32);
    }

    drops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposition_matches_published_examples() {
        assert_eq!(decompose_exp(0.0), Vec::<u32>::new());
        assert_eq!(decompose_exp(1.0), vec![1]);
        assert_eq!(decompose_exp(30.0), vec![25, 5]);
        assert_eq!(decompose_exp(31.0), vec![25, 5, 1]);
        assert_eq!(decompose_exp(32.0), vec![25, 5, 1, 1]);
    }

    #[test]
    fn decomposition_floors_fractional_totals() {
        assert_eq!(decompose_exp(6.9), vec![5, 1]);
        assert_eq!(decompose_exp(0.4), Vec::<u32>::new());
    }

    #[test]
    fn decomposition_preserves_totals() {
        for total in 0..200u32 {
            let shards = decompose_exp(total as f32);
            let sum: u32 = shards.iter().sum();
            assert_eq!(sum, total, "shard values must sum to the floored total");
        }
    }

    #[test]
    fn negative_awards_are_ignored() {
        let mut stats = PlayerStats::new();
        let mut level_up = LevelUpState::default();
        assert!(grant(&mut stats, &mut level_up, -3.0).is_empty());
        assert_eq!(stats.total_exp(), 0.0);
    }

    #[test]
    fn multi_level_grant_queues_one_session_per_level() {
        let mut stats = PlayerStats::new();
        let mut level_up = LevelUpState::default();

        // Level 1 needs 8, level 2 needs 13; 25 leaves a remainder of 4.
        let gained = grant(&mut stats, &mut level_up, 25.0);

        assert_eq!(gained, vec![2, 3]);
        assert_eq!(stats.level(), 3);
        assert_eq!(level_up.pending(), 2);
        assert!((stats.exp() - 4.0).abs() < f32::EPSILON);
        assert_eq!(stats.exp_to_next(), 18);
    }

    #[test]
    fn consume_pending_underflow_is_rejected() {
        let mut level_up = LevelUpState::default();
        assert!(!level_up.consume_pending());
        level_up.pending = 2;
        assert!(level_up.consume_pending());
        assert_eq!(level_up.pending(), 1);
    }
}
