#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Upgrade selection driven by queued level-ups.
//!
//! Whenever a level-up is queued and no session is showing, this system
//! builds the option pool from the player's current weapon levels, shuffles
//! it deterministically, and asks the world to open a session with up to
//! three options. Resolving a session re-triggers the system, so queued
//! level-ups chain one menu after another until the queue drains. Entering
//! the running phase also re-triggers, so a level-up granted while paused
//! opens its menu as soon as the run resumes.

use ember_arena_core::{
    dagger_level, fire_wand_level, next_dagger_level, next_fast_sword_level, next_fire_wand_level,
    Command, Event, GamePhase, UpgradeOption, WeaponKind, DAGGER_LEVELS, FIRE_WAND_LEVELS,
};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;
const OPTIONS_PER_SESSION: usize = 3;

/// Configuration parameters required to construct the upgrades system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided shuffle seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Immutable view of the weapon levels currently installed on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadoutView {
    /// Installed dagger level.
    pub dagger: u32,
    /// Installed fast-sword level; zero while dormant.
    pub fast_sword: u32,
    /// Installed fire-wand level; zero while dormant.
    pub fire_wand: u32,
}

/// Pure system that opens upgrade sessions for queued level-ups.
#[derive(Debug)]
pub struct Upgrades {
    rng_state: u64,
}

impl Upgrades {
    /// Creates a new upgrades system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_state: config.rng_seed,
        }
    }

    /// Consumes events and immutable views to emit session-open commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GamePhase,
        pending_level_ups: u32,
        session_active: bool,
        loadout: LoadoutView,
        out: &mut Vec<Command>,
    ) {
        let actionable = events.iter().any(|event| {
            matches!(
                event,
                Event::LevelGained { .. }
                    | Event::UpgradeSessionClosed
                    | Event::GamePhaseChanged {
                        phase: GamePhase::Running,
                        ..
                    }
            )
        });
        if !actionable {
            return;
        }

        if phase != GamePhase::Running || session_active || pending_level_ups == 0 {
            return;
        }

        let pool = build_pool(loadout);
        let options = self.pick(pool);
        out.push(Command::OpenUpgradeSession { options });
    }

    /// Shuffles the pool and keeps at most three options.
    fn pick(&mut self, mut pool: Vec<UpgradeOption>) -> Vec<UpgradeOption> {
        for index in (1..pool.len()).rev() {
            let value = self.advance_rng();
            let swap_index = (value % (index as u64 + 1)) as usize;
            pool.swap(index, swap_index);
        }
        pool.truncate(OPTIONS_PER_SESSION.min(pool.len()));
        pool
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}

/// Builds the full option pool for the provided loadout.
///
/// Maxed weapon tracks contribute nothing; a fully maxed loadout yields an
/// empty pool, which the world resolves as an automatic session close.
#[must_use]
pub fn build_pool(loadout: LoadoutView) -> Vec<UpgradeOption> {
    let mut pool = Vec::new();

    if let Some(next) = next_dagger_level(loadout.dagger) {
        let previous = dagger_level(loadout.dagger).unwrap_or(&DAGGER_LEVELS[0]);
        let count_delta = next.count as f32 - previous.count as f32;
        let deltas: Vec<String> = [
            format_stat_delta(
                if count_delta.abs() == 1.0 {
                    "dagger"
                } else {
                    "daggers"
                },
                count_delta,
                "",
            ),
            format_stat_delta("damage", next.damage as f32 - previous.damage as f32, ""),
            format_stat_delta("spin", next.rot_speed - previous.rot_speed, "/s"),
            format_stat_delta("radius", next.distance - previous.distance, ""),
        ]
        .into_iter()
        .flatten()
        .collect();

        pool.push(UpgradeOption {
            id: format!("dagger-level-{}", next.level),
            name: format!("{} (Lv.{})", next.name, next.level),
            description: format!("{}{}", next.description, stats_suffix(&deltas)),
            weapon: WeaponKind::Dagger,
            target_level: next.level,
        });
    }

    if let Some(next) = next_fast_sword_level(loadout.fast_sword) {
        pool.push(UpgradeOption {
            id: format!("fast-sword-level-{}", next.level),
            name: format!("{} (Lv.{})", next.name, next.level),
            description: next.description.to_owned(),
            weapon: WeaponKind::FastSword,
            target_level: next.level,
        });
    }

    if let Some(next) = next_fire_wand_level(loadout.fire_wand) {
        let previous = fire_wand_level(loadout.fire_wand).unwrap_or(&FIRE_WAND_LEVELS[0]);
        let projectile_delta = next.projectile_count as f32 - previous.projectile_count as f32;
        let deltas: Vec<String> = [
            format_stat_delta(
                if projectile_delta.abs() == 1.0 {
                    "projectile"
                } else {
                    "projectiles"
                },
                projectile_delta,
                "",
            ),
            format_stat_delta("damage", next.damage as f32 - previous.damage as f32, ""),
            format_stat_delta("size", next.projectile_size - previous.projectile_size, ""),
        ]
        .into_iter()
        .flatten()
        .collect();

        pool.push(UpgradeOption {
            id: format!("fire-wand-level-{}", next.level),
            name: format!("{} (Lv.{})", next.name, next.level),
            description: format!("{}{}", next.description, stats_suffix(&deltas)),
            weapon: WeaponKind::FireWand,
            target_level: next.level,
        });
    }

    pool
}

fn stats_suffix(deltas: &[String]) -> String {
    if deltas.is_empty() {
        String::new()
    } else {
        format!(" ({})", deltas.join(", "))
    }
}

fn format_stat_delta(label: &str, value: f32, unit: &str) -> Option<String> {
    if value == 0.0 {
        return None;
    }
    let prefix = if value > 0.0 { "+" } else { "" };
    Some(format!("{prefix}{value}{unit} {label}"))
}
