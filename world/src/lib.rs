#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Ember Arena.
//!
//! The world owns every progression singleton: the game phase, the experience
//! ledger, the live enemy registry, the shard field, and the weapon loadout.
//! All mutation flows through [`apply`]; systems and adapters observe the
//! world exclusively through [`query`].

use std::time::Duration;

use ember_arena_core::{
    ArenaPoint, ArenaSize, Command, Event, GamePhase, ShardId, UpgradeChoiceError, UpgradeOption,
    WeaponKind, dagger_level, fast_sword_level, fire_wand_level, DaggerLevel, FastSwordLevel,
    FireWandLevel, DAGGER_LEVELS, SHARD_SCATTER, WELCOME_BANNER,
};

mod enemies;
mod experience;
mod progression;

use enemies::EnemyRegistry;
use experience::{step_shard, Shard, ShardStep};
use progression::{decompose_exp, grant};

pub use progression::{LevelUpState, PlayerStats};

const SHARD_SCATTER_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Represents the authoritative Ember Arena world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    arena: ArenaSize,
    phase: GamePhase,
    tick_index: u64,
    player_position: ArenaPoint,
    stats: PlayerStats,
    level_up: LevelUpState,
    offered_upgrades: Option<Vec<UpgradeOption>>,
    weapons: WeaponStates,
    enemies: EnemyRegistry,
    shards: Vec<Shard>,
    next_shard_id: u32,
    spawn_markers: Vec<ArenaPoint>,
    scatter_state: u64,
}

impl World {
    /// Creates a new Ember Arena world ready for simulation.
    #[must_use]
    pub fn new() -> Self {
        let arena = ArenaSize::default();
        Self {
            banner: WELCOME_BANNER,
            phase: GamePhase::Start,
            tick_index: 0,
            player_position: arena.center(),
            stats: PlayerStats::new(),
            level_up: LevelUpState::default(),
            offered_upgrades: None,
            weapons: WeaponStates::new(),
            enemies: EnemyRegistry::default(),
            shards: Vec::new(),
            next_shard_id: 0,
            spawn_markers: Vec::new(),
            scatter_state: SHARD_SCATTER_SEED,
            arena,
        }
    }

    fn gameplay_window_open(&self) -> bool {
        self.phase == GamePhase::Running && !self.level_up.active()
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        let previous = self.phase;
        self.phase = phase;
        out_events.push(Event::GamePhaseChanged { phase, previous });
    }

    fn next_unit(&mut self) -> f32 {
        self.scatter_state = next_random(self.scatter_state);
        ((self.scatter_state >> 40) as f32) / 16_777_216.0
    }

    fn scatter_offset(&mut self) -> f32 {
        (self.next_unit() * 2.0 - 1.0) * SHARD_SCATTER
    }

    fn drop_exp_shards(&mut self, total: f32, origin: ArenaPoint, out_events: &mut Vec<Event>) {
        for value in decompose_exp(total) {
            let shard = ShardId::new(self.next_shard_id);
            self.next_shard_id = self.next_shard_id.wrapping_add(1);
            let position = ArenaPoint::new(
                origin.x() + self.scatter_offset(),
                origin.y() + self.scatter_offset(),
            );
            let angle = self.next_unit() * 360.0;
            self.shards.push(Shard::new(shard, value, position, angle));
            out_events.push(Event::ShardSpawned {
                shard,
                value,
                position,
            });
        }
    }

    fn award_exp(&mut self, amount: f32, out_events: &mut Vec<Event>) {
        for level in grant(&mut self.stats, &mut self.level_up, amount) {
            out_events.push(Event::LevelGained { level });
        }
    }

    fn step_shards(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let player = self.player_position;
        let radius = self.stats.pickup_radius();
        let mut collected: Vec<(ShardId, u32)> = Vec::new();
        self.shards
            .retain_mut(|shard| match step_shard(shard, player, radius, dt) {
                ShardStep::Drifting => true,
                ShardStep::Collected => {
                    collected.push((shard.id, shard.value));
                    false
                }
            });

        for (shard, value) in collected {
            out_events.push(Event::ShardCollected { shard, value });
            self.award_exp(value as f32, out_events);
        }
    }

    fn close_upgrade_session(&mut self, out_events: &mut Vec<Event>) {
        self.offered_upgrades = None;
        self.level_up.set_active(false);
        out_events.push(Event::UpgradeSessionClosed);
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.set_phase(GamePhase::Start, out_events);
        self.tick_index = 0;
        self.player_position = self.arena.center();
        self.stats = PlayerStats::new();
        self.level_up.reset();
        self.offered_upgrades = None;
        self.weapons = WeaponStates::new();
        self.enemies.clear();
        self.shards.clear();
        self.next_shard_id = 0;
        self.spawn_markers.clear();
        self.scatter_state = SHARD_SCATTER_SEED;
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            if world.gameplay_window_open() {
                world.weapons.tick(dt);
                world.step_shards(dt, out_events);
            }
        }
        Command::StartRun => {
            if world.phase != GamePhase::Running {
                world.set_phase(GamePhase::Running, out_events);
            }
        }
        Command::PauseRun => {
            if world.phase == GamePhase::Running {
                world.set_phase(GamePhase::Paused, out_events);
            }
        }
        Command::ResumeRun => {
            if world.phase == GamePhase::Paused {
                world.set_phase(GamePhase::Running, out_events);
            }
        }
        Command::MarkDefeat => {
            world.set_phase(GamePhase::GameOver, out_events);
        }
        Command::ResetRun => {
            world.reset(out_events);
        }
        Command::SetPlayerPosition { position } => {
            world.player_position = position;
        }
        Command::GrantExp { amount } => {
            world.award_exp(amount, out_events);
        }
        Command::DropExp { total, origin } => {
            world.drop_exp_shards(total, origin, out_events);
        }
        Command::SpawnEnemyGroup {
            archetype,
            overrides,
            positions,
        } => {
            for position in positions {
                let enemy = world.enemies.spawn(archetype, overrides, position);
                out_events.push(Event::EnemySpawned {
                    enemy,
                    archetype,
                    position,
                });
            }
        }
        Command::HitEnemy { enemy, damage } => {
            if let Some(death) = world.enemies.hit(enemy, damage) {
                out_events.push(Event::EnemyDied {
                    enemy: death.id,
                    exp_reward: death.exp_reward,
                    position: death.position,
                });
                world.drop_exp_shards(death.exp_reward as f32, death.position, out_events);
            }
        }
        Command::PublishSpawnPreview { markers } => {
            world.spawn_markers = markers;
        }
        Command::ClearSpawnPreview => {
            world.spawn_markers.clear();
        }
        Command::OpenUpgradeSession { options } => {
            if world.level_up.active() || !world.level_up.consume_pending() {
                return;
            }

            if options.is_empty() {
                out_events.push(Event::UpgradeSessionClosed);
                return;
            }

            world.offered_upgrades = Some(options.clone());
            world.level_up.set_active(true);
            out_events.push(Event::UpgradeSessionOpened { options });
        }
        Command::ChooseUpgrade { option } => {
            if !world.level_up.active() {
                out_events.push(Event::UpgradeChoiceRejected {
                    reason: UpgradeChoiceError::NoActiveSession,
                });
                return;
            }

            let chosen = world
                .offered_upgrades
                .as_ref()
                .and_then(|options| options.get(option))
                .cloned();
            let Some(chosen) = chosen else {
                out_events.push(Event::UpgradeChoiceRejected {
                    reason: UpgradeChoiceError::InvalidOption,
                });
                return;
            };

            world.weapons.install(chosen.weapon, chosen.target_level);
            out_events.push(Event::UpgradeApplied { option: chosen });
            world.close_upgrade_session(out_events);
        }
        Command::CancelUpgradeSession => {
            if world.level_up.active() {
                world.close_upgrade_session(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{LevelUpState, PlayerStats, World};
    use ember_arena_core::{
        tier_for_value, ArenaPoint, ArenaSize, EnemyArchetype, EnemyId, GamePhase, Rgb, ShardId,
        UpgradeOption,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Active phase of the overall game.
    #[must_use]
    pub fn game_phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Dimensions of the arena rectangle.
    #[must_use]
    pub fn arena(world: &World) -> ArenaSize {
        world.arena
    }

    /// Last reported position of the player.
    #[must_use]
    pub fn player_position(world: &World) -> ArenaPoint {
        world.player_position
    }

    /// Snapshot of the experience ledger.
    #[must_use]
    pub fn player_stats(world: &World) -> PlayerStats {
        world.stats
    }

    /// Snapshot of the queued and active level-up bookkeeping.
    #[must_use]
    pub fn level_up_state(world: &World) -> LevelUpState {
        world.level_up
    }

    /// Reports whether gameplay time is currently flowing.
    ///
    /// The window is open only while the game runs and no level-up menu is
    /// presenting options; everything gameplay-gated freezes outside it.
    #[must_use]
    pub fn gameplay_window_open(world: &World) -> bool {
        world.gameplay_window_open()
    }

    /// Number of enemies currently alive in the arena.
    #[must_use]
    pub fn live_enemy_count(world: &World) -> u32 {
        world.enemies.live_count()
    }

    /// Spawn-marker positions published ahead of the next wave.
    #[must_use]
    pub fn spawn_markers(world: &World) -> &[ArenaPoint] {
        &world.spawn_markers
    }

    /// Options presented by the active upgrade session, if one is open.
    #[must_use]
    pub fn offered_upgrades(world: &World) -> Option<&[UpgradeOption]> {
        world.offered_upgrades.as_deref()
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                archetype: enemy.archetype,
                position: enemy.position,
                hp: enemy.hp,
                max_hp: enemy.max_hp,
                speed: enemy.speed,
                touch_damage: enemy.touch_damage,
                exp_reward: enemy.exp_reward,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Captures a read-only view of the experience shards in the arena.
    #[must_use]
    pub fn shard_view(world: &World) -> ShardView {
        let mut snapshots: Vec<ShardSnapshot> = world
            .shards
            .iter()
            .map(|shard| {
                let tier = tier_for_value(shard.value);
                ShardSnapshot {
                    id: shard.id,
                    value: shard.value,
                    position: shard.position,
                    angle: shard.angle,
                    magnetized: shard.magnetized,
                    color: tier.color,
                    radius: tier.radius,
                }
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ShardView { snapshots }
    }

    /// Snapshot of the weapon levels currently installed.
    #[must_use]
    pub fn weapon_loadout(world: &World) -> WeaponLoadout {
        WeaponLoadout {
            dagger_level: world.weapons.dagger.level,
            fast_sword_level: world.weapons.fast_sword.map_or(0, |def| def.level),
            fire_wand_level: world.weapons.fire_wand.map_or(0, |def| def.level),
        }
    }

    /// Read-only snapshot describing all live enemies.
    #[derive(Clone, Debug)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemy snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single enemy's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned to the enemy.
        pub id: EnemyId,
        /// Archetype the enemy was built from.
        pub archetype: EnemyArchetype,
        /// Position the enemy occupies.
        pub position: ArenaPoint,
        /// Remaining hit points.
        pub hp: u32,
        /// Hit points the enemy spawned with.
        pub max_hp: u32,
        /// Movement speed in world units per second.
        pub speed: f32,
        /// Contact damage dealt to the player.
        pub touch_damage: u32,
        /// Experience dropped on death.
        pub exp_reward: u32,
    }

    /// Read-only snapshot describing all shards in the arena.
    #[derive(Clone, Debug)]
    pub struct ShardView {
        snapshots: Vec<ShardSnapshot>,
    }

    impl ShardView {
        /// Iterator over the captured shard snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &ShardSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ShardSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single shard's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ShardSnapshot {
        /// Unique identifier assigned to the shard.
        pub id: ShardId,
        /// Experience denomination the shard carries.
        pub value: u32,
        /// Position of the shard.
        pub position: ArenaPoint,
        /// Idle spin angle in degrees.
        pub angle: f32,
        /// Indicates whether the shard is drifting toward the player.
        pub magnetized: bool,
        /// Colour of the shard's tier.
        pub color: Rgb,
        /// Visual radius of the shard's tier.
        pub radius: f32,
    }

    /// Snapshot of the weapon levels installed on the player.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WeaponLoadout {
        /// Installed dagger level; live from the start of a run.
        pub dagger_level: u32,
        /// Installed fast-sword level; zero while dormant.
        pub fast_sword_level: u32,
        /// Installed fire-wand level; zero while dormant.
        pub fire_wand_level: u32,
    }
}

/// Installed weapon definitions plus their live cooldown clocks.
#[derive(Clone, Copy, Debug)]
struct WeaponStates {
    dagger: &'static DaggerLevel,
    fast_sword: Option<&'static FastSwordLevel>,
    fast_sword_cooldown: Duration,
    fire_wand: Option<&'static FireWandLevel>,
    fire_wand_cooldown: Duration,
}

impl WeaponStates {
    fn new() -> Self {
        Self {
            dagger: &DAGGER_LEVELS[0],
            fast_sword: None,
            fast_sword_cooldown: Duration::ZERO,
            fire_wand: None,
            fire_wand_cooldown: Duration::ZERO,
        }
    }

    /// Advances cooldown clocks by `dt` of open gameplay time.
    fn tick(&mut self, dt: Duration) {
        if self.fast_sword.is_some() {
            self.fast_sword_cooldown = self.fast_sword_cooldown.saturating_sub(dt);
        }
        if self.fire_wand.is_some() {
            self.fire_wand_cooldown = self.fire_wand_cooldown.saturating_sub(dt);
        }
    }

    /// Installs the definition for a weapon level.
    ///
    /// The fire wand waits a full cooldown before its first attack, so its
    /// clock re-arms on install; the other weapons keep their clocks.
    fn install(&mut self, weapon: WeaponKind, target_level: u32) {
        match weapon {
            WeaponKind::Dagger => {
                if let Some(def) = dagger_level(target_level) {
                    self.dagger = def;
                }
            }
            WeaponKind::FastSword => {
                if let Some(def) = fast_sword_level(target_level) {
                    self.fast_sword = Some(def);
                }
            }
            WeaponKind::FireWand => {
                if let Some(def) = fire_wand_level(target_level) {
                    self.fire_wand = Some(def);
                    self.fire_wand_cooldown = def.cooldown;
                }
            }
        }
    }
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_arena_core::{EnemyArchetype, EnemyOverrides, ShardId};

    fn sample_option(weapon: WeaponKind, target_level: u32) -> UpgradeOption {
        UpgradeOption {
            id: format!("sample-{target_level}"),
            name: "Sample".to_owned(),
            description: "Sample option used by tests.".to_owned(),
            weapon,
            target_level,
        }
    }

    fn drain_levels(events: &[Event]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::LevelGained { level } => Some(*level),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn run_phase_transitions_emit_change_events() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartRun, &mut events);
        apply(&mut world, Command::PauseRun, &mut events);
        apply(&mut world, Command::ResumeRun, &mut events);

        assert_eq!(
            events,
            vec![
                Event::GamePhaseChanged {
                    phase: GamePhase::Running,
                    previous: GamePhase::Start,
                },
                Event::GamePhaseChanged {
                    phase: GamePhase::Paused,
                    previous: GamePhase::Running,
                },
                Event::GamePhaseChanged {
                    phase: GamePhase::Running,
                    previous: GamePhase::Paused,
                },
            ]
        );
    }

    #[test]
    fn start_resumes_from_any_non_running_phase() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartRun, &mut events);
        apply(&mut world, Command::PauseRun, &mut events);
        events.clear();
        apply(&mut world, Command::StartRun, &mut events);

        assert_eq!(
            events,
            vec![Event::GamePhaseChanged {
                phase: GamePhase::Running,
                previous: GamePhase::Paused,
            }]
        );

        apply(&mut world, Command::MarkDefeat, &mut events);
        events.clear();
        apply(&mut world, Command::StartRun, &mut events);
        assert_eq!(query::game_phase(&world), GamePhase::Running);

        events.clear();
        apply(&mut world, Command::StartRun, &mut events);
        assert!(events.is_empty(), "a running game ignores a second start");
    }

    #[test]
    fn pause_outside_running_is_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::PauseRun, &mut events);
        apply(&mut world, Command::ResumeRun, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::game_phase(&world), GamePhase::Start);
    }

    #[test]
    fn defeat_is_idempotent() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartRun, &mut events);
        apply(&mut world, Command::MarkDefeat, &mut events);
        events.clear();
        apply(&mut world, Command::MarkDefeat, &mut events);

        assert!(events.is_empty());
        assert_eq!(query::game_phase(&world), GamePhase::GameOver);
    }

    #[test]
    fn lump_grant_crosses_multiple_thresholds() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::GrantExp { amount: 25.0 }, &mut events);

        assert_eq!(drain_levels(&events), vec![2, 3]);
        let stats = query::player_stats(&world);
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.exp(), 4.0);
        assert_eq!(stats.exp_to_next(), 18);
        assert_eq!(query::level_up_state(&world).pending(), 2);
    }

    #[test]
    fn dropped_exp_decomposes_into_greedy_denominations() {
        let mut world = World::new();
        let mut events = Vec::new();
        let origin = ArenaPoint::new(400.0, 300.0);

        apply(
            &mut world,
            Command::DropExp {
                total: 31.0,
                origin,
            },
            &mut events,
        );

        let values: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                Event::ShardSpawned { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![25, 5, 1]);

        for shard in query::shard_view(&world).iter() {
            assert!((shard.position.x() - origin.x()).abs() <= SHARD_SCATTER);
            assert!((shard.position.y() - origin.y()).abs() <= SHARD_SCATTER);
        }
    }

    #[test]
    fn nearby_shards_magnetize_and_collect_over_ticks() {
        let mut world = World::new();
        let mut events = Vec::new();
        let player = ArenaPoint::new(400.0, 300.0);

        apply(&mut world, Command::StartRun, &mut events);
        apply(
            &mut world,
            Command::SetPlayerPosition { position: player },
            &mut events,
        );
        apply(
            &mut world,
            Command::DropExp {
                total: 5.0,
                origin: player,
            },
            &mut events,
        );
        events.clear();

        let mut collected = Vec::new();
        for _ in 0..600 {
            apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_millis(16),
                },
                &mut events,
            );
            collected.extend(events.iter().filter_map(|event| match event {
                Event::ShardCollected { value, .. } => Some(*value),
                _ => None,
            }));
            events.clear();
            if !collected.is_empty() {
                break;
            }
        }

        assert_eq!(collected, vec![5]);
        assert!(query::shard_view(&world).into_vec().is_empty());
        assert_eq!(query::player_stats(&world).total_exp(), 5.0);
    }

    #[test]
    fn shards_freeze_while_the_level_up_menu_is_open() {
        let mut world = World::new();
        let mut events = Vec::new();
        let player = ArenaPoint::new(400.0, 300.0);

        apply(&mut world, Command::StartRun, &mut events);
        apply(
            &mut world,
            Command::SetPlayerPosition { position: player },
            &mut events,
        );
        apply(
            &mut world,
            Command::DropExp {
                total: 1.0,
                origin: player,
            },
            &mut events,
        );
        apply(&mut world, Command::GrantExp { amount: 8.0 }, &mut events);
        apply(
            &mut world,
            Command::OpenUpgradeSession {
                options: vec![sample_option(WeaponKind::Dagger, 2)],
            },
            &mut events,
        );
        assert!(query::level_up_state(&world).active());

        let before = query::shard_view(&world).into_vec();
        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );

        assert_eq!(query::shard_view(&world).into_vec(), before);
        assert_eq!(events, vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]);
    }

    #[test]
    fn upgrade_session_consumes_pending_and_applies_choice() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartRun, &mut events);
        apply(&mut world, Command::GrantExp { amount: 25.0 }, &mut events);
        assert_eq!(query::level_up_state(&world).pending(), 2);
        events.clear();

        apply(
            &mut world,
            Command::OpenUpgradeSession {
                options: vec![
                    sample_option(WeaponKind::Dagger, 2),
                    sample_option(WeaponKind::FastSword, 1),
                ],
            },
            &mut events,
        );
        assert_eq!(query::level_up_state(&world).pending(), 1);
        assert!(query::level_up_state(&world).active());
        assert!(matches!(
            events.as_slice(),
            [Event::UpgradeSessionOpened { options }] if options.len() == 2
        ));
        events.clear();

        apply(&mut world, Command::ChooseUpgrade { option: 5 }, &mut events);
        assert_eq!(
            events,
            vec![Event::UpgradeChoiceRejected {
                reason: UpgradeChoiceError::InvalidOption,
            }]
        );
        assert!(query::level_up_state(&world).active());
        events.clear();

        apply(&mut world, Command::ChooseUpgrade { option: 1 }, &mut events);
        assert!(matches!(
            events.as_slice(),
            [Event::UpgradeApplied { .. }, Event::UpgradeSessionClosed]
        ));
        assert!(!query::level_up_state(&world).active());
        assert_eq!(query::weapon_loadout(&world).fast_sword_level, 1);
    }

    #[test]
    fn choices_without_a_session_are_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::ChooseUpgrade { option: 0 }, &mut events);

        assert_eq!(
            events,
            vec![Event::UpgradeChoiceRejected {
                reason: UpgradeChoiceError::NoActiveSession,
            }]
        );
    }

    #[test]
    fn empty_option_sets_auto_resolve_the_session() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::GrantExp { amount: 8.0 }, &mut events);
        assert_eq!(query::level_up_state(&world).pending(), 1);
        events.clear();

        apply(
            &mut world,
            Command::OpenUpgradeSession { options: Vec::new() },
            &mut events,
        );

        assert_eq!(events, vec![Event::UpgradeSessionClosed]);
        assert_eq!(query::level_up_state(&world).pending(), 0);
        assert!(!query::level_up_state(&world).active());
    }

    #[test]
    fn open_requests_without_pending_levels_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::OpenUpgradeSession {
                options: vec![sample_option(WeaponKind::Dagger, 2)],
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(query::offered_upgrades(&world).is_none());
    }

    #[test]
    fn cancel_discards_the_session_without_refunding() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::GrantExp { amount: 8.0 }, &mut events);
        apply(
            &mut world,
            Command::OpenUpgradeSession {
                options: vec![sample_option(WeaponKind::FireWand, 1)],
            },
            &mut events,
        );
        events.clear();

        apply(&mut world, Command::CancelUpgradeSession, &mut events);

        assert_eq!(events, vec![Event::UpgradeSessionClosed]);
        assert_eq!(query::level_up_state(&world).pending(), 0);
        assert_eq!(query::weapon_loadout(&world).fire_wand_level, 0);
    }

    #[test]
    fn enemy_deaths_drop_shards_at_their_position() {
        let mut world = World::new();
        let mut events = Vec::new();
        let position = ArenaPoint::new(120.0, 120.0);

        apply(
            &mut world,
            Command::SpawnEnemyGroup {
                archetype: EnemyArchetype::Bit,
                overrides: EnemyOverrides::default(),
                positions: vec![position],
            },
            &mut events,
        );
        let enemy = match events.as_slice() {
            [Event::EnemySpawned { enemy, .. }] => *enemy,
            other => panic!("unexpected events: {other:?}"),
        };
        events.clear();

        apply(
            &mut world,
            Command::HitEnemy { enemy, damage: 99 },
            &mut events,
        );

        assert!(matches!(
            events.first(),
            Some(Event::EnemyDied { exp_reward: 3, .. })
        ));
        let spawned: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                Event::ShardSpawned { value, .. } => Some(*value),
                _ => None,
            })
            .collect();
        assert_eq!(spawned, vec![1, 1, 1]);
        assert_eq!(query::live_enemy_count(&world), 0);
    }

    #[test]
    fn spawn_previews_replace_and_clear() {
        let mut world = World::new();
        let mut events = Vec::new();
        let markers = vec![ArenaPoint::new(48.0, 48.0), ArenaPoint::new(752.0, 48.0)];

        apply(
            &mut world,
            Command::PublishSpawnPreview {
                markers: markers.clone(),
            },
            &mut events,
        );
        assert_eq!(query::spawn_markers(&world), markers.as_slice());

        apply(&mut world, Command::ClearSpawnPreview, &mut events);
        assert!(query::spawn_markers(&world).is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn reset_restores_the_pre_run_shape() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartRun, &mut events);
        apply(&mut world, Command::GrantExp { amount: 40.0 }, &mut events);
        apply(
            &mut world,
            Command::DropExp {
                total: 10.0,
                origin: ArenaPoint::new(100.0, 100.0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnEnemyGroup {
                archetype: EnemyArchetype::Basic,
                overrides: EnemyOverrides::default(),
                positions: vec![ArenaPoint::new(50.0, 50.0)],
            },
            &mut events,
        );
        events.clear();

        apply(&mut world, Command::ResetRun, &mut events);

        assert_eq!(
            events,
            vec![Event::GamePhaseChanged {
                phase: GamePhase::Start,
                previous: GamePhase::Running,
            }]
        );
        assert_eq!(query::game_phase(&world), GamePhase::Start);
        let stats = query::player_stats(&world);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_exp(), 0.0);
        assert_eq!(query::level_up_state(&world).pending(), 0);
        assert_eq!(query::live_enemy_count(&world), 0);
        assert!(query::shard_view(&world).into_vec().is_empty());
        assert_eq!(query::weapon_loadout(&world).dagger_level, 1);
        assert_eq!(query::player_position(&world), query::arena(&world).center());

        let mut replay = Vec::new();
        apply(
            &mut world,
            Command::DropExp {
                total: 1.0,
                origin: ArenaPoint::new(10.0, 10.0),
            },
            &mut replay,
        );
        assert!(matches!(
            replay.as_slice(),
            [Event::ShardSpawned { shard, .. }] if *shard == ShardId::new(0)
        ));
    }
}
