#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ember Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! It also carries the compile-time data tables for the game: the experience
//! tier denominations, the enemy archetype baselines, and the weapon level
//! definitions that upgrade sessions install.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Ember Arena.";

/// Default arena width in world units.
pub const ARENA_WIDTH: f32 = 800.0;
/// Default arena height in world units.
pub const ARENA_HEIGHT: f32 = 600.0;
/// Padding applied to spawn placement when a config omits its own.
pub const DEFAULT_SPAWN_PADDING: f32 = 48.0;

/// Experience points required to clear level 1.
pub const LEVEL_XP_BASE: f32 = 8.0;
/// Additional experience required per level past the first.
pub const LEVEL_XP_GROWTH: f32 = 5.0;
/// Radius within which shards magnetize toward the player.
pub const DEFAULT_PICKUP_RADIUS: f32 = 120.0;
/// Initial interpolation speed of a freshly magnetized shard.
pub const EXP_MAGNET_BASE_SPEED: f32 = 6.0;
/// Interpolation speed gained per second spent magnetized.
pub const EXP_MAGNET_SPEED_GROWTH: f32 = 4.0;
/// Uniform positional scatter applied per axis when a shard drops.
pub const SHARD_SCATTER: f32 = 18.0;
/// Distance at which a magnetized shard snaps onto the player.
pub const SHARD_SNAP_EPSILON: f32 = 4.0;
/// Idle spin applied to shards, in degrees per second.
pub const SHARD_SPIN_RATE: f32 = 120.0;

/// Baseline movement speed for the basic enemy archetype.
pub const ENEMY_SPEED: f32 = 90.0;
/// Baseline contact damage dealt by enemies.
pub const ENEMY_TOUCH_DAMAGE: u32 = 1;
/// Baseline experience rewarded by a slain enemy.
pub const ENEMY_EXP: u32 = 1;
/// Baseline movement speed for the ranged archetype.
pub const RANGED_ENEMY_SPEED: f32 = 60.0;
/// Baseline movement speed for the bit archetype.
pub const BIT_ENEMY_SPEED: f32 = 70.0;
/// Baseline contact damage for the bit archetype.
pub const BIT_ENEMY_TOUCH_DAMAGE: u32 = 2;
/// Baseline experience rewarded by the bit archetype.
pub const BIT_ENEMY_EXP: u32 = 3;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Transitions the run into the running phase from any non-running phase.
    StartRun,
    /// Pauses a running game.
    PauseRun,
    /// Resumes a paused game.
    ResumeRun,
    /// Marks the run as lost; idempotent once the game is over.
    MarkDefeat,
    /// Restores every progression singleton to its initial pre-run shape.
    ResetRun,
    /// Reports the player's live position as resolved by the host engine.
    SetPlayerPosition {
        /// Position of the player in arena coordinates.
        position: ArenaPoint,
    },
    /// Awards a lump of experience directly to the ledger.
    GrantExp {
        /// Amount of experience to award; non-positive amounts are ignored.
        amount: f32,
    },
    /// Decomposes a lump experience award into pickup shards at a location.
    DropExp {
        /// Total experience value to decompose into shards.
        total: f32,
        /// Point the shards scatter around.
        origin: ArenaPoint,
    },
    /// Instantiates one enemy per provided position for a single wave group.
    SpawnEnemyGroup {
        /// Archetype supplying baseline tunables for the group.
        archetype: EnemyArchetype,
        /// Per-group overrides layered over the archetype baselines.
        overrides: EnemyOverrides,
        /// Exact spawn position for each enemy in the group.
        positions: Vec<ArenaPoint>,
    },
    /// Applies damage to a live enemy, as reported by host collisions.
    HitEnemy {
        /// Identifier of the enemy taking damage.
        enemy: EnemyId,
        /// Hit points removed by the hit.
        damage: u32,
    },
    /// Replaces the transient spawn-marker previews shown before a wave.
    PublishSpawnPreview {
        /// Positions upcoming enemies will occupy.
        markers: Vec<ArenaPoint>,
    },
    /// Removes any published spawn-marker previews.
    ClearSpawnPreview,
    /// Consumes one queued level-up and presents the provided options.
    OpenUpgradeSession {
        /// Options offered to the player; an empty set auto-resolves.
        options: Vec<UpgradeOption>,
    },
    /// Resolves the active upgrade session with the player's choice.
    ChooseUpgrade {
        /// Index into the offered option set.
        option: usize,
    },
    /// Tears down any visible upgrade session without resolving it.
    CancelUpgradeSession,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the game entered a new phase.
    GamePhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
        /// Phase that was active before the transition.
        previous: GamePhase,
    },
    /// Reports that the player's level increased by one.
    LevelGained {
        /// Level the player now holds.
        level: u32,
    },
    /// Confirms that an experience shard entered the arena.
    ShardSpawned {
        /// Identifier assigned to the shard.
        shard: ShardId,
        /// Experience denomination the shard carries.
        value: u32,
        /// Position the shard scattered to.
        position: ArenaPoint,
    },
    /// Confirms that the player absorbed a shard.
    ShardCollected {
        /// Identifier of the collected shard.
        shard: ShardId,
        /// Experience granted by the collection.
        value: u32,
    },
    /// Confirms that an enemy was created.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype the enemy was built from.
        archetype: EnemyArchetype,
        /// Position the enemy occupies after spawning.
        position: ArenaPoint,
    },
    /// Reports that an enemy was slain and left the registry.
    EnemyDied {
        /// Identifier of the slain enemy.
        enemy: EnemyId,
        /// Experience value dropped at the enemy's position.
        exp_reward: u32,
        /// Last position the enemy occupied.
        position: ArenaPoint,
    },
    /// Announces that an upgrade-selection session opened.
    UpgradeSessionOpened {
        /// Options presented to the player.
        options: Vec<UpgradeOption>,
    },
    /// Confirms that a chosen upgrade was applied to its weapon.
    UpgradeApplied {
        /// Option the player selected.
        option: UpgradeOption,
    },
    /// Announces that the active upgrade session ended.
    UpgradeSessionClosed,
    /// Reports that an upgrade choice request was rejected.
    UpgradeChoiceRejected {
        /// Specific reason the choice failed.
        reason: UpgradeChoiceError,
    },
}

/// Describes the active phase of the overall game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// The pre-run start screen.
    Start,
    /// Gameplay is live.
    Running,
    /// Gameplay is suspended by the player.
    Paused,
    /// The run ended in defeat.
    GameOver,
}

/// Phase of the wave sequencer's scripted lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WavePhase {
    /// Counting down toward the next wave.
    Waiting,
    /// Committing spawn positions into enemies.
    Spawning,
    /// Waiting for the live enemy count to reach zero.
    Clearing,
    /// Every scripted wave was cleared.
    Done,
    /// The sequence was aborted before completion.
    Stopped,
}

/// Position expressed in arena world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaPoint {
    x: f32,
    y: f32,
}

impl ArenaPoint {
    /// Creates a new arena position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the position.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical component of the position.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: ArenaPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }

    /// Linear interpolation toward a target by the provided fraction.
    #[must_use]
    pub fn lerp_toward(self, target: ArenaPoint, t: f32) -> ArenaPoint {
        ArenaPoint::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        )
    }
}

/// Rectangular arena dimensions expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    width: f32,
    height: f32,
}

impl ArenaSize {
    /// Creates a new arena size descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the arena.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the arena.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Centre point of the arena.
    #[must_use]
    pub fn center(&self) -> ArenaPoint {
        ArenaPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for ArenaSize {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

/// Byte RGB colour applied to arena visuals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to an enemy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an experience shard.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ShardId(u32);

impl ShardId {
    /// Creates a new shard identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Edges of the arena rectangle available to edge spawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// The y-minimum edge.
    Top,
    /// The y-maximum edge.
    Bottom,
    /// The x-minimum edge.
    Left,
    /// The x-maximum edge.
    Right,
}

impl Edge {
    /// Every arena edge, in a stable order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Describes where a group of enemies materializes inside the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnLocation {
    /// Each point drawn independently and uniformly from the padded arena.
    Random {
        /// Inset from the arena bounds; defaults to [`DEFAULT_SPAWN_PADDING`].
        padding: Option<f32>,
    },
    /// Points distributed evenly along an arena edge.
    Edge {
        /// Fixed edge to use; `None` picks a random edge per point.
        edge: Option<Edge>,
        /// Inset from the arena bounds; defaults to [`DEFAULT_SPAWN_PADDING`].
        padding: Option<f32>,
    },
    /// Explicit coordinate list cycled through as needed.
    Points {
        /// Candidate positions; an empty list substitutes the arena centre.
        points: Vec<ArenaPoint>,
        /// Uniform jitter applied per axis to each selected point.
        jitter: f32,
    },
}

impl SpawnLocation {
    /// Effective padding for the variants that inset from the arena bounds.
    #[must_use]
    pub fn padding(&self) -> f32 {
        match self {
            SpawnLocation::Random { padding } | SpawnLocation::Edge { padding, .. } => {
                padding.unwrap_or(DEFAULT_SPAWN_PADDING)
            }
            SpawnLocation::Points { .. } => 0.0,
        }
    }
}

/// Enemy archetypes available to wave scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Melee chaser with baseline tunables.
    Basic,
    /// Slower enemy that attacks from a distance.
    Ranged,
    /// Charging enemy that resists knockback.
    Bit,
}

impl EnemyArchetype {
    /// Baseline hit points for the archetype.
    #[must_use]
    pub const fn base_hp(self) -> u32 {
        match self {
            Self::Basic => 4,
            Self::Ranged => 6,
            Self::Bit => 8,
        }
    }

    /// Baseline movement speed for the archetype.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Basic => ENEMY_SPEED,
            Self::Ranged => RANGED_ENEMY_SPEED,
            Self::Bit => BIT_ENEMY_SPEED,
        }
    }

    /// Baseline contact damage for the archetype.
    #[must_use]
    pub const fn base_touch_damage(self) -> u32 {
        match self {
            Self::Basic | Self::Ranged => ENEMY_TOUCH_DAMAGE,
            Self::Bit => BIT_ENEMY_TOUCH_DAMAGE,
        }
    }

    /// Baseline experience reward for the archetype.
    #[must_use]
    pub const fn base_exp(self) -> u32 {
        match self {
            Self::Basic | Self::Ranged => ENEMY_EXP,
            Self::Bit => BIT_ENEMY_EXP,
        }
    }
}

/// Optional per-group overrides layered over archetype baselines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyOverrides {
    /// Overridden hit points.
    pub hp: Option<u32>,
    /// Overridden movement speed.
    pub speed: Option<f32>,
    /// Overridden contact damage.
    pub touch_damage: Option<u32>,
    /// Overridden experience reward.
    pub exp: Option<u32>,
}

/// One enemy group inside a scripted wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyGroupConfig {
    /// Number of enemies to spawn; zero is legal and spawns nothing.
    pub count: u32,
    /// Archetype supplying baseline tunables.
    pub archetype: EnemyArchetype,
    /// Overrides layered over the archetype baselines.
    pub overrides: EnemyOverrides,
    /// Placement descriptor resolved into concrete positions.
    pub spawn: SpawnLocation,
}

/// One scripted batch of enemy-group spawns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Display name; `None` falls back to a numbered label.
    pub name: Option<String>,
    /// Delay before the wave spawns, measured in gameplay time.
    pub delay: Duration,
    /// Enemy groups spawned together when the wave commits.
    pub groups: Vec<EnemyGroupConfig>,
    /// Part of the config shape; unused by the shipped script.
    pub repeat: Option<u32>,
}

impl WaveConfig {
    /// Display name of the wave, falling back to a numbered label.
    #[must_use]
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Wave {}", index + 1))
    }
}

/// Reasons an upgrade choice request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeChoiceError {
    /// No upgrade session is currently presenting options.
    NoActiveSession,
    /// The provided index does not match an offered option.
    InvalidOption,
}

/// Weapon tracks that can be advanced through upgrade sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Orbiting blades, active from the start of a run.
    Dagger,
    /// Forward slash volley, unlocked through upgrades.
    FastSword,
    /// Homing fireballs, unlocked through upgrades.
    FireWand,
}

/// A single upgrade offered during a level-up session.
///
/// Options are ephemeral values built fresh each time a session opens.
/// Applying one installs the referenced weapon level definition; the world is
/// the only code that performs that installation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOption {
    /// Stable identifier per weapon-level transition.
    pub id: String,
    /// Display name shown in the level-up menu.
    pub name: String,
    /// Flavour text plus the non-zero stat deltas.
    pub description: String,
    /// Weapon track the option advances.
    pub weapon: WeaponKind,
    /// Level the weapon reaches when the option is applied.
    pub target_level: u32,
}

/// One denomination in the experience shard tier table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpTier {
    /// Experience value the shard carries.
    pub value: u32,
    /// Colour rendered for shards of this tier.
    pub color: Rgb,
    /// Visual radius of shards of this tier.
    pub radius: f32,
}

/// Shard denominations ordered descending by value.
///
/// The greedy decomposition in the experience ledger is minimal for this
/// superincreasing-like set; a replacement table would need an explicit
/// coin-change pass instead.
pub const EXP_TIERS: [ExpTier; 3] = [
    ExpTier {
        value: 25,
        color: Rgb::from_rgb(0xe5, 0x94, 0x3f),
        radius: 12.0,
    },
    ExpTier {
        value: 5,
        color: Rgb::from_rgb(0xc6, 0x82, 0x39),
        radius: 9.0,
    },
    ExpTier {
        value: 1,
        color: Rgb::from_rgb(0x9d, 0x60, 0x20),
        radius: 7.0,
    },
];

/// Finds the tier whose denomination matches a shard value.
///
/// Falls back to the smallest tier for values below every threshold.
#[must_use]
pub fn tier_for_value(value: u32) -> &'static ExpTier {
    for tier in &EXP_TIERS {
        if value >= tier.value {
            return tier;
        }
    }
    &EXP_TIERS[EXP_TIERS.len() - 1]
}

/// Experience required to advance past the provided level.
///
/// Deterministic and monotonically non-decreasing for non-negative growth.
#[must_use]
pub fn exp_required_for_level(level: u32) -> u32 {
    let raw = LEVEL_XP_BASE + level.saturating_sub(1) as f32 * LEVEL_XP_GROWTH;
    raw.round().max(1.0) as u32
}

/// Tunables for one dagger level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DaggerLevel {
    /// Level this definition installs.
    pub level: u32,
    /// Display name of the level.
    pub name: &'static str,
    /// Menu flavour text.
    pub description: &'static str,
    /// Number of orbiting blades.
    pub count: u32,
    /// Damage dealt per blade contact.
    pub damage: u32,
    /// Orbit speed in degrees per second.
    pub rot_speed: f32,
    /// Orbit radius in world units.
    pub distance: f32,
}

/// Dagger level progression, starting live at level 1.
pub const DAGGER_LEVELS: [DaggerLevel; 4] = [
    DaggerLevel {
        level: 1,
        name: "Twin Daggers",
        description: "Two blades orbit quickly around the hunter.",
        count: 2,
        damage: 1,
        rot_speed: 200.0,
        distance: 40.0,
    },
    DaggerLevel {
        level: 2,
        name: "Triple Threat",
        description: "Adds a third blade plus extra reach and momentum for heavier hits.",
        count: 3,
        damage: 2,
        rot_speed: 270.0,
        distance: 60.0,
    },
    DaggerLevel {
        level: 3,
        name: "Quintet",
        description: "Five daggers form a dense ring with even faster rotation and bite.",
        count: 5,
        damage: 3,
        rot_speed: 340.0,
        distance: 76.0,
    },
    DaggerLevel {
        level: 4,
        name: "Blade Storm",
        description: "Seven blades surge at maximum speed, carving space around the player.",
        count: 7,
        damage: 4,
        rot_speed: 400.0,
        distance: 100.0,
    },
];

/// Tunables for one fast-sword level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FastSwordLevel {
    /// Level this definition installs.
    pub level: u32,
    /// Display name of the level.
    pub name: &'static str,
    /// Menu flavour text.
    pub description: &'static str,
    /// Slashes released per volley.
    pub slash_count: u32,
    /// Damage dealt per slash.
    pub damage: u32,
    /// Time between volleys.
    pub cooldown: Duration,
    /// Forward reach of the volley.
    pub range: f32,
    /// Spacing between consecutive slashes.
    pub spacing: f32,
    /// Width of a single slash.
    pub slash_width: f32,
    /// Height of a single slash.
    pub slash_height: f32,
    /// Lifetime of a single slash.
    pub slash_duration: Duration,
    /// Delay between slashes within one volley.
    pub sequence_delay: Duration,
}

/// Fast-sword level progression; the weapon is dormant at level 0.
pub const FAST_SWORD_LEVELS: [FastSwordLevel; 4] = [
    FastSwordLevel {
        level: 1,
        name: "Vento Slash",
        description: "Unleash a single precise slash straight ahead.",
        slash_count: 1,
        damage: 2,
        cooldown: Duration::from_millis(900),
        range: 60.0,
        spacing: 34.0,
        slash_width: 60.0,
        slash_height: 20.0,
        slash_duration: Duration::from_millis(150),
        sequence_delay: Duration::from_millis(50),
    },
    FastSwordLevel {
        level: 2,
        name: "Gale Edge",
        description: "Adds two more cuts and tightens the cooldown.",
        slash_count: 3,
        damage: 3,
        cooldown: Duration::from_millis(750),
        range: 68.0,
        spacing: 34.0,
        slash_width: 64.0,
        slash_height: 22.0,
        slash_duration: Duration::from_millis(160),
        sequence_delay: Duration::from_millis(50),
    },
    FastSwordLevel {
        level: 3,
        name: "Tempest Veil",
        description: "Five slashes sweep the front line with more force.",
        slash_count: 5,
        damage: 4,
        cooldown: Duration::from_millis(650),
        range: 76.0,
        spacing: 36.0,
        slash_width: 68.0,
        slash_height: 24.0,
        slash_duration: Duration::from_millis(170),
        sequence_delay: Duration::from_millis(45),
    },
    FastSwordLevel {
        level: 4,
        name: "Vento Sacro",
        description: "Seven sacred gusts tear through anything in front.",
        slash_count: 7,
        damage: 5,
        cooldown: Duration::from_millis(550),
        range: 84.0,
        spacing: 38.0,
        slash_width: 72.0,
        slash_height: 26.0,
        slash_duration: Duration::from_millis(180),
        sequence_delay: Duration::from_millis(40),
    },
];

/// Tunables for one fire-wand level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireWandLevel {
    /// Level this definition installs.
    pub level: u32,
    /// Display name of the level.
    pub name: &'static str,
    /// Menu flavour text.
    pub description: &'static str,
    /// Fireballs launched per attack.
    pub projectile_count: u32,
    /// Damage dealt per fireball.
    pub damage: u32,
    /// Time between attacks.
    pub cooldown: Duration,
    /// Targeting range of the wand.
    pub range: f32,
    /// Visual radius of a fireball.
    pub projectile_size: f32,
    /// Travel speed of a fireball.
    pub projectile_speed: f32,
    /// Lifetime of a fireball.
    pub projectile_duration: Duration,
}

/// Fire-wand level progression; the weapon is dormant at level 0.
pub const FIRE_WAND_LEVELS: [FireWandLevel; 4] = [
    FireWandLevel {
        level: 1,
        name: "Fire Wand",
        description: "Launch a single fireball at a random enemy.",
        projectile_count: 1,
        damage: 2,
        cooldown: Duration::from_millis(1200),
        range: 300.0,
        projectile_size: 8.0,
        projectile_speed: 200.0,
        projectile_duration: Duration::from_millis(800),
    },
    FireWandLevel {
        level: 2,
        name: "Dual Flames",
        description: "Fire two fireballs at once with increased damage.",
        projectile_count: 2,
        damage: 3,
        cooldown: Duration::from_millis(1100),
        range: 320.0,
        projectile_size: 10.0,
        projectile_speed: 220.0,
        projectile_duration: Duration::from_millis(850),
    },
    FireWandLevel {
        level: 3,
        name: "Triple Burst",
        description: "Three fireballs with even more power and speed.",
        projectile_count: 3,
        damage: 4,
        cooldown: Duration::from_millis(1000),
        range: 340.0,
        projectile_size: 12.0,
        projectile_speed: 240.0,
        projectile_duration: Duration::from_millis(900),
    },
    FireWandLevel {
        level: 4,
        name: "Inferno",
        description: "Four massive fireballs rain down on enemies.",
        projectile_count: 4,
        damage: 5,
        cooldown: Duration::from_millis(900),
        range: 360.0,
        projectile_size: 14.0,
        projectile_speed: 260.0,
        projectile_duration: Duration::from_millis(950),
    },
];

/// Finds the dagger definition for an exact level.
#[must_use]
pub fn dagger_level(level: u32) -> Option<&'static DaggerLevel> {
    DAGGER_LEVELS.iter().find(|def| def.level == level)
}

/// Next dagger definition above the current level, if any remains.
#[must_use]
pub fn next_dagger_level(current: u32) -> Option<&'static DaggerLevel> {
    dagger_level(current + 1)
}

/// Finds the fast-sword definition for an exact level.
#[must_use]
pub fn fast_sword_level(level: u32) -> Option<&'static FastSwordLevel> {
    FAST_SWORD_LEVELS.iter().find(|def| def.level == level)
}

/// Next fast-sword definition above the current level.
///
/// A dormant weapon (level 0) advances to the first definition.
#[must_use]
pub fn next_fast_sword_level(current: u32) -> Option<&'static FastSwordLevel> {
    if current == 0 {
        return FAST_SWORD_LEVELS.first();
    }
    fast_sword_level(current + 1)
}

/// Finds the fire-wand definition for an exact level.
#[must_use]
pub fn fire_wand_level(level: u32) -> Option<&'static FireWandLevel> {
    FIRE_WAND_LEVELS.iter().find(|def| def.level == level)
}

/// Next fire-wand definition above the current level.
///
/// A dormant weapon (level 0) advances to the first definition.
#[must_use]
pub fn next_fire_wand_level(current: u32) -> Option<&'static FireWandLevel> {
    if current == 0 {
        return FIRE_WAND_LEVELS.first();
    }
    fire_wand_level(current + 1)
}
