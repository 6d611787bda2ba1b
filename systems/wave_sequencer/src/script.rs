//! The shipped nine-wave script.

use std::time::Duration;

use ember_arena_core::{
    ArenaPoint, ArenaSize, EnemyArchetype, EnemyGroupConfig, EnemyOverrides, SpawnLocation,
    BIT_ENEMY_EXP, BIT_ENEMY_TOUCH_DAMAGE, ENEMY_SPEED, ENEMY_TOUCH_DAMAGE, WaveConfig,
};

const WAVE_DELAY: Duration = Duration::from_secs(1);

fn group(
    count: u32,
    archetype: EnemyArchetype,
    overrides: EnemyOverrides,
    spawn: SpawnLocation,
) -> EnemyGroupConfig {
    EnemyGroupConfig {
        count,
        archetype,
        overrides,
        spawn,
    }
}

fn wave(name: &str, groups: Vec<EnemyGroupConfig>) -> WaveConfig {
    WaveConfig {
        name: Some(name.to_owned()),
        delay: WAVE_DELAY,
        groups,
        repeat: None,
    }
}

/// Builds the default wave script for the provided arena.
///
/// Point formations anchor on the arena centre so a resized arena keeps the
/// same shapes.
#[must_use]
pub fn default_waves(arena: ArenaSize) -> Vec<WaveConfig> {
    let center = arena.center();
    let cx = center.x();
    let cy = center.y();

    vec![
        wave(
            "Warmup",
            vec![
                group(
                    3,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(3),
                        exp: Some(1),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: None,
                    },
                ),
                group(
                    2,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(2),
                        exp: Some(2),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Random { padding: Some(96.0) },
                ),
            ],
        ),
        wave(
            "Encircle",
            vec![group(
                6,
                EnemyArchetype::Basic,
                EnemyOverrides {
                    hp: Some(4),
                    exp: Some(3),
                    ..EnemyOverrides::default()
                },
                SpawnLocation::Points {
                    points: vec![
                        ArenaPoint::new(cx - 220.0, cy),
                        ArenaPoint::new(cx + 220.0, cy),
                        ArenaPoint::new(cx, cy - 180.0),
                        ArenaPoint::new(cx, cy + 180.0),
                    ],
                    jitter: 36.0,
                },
            )],
        ),
        wave(
            "Rush",
            vec![group(
                8,
                EnemyArchetype::Basic,
                EnemyOverrides {
                    hp: Some(5),
                    speed: Some(ENEMY_SPEED * 1.1),
                    exp: Some(2),
                    ..EnemyOverrides::default()
                },
                SpawnLocation::Edge {
                    edge: None,
                    padding: None,
                },
            )],
        ),
        wave(
            "Siege",
            vec![
                group(
                    4,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(8),
                        touch_damage: Some(ENEMY_TOUCH_DAMAGE + 1),
                        exp: Some(8),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Points {
                        points: vec![
                            ArenaPoint::new(120.0, 120.0),
                            ArenaPoint::new(680.0, 120.0),
                            ArenaPoint::new(120.0, 520.0),
                            ArenaPoint::new(680.0, 520.0),
                        ],
                        jitter: 24.0,
                    },
                ),
                group(
                    10,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(4),
                        speed: Some(ENEMY_SPEED * 1.25),
                        exp: Some(2),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: Some(12.0),
                    },
                ),
                group(
                    3,
                    EnemyArchetype::Ranged,
                    EnemyOverrides {
                        hp: Some(6),
                        exp: Some(4),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Random {
                        padding: Some(150.0),
                    },
                ),
            ],
        ),
        wave(
            "Crossfire",
            vec![
                group(
                    8,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(5),
                        exp: Some(3),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: Some(32.0),
                    },
                ),
                group(
                    4,
                    EnemyArchetype::Ranged,
                    EnemyOverrides {
                        hp: Some(7),
                        exp: Some(5),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Points {
                        points: vec![
                            ArenaPoint::new(cx - 260.0, cy - 140.0),
                            ArenaPoint::new(cx + 260.0, cy + 140.0),
                            ArenaPoint::new(cx - 260.0, cy + 140.0),
                            ArenaPoint::new(cx + 260.0, cy - 140.0),
                        ],
                        jitter: 30.0,
                    },
                ),
            ],
        ),
        wave(
            "Swarm",
            vec![
                group(
                    14,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(3),
                        speed: Some(ENEMY_SPEED * 1.15),
                        exp: Some(2),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: Some(12.0),
                    },
                ),
                group(
                    6,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(6),
                        exp: Some(3),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Random {
                        padding: Some(110.0),
                    },
                ),
            ],
        ),
        wave(
            "Bulwark",
            vec![
                group(
                    6,
                    EnemyArchetype::Ranged,
                    EnemyOverrides {
                        hp: Some(12),
                        touch_damage: Some(ENEMY_TOUCH_DAMAGE + 1),
                        exp: Some(8),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Points {
                        points: vec![
                            ArenaPoint::new(cx - 200.0, cy - 120.0),
                            ArenaPoint::new(cx + 200.0, cy - 120.0),
                            ArenaPoint::new(cx - 200.0, cy + 120.0),
                            ArenaPoint::new(cx + 200.0, cy + 120.0),
                            ArenaPoint::new(cx, cy - 200.0),
                            ArenaPoint::new(cx, cy + 200.0),
                        ],
                        jitter: 20.0,
                    },
                ),
                group(
                    8,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(6),
                        speed: Some(ENEMY_SPEED * 1.3),
                        exp: Some(4),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: Some(20.0),
                    },
                ),
            ],
        ),
        wave(
            "Finale",
            vec![
                group(
                    12,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(7),
                        speed: Some(ENEMY_SPEED * 1.2),
                        exp: Some(4),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: Some(16.0),
                    },
                ),
                group(
                    6,
                    EnemyArchetype::Ranged,
                    EnemyOverrides {
                        hp: Some(14),
                        touch_damage: Some(ENEMY_TOUCH_DAMAGE + 2),
                        exp: Some(10),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Points {
                        points: vec![
                            ArenaPoint::new(cx - 240.0, cy),
                            ArenaPoint::new(cx + 240.0, cy),
                            ArenaPoint::new(cx, cy - 220.0),
                            ArenaPoint::new(cx, cy + 220.0),
                            ArenaPoint::new(cx - 160.0, cy - 160.0),
                            ArenaPoint::new(cx + 160.0, cy + 160.0),
                        ],
                        jitter: 24.0,
                    },
                ),
            ],
        ),
        wave(
            "Stampede",
            vec![
                group(
                    8,
                    EnemyArchetype::Bit,
                    EnemyOverrides {
                        hp: Some(10),
                        touch_damage: Some(BIT_ENEMY_TOUCH_DAMAGE),
                        exp: Some(BIT_ENEMY_EXP),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Edge {
                        edge: None,
                        padding: Some(32.0),
                    },
                ),
                group(
                    6,
                    EnemyArchetype::Basic,
                    EnemyOverrides {
                        hp: Some(6),
                        speed: Some(ENEMY_SPEED * 1.3),
                        exp: Some(3),
                        ..EnemyOverrides::default()
                    },
                    SpawnLocation::Random {
                        padding: Some(120.0),
                    },
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_spans_nine_named_waves() {
        let waves = default_waves(ArenaSize::default());
        assert_eq!(waves.len(), 9);
        assert_eq!(waves[0].display_name(0), "Warmup");
        assert_eq!(waves[8].display_name(8), "Stampede");
        assert!(waves.iter().all(|wave| wave.delay == WAVE_DELAY));
        assert!(waves.iter().all(|wave| !wave.groups.is_empty()));
    }

    #[test]
    fn point_formations_anchor_on_the_arena_center() {
        let waves = default_waves(ArenaSize::new(400.0, 400.0));
        let SpawnLocation::Points { points, .. } = &waves[1].groups[0].spawn else {
            panic!("Encircle should use a point formation");
        };
        assert_eq!(points[0], ArenaPoint::new(-20.0, 200.0));
        assert_eq!(points[2], ArenaPoint::new(200.0, 20.0));
    }
}
