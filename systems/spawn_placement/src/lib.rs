#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawn position resolution for scripted enemy groups.
//!
//! Every placement descriptor resolves into concrete arena positions through
//! a seed stream derived from the run seed plus the wave and group indices,
//! so replaying a run reproduces every spawn exactly and no group perturbs
//! another group's draws.

use ember_arena_core::{ArenaPoint, ArenaSize, Edge, SpawnLocation};
use sha2::{Digest, Sha256};

const RNG_STREAM_PLACEMENT: &str = "placement";

/// Resolves one enemy group's placement descriptor into spawn positions.
///
/// Returns exactly `count` positions; a zero count yields an empty set.
#[must_use]
pub fn resolve_group(
    arena: ArenaSize,
    seed: u64,
    wave_index: u32,
    group_index: u32,
    count: u32,
    spawn: &SpawnLocation,
) -> Vec<ArenaPoint> {
    if count == 0 {
        return Vec::new();
    }

    let base_seed = derive_group_seed(seed, wave_index, group_index);
    let mut rng = SplitMix64::new(derive_labeled_seed(base_seed, RNG_STREAM_PLACEMENT));

    match spawn {
        SpawnLocation::Random { .. } => {
            let padding = spawn.padding();
            (0..count)
                .map(|_| {
                    let x = sample_in_range(&mut rng, padding, arena.width() - padding);
                    let y = sample_in_range(&mut rng, padding, arena.height() - padding);
                    ArenaPoint::new(x, y)
                })
                .collect()
        }
        SpawnLocation::Edge { edge, .. } => {
            let padding = spawn.padding();
            (0..count)
                .map(|index| {
                    let ratio = if count <= 1 {
                        0.5
                    } else {
                        index as f32 / (count - 1) as f32
                    };
                    let side = edge.unwrap_or_else(|| sample_edge(&mut rng));
                    place_on_edge(arena, side, padding, ratio)
                })
                .collect()
        }
        SpawnLocation::Points { points, jitter } => {
            if points.is_empty() {
                return vec![arena.center(); count as usize];
            }

            (0..count)
                .map(|index| {
                    let point = points[index as usize % points.len()];
                    let x = point.x() + sample_in_range(&mut rng, -jitter, *jitter);
                    let y = point.y() + sample_in_range(&mut rng, -jitter, *jitter);
                    ArenaPoint::new(
                        x.clamp(0.0, arena.width()),
                        y.clamp(0.0, arena.height()),
                    )
                })
                .collect()
        }
    }
}

fn place_on_edge(arena: ArenaSize, edge: Edge, padding: f32, ratio: f32) -> ArenaPoint {
    let across_width = padding + ratio * (arena.width() - padding * 2.0);
    let across_height = padding + ratio * (arena.height() - padding * 2.0);
    match edge {
        Edge::Top => ArenaPoint::new(across_width, padding),
        Edge::Bottom => ArenaPoint::new(across_width, arena.height() - padding),
        Edge::Left => ArenaPoint::new(padding, across_height),
        Edge::Right => ArenaPoint::new(arena.width() - padding, across_height),
    }
}

fn sample_edge(rng: &mut SplitMix64) -> Edge {
    let index = (rng.next_u64() % Edge::ALL.len() as u64) as usize;
    Edge::ALL[index]
}

fn sample_in_range(rng: &mut SplitMix64, min: f32, max: f32) -> f32 {
    if min >= max {
        return (min + max) / 2.0;
    }
    min + (rng.next_unit() as f32) * (max - min)
}

fn derive_group_seed(seed: u64, wave_index: u32, group_index: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(wave_index.to_le_bytes());
    hasher.update(group_index.to_le_bytes());
    finalize_seed(hasher)
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}

#[derive(Debug)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        let seed = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / ((1u64 << 53) as f64);
        let value = self.next_u64() >> 11;
        (value as f64) * SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_arena_core::DEFAULT_SPAWN_PADDING;

    fn arena() -> ArenaSize {
        ArenaSize::default()
    }

    #[test]
    fn resolution_is_deterministic_per_group() {
        let spawn = SpawnLocation::Random { padding: None };
        let first = resolve_group(arena(), 77, 3, 1, 6, &spawn);
        let second = resolve_group(arena(), 77, 3, 1, 6, &spawn);
        assert_eq!(first, second);
    }

    #[test]
    fn sibling_groups_draw_from_independent_streams() {
        let spawn = SpawnLocation::Random { padding: None };
        let first = resolve_group(arena(), 77, 3, 0, 6, &spawn);
        let second = resolve_group(arena(), 77, 3, 1, 6, &spawn);
        assert_ne!(first, second);
    }

    #[test]
    fn random_positions_respect_padded_bounds() {
        let spawn = SpawnLocation::Random { padding: None };
        for point in resolve_group(arena(), 5, 0, 0, 64, &spawn) {
            assert!(point.x() >= DEFAULT_SPAWN_PADDING);
            assert!(point.x() <= arena().width() - DEFAULT_SPAWN_PADDING);
            assert!(point.y() >= DEFAULT_SPAWN_PADDING);
            assert!(point.y() <= arena().height() - DEFAULT_SPAWN_PADDING);
        }
    }

    #[test]
    fn fixed_edge_positions_spread_evenly() {
        let spawn = SpawnLocation::Edge {
            edge: Some(Edge::Top),
            padding: Some(48.0),
        };
        let points = resolve_group(arena(), 1, 0, 0, 5, &spawn);
        let span = arena().width() - 96.0;
        let expected: Vec<f32> = [0.0, 0.25, 0.5, 0.75, 1.0]
            .iter()
            .map(|ratio| 48.0 + ratio * span)
            .collect();
        assert_eq!(points.len(), 5);
        for (point, expected_x) in points.iter().zip(expected) {
            assert!((point.x() - expected_x).abs() < 1e-3);
            assert!((point.y() - 48.0).abs() < 1e-3);
        }
    }

    #[test]
    fn single_edge_spawn_sits_at_the_midpoint() {
        let spawn = SpawnLocation::Edge {
            edge: Some(Edge::Left),
            padding: None,
        };
        let points = resolve_group(arena(), 1, 0, 0, 1, &spawn);
        assert_eq!(points.len(), 1);
        assert!((points[0].x() - DEFAULT_SPAWN_PADDING).abs() < 1e-3);
        assert!((points[0].y() - arena().height() / 2.0).abs() < 1e-3);
    }

    #[test]
    fn random_edges_land_on_a_padded_edge_line() {
        let spawn = SpawnLocation::Edge {
            edge: None,
            padding: None,
        };
        let width = arena().width();
        let height = arena().height();
        for point in resolve_group(arena(), 23, 2, 0, 32, &spawn) {
            let on_horizontal = (point.y() - DEFAULT_SPAWN_PADDING).abs() < 1e-3
                || (point.y() - (height - DEFAULT_SPAWN_PADDING)).abs() < 1e-3;
            let on_vertical = (point.x() - DEFAULT_SPAWN_PADDING).abs() < 1e-3
                || (point.x() - (width - DEFAULT_SPAWN_PADDING)).abs() < 1e-3;
            assert!(on_horizontal || on_vertical, "point off edge: {point:?}");
        }
    }

    #[test]
    fn point_lists_cycle_when_count_exceeds_them() {
        let anchors = vec![ArenaPoint::new(100.0, 100.0), ArenaPoint::new(700.0, 500.0)];
        let spawn = SpawnLocation::Points {
            points: anchors.clone(),
            jitter: 0.0,
        };
        let points = resolve_group(arena(), 9, 1, 0, 5, &spawn);
        assert_eq!(points.len(), 5);
        for (index, point) in points.iter().enumerate() {
            assert_eq!(*point, anchors[index % anchors.len()]);
        }
    }

    #[test]
    fn jittered_points_stay_inside_the_arena() {
        let spawn = SpawnLocation::Points {
            points: vec![ArenaPoint::new(2.0, 2.0)],
            jitter: 50.0,
        };
        for point in resolve_group(arena(), 41, 0, 0, 16, &spawn) {
            assert!(point.x() >= 0.0 && point.x() <= arena().width());
            assert!(point.y() >= 0.0 && point.y() <= arena().height());
        }
    }

    #[test]
    fn empty_point_lists_substitute_the_arena_center() {
        let spawn = SpawnLocation::Points {
            points: Vec::new(),
            jitter: 12.0,
        };
        let points = resolve_group(arena(), 3, 0, 0, 3, &spawn);
        assert_eq!(points, vec![arena().center(); 3]);
    }

    #[test]
    fn zero_count_resolves_to_nothing() {
        let spawn = SpawnLocation::Random { padding: None };
        assert!(resolve_group(arena(), 3, 0, 0, 0, &spawn).is_empty());
    }
}
