#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scripted wave sequencing driven by the gameplay clock.
//!
//! The sequencer owns the wave lifecycle as an explicit step machine polled
//! once per tick. Each wave previews its spawn positions, counts down its
//! delay, commits the spawn, then waits for the arena to clear before moving
//! on. Every timer and every check only advances while the gameplay window is
//! open, so pauses and level-up menus freeze the sequence in place.

use std::time::Duration;

use ember_arena_core::{ArenaPoint, ArenaSize, Command, Event, GamePhase, WaveConfig, WavePhase};
use ember_arena_system_spawn_placement::resolve_group;

mod script;

pub use script::default_waves;

/// Configuration parameters required to construct the sequencer.
#[derive(Clone, Debug)]
pub struct Config {
    arena: ArenaSize,
    seed: u64,
    waves: Vec<WaveConfig>,
}

impl Config {
    /// Creates a new configuration from the run seed and wave script.
    #[must_use]
    pub const fn new(arena: ArenaSize, seed: u64, waves: Vec<WaveConfig>) -> Self {
        Self { arena, seed, waves }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Step {
    Idle,
    Launching { wave: usize },
    Countdown { wave: usize, remaining: Duration },
    AwaitingSpawns { wave: usize },
    Clearing { wave: usize },
    Finished,
    Stopped,
}

/// Cached preview positions for the wave currently counting down.
#[derive(Clone, Debug)]
struct Preview {
    wave_index: usize,
    groups: Vec<Vec<ArenaPoint>>,
}

/// Pure system that walks the wave script and emits spawn commands.
#[derive(Debug)]
pub struct WaveSequencer {
    arena: ArenaSize,
    seed: u64,
    waves: Vec<WaveConfig>,
    running: bool,
    step: Step,
    current_name: String,
    preview: Option<Preview>,
}

impl WaveSequencer {
    /// Creates a new sequencer using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let current_name = idle_name(&config.waves);
        Self {
            arena: config.arena,
            seed: config.seed,
            waves: config.waves,
            running: false,
            step: Step::Idle,
            current_name,
            preview: None,
        }
    }

    /// Launches the wave sequence; a second launch while running is ignored.
    ///
    /// The first wave's preview waits for the gameplay window, so nothing
    /// shows while the run is still on the start screen or behind a menu.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;

        if self.waves.is_empty() {
            self.step = Step::Finished;
            self.current_name = "No waves configured".to_owned();
            return;
        }
        self.step = Step::Launching { wave: 0 };
    }

    /// Aborts the sequence from any state, discarding any preview markers.
    pub fn stop(&mut self, out: &mut Vec<Command>) {
        if self.step == Step::Stopped {
            return;
        }
        self.halt(out);
    }

    /// Restores the sequencer to its pre-run shape.
    pub fn reset(&mut self) {
        self.running = false;
        self.step = Step::Idle;
        self.current_name = idle_name(&self.waves);
        self.preview = None;
    }

    /// Consumes events and immutable views to advance the wave lifecycle.
    pub fn handle(
        &mut self,
        events: &[Event],
        window_open: bool,
        live_enemies: u32,
        out: &mut Vec<Command>,
    ) {
        if !self.running {
            return;
        }

        if events.iter().any(|event| {
            matches!(
                event,
                Event::GamePhaseChanged {
                    phase: GamePhase::GameOver,
                    ..
                }
            )
        }) {
            self.halt(out);
            return;
        }

        let mut elapsed = Duration::ZERO;
        let mut saw_spawn = false;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::EnemySpawned { .. } => saw_spawn = true,
                _ => {}
            }
        }

        match self.step {
            Step::Idle | Step::Finished | Step::Stopped => {}
            Step::Launching { wave } => {
                if !window_open {
                    return;
                }
                self.begin_wave(wave, out);
                if let Step::Countdown { wave, remaining } = self.step {
                    if remaining.is_zero() {
                        self.spawn_wave(wave, out);
                    }
                }
            }
            Step::Countdown { wave, remaining } => {
                if !window_open {
                    return;
                }
                let remaining = remaining.saturating_sub(elapsed);
                if remaining.is_zero() {
                    self.spawn_wave(wave, out);
                } else {
                    self.step = Step::Countdown { wave, remaining };
                }
            }
            Step::AwaitingSpawns { wave } => {
                if saw_spawn {
                    self.step = Step::Clearing { wave };
                    if window_open && live_enemies == 0 {
                        self.advance_past(wave, out);
                    }
                }
            }
            Step::Clearing { wave } => {
                if window_open && live_enemies == 0 {
                    self.advance_past(wave, out);
                }
            }
        }
    }

    /// Lifecycle phase the sequence currently occupies.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        match self.step {
            Step::Idle | Step::Launching { .. } | Step::Countdown { .. } => WavePhase::Waiting,
            Step::AwaitingSpawns { .. } => WavePhase::Spawning,
            Step::Clearing { .. } => WavePhase::Clearing,
            Step::Finished => WavePhase::Done,
            Step::Stopped => WavePhase::Stopped,
        }
    }

    /// Display name of the current wave, or a summary label outside waves.
    #[must_use]
    pub fn current_wave_name(&self) -> &str {
        &self.current_name
    }

    /// Gameplay time left before the next wave spawns, while counting down.
    #[must_use]
    pub fn countdown_remaining(&self) -> Option<Duration> {
        match self.step {
            Step::Countdown { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Reports whether the sequence was launched and not yet aborted.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn begin_wave(&mut self, index: usize, out: &mut Vec<Command>) {
        let wave = &self.waves[index];
        self.current_name = wave.display_name(index);

        let groups: Vec<Vec<ArenaPoint>> = wave
            .groups
            .iter()
            .enumerate()
            .map(|(group_index, group)| {
                resolve_group(
                    self.arena,
                    self.seed,
                    index as u32,
                    group_index as u32,
                    group.count,
                    &group.spawn,
                )
            })
            .collect();
        let markers: Vec<ArenaPoint> = groups.iter().flatten().copied().collect();
        self.preview = Some(Preview {
            wave_index: index,
            groups,
        });
        out.push(Command::PublishSpawnPreview { markers });

        self.step = Step::Countdown {
            wave: index,
            remaining: wave.delay,
        };
    }

    fn spawn_wave(&mut self, index: usize, out: &mut Vec<Command>) {
        let cached = self
            .preview
            .take()
            .filter(|preview| preview.wave_index == index);

        let wave = &self.waves[index];
        let mut total = 0_usize;
        for (group_index, group) in wave.groups.iter().enumerate() {
            let positions = match cached
                .as_ref()
                .and_then(|preview| preview.groups.get(group_index))
            {
                Some(positions) => positions.clone(),
                None => resolve_group(
                    self.arena,
                    self.seed,
                    index as u32,
                    group_index as u32,
                    group.count,
                    &group.spawn,
                ),
            };
            if positions.is_empty() {
                continue;
            }
            total += positions.len();
            out.push(Command::SpawnEnemyGroup {
                archetype: group.archetype,
                overrides: group.overrides,
                positions,
            });
        }
        out.push(Command::ClearSpawnPreview);

        if total == 0 {
            self.advance_past(index, out);
        } else {
            self.step = Step::AwaitingSpawns { wave: index };
        }
    }

    fn advance_past(&mut self, index: usize, out: &mut Vec<Command>) {
        let next = index + 1;
        if next >= self.waves.len() {
            self.step = Step::Finished;
            self.current_name = "All Clear".to_owned();
        } else {
            self.begin_wave(next, out);
        }
    }

    fn halt(&mut self, out: &mut Vec<Command>) {
        self.running = false;
        self.step = Step::Stopped;
        self.preview = None;
        out.push(Command::ClearSpawnPreview);
    }
}

fn idle_name(waves: &[WaveConfig]) -> String {
    match waves.first() {
        Some(wave) => wave.display_name(0),
        None => "No waves".to_owned(),
    }
}
