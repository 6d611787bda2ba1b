#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that drives a scripted Ember Arena run.
//!
//! The binary stands in for the host engine: it owns the tick loop, applies
//! commands to the world, feeds the resulting events to the systems, and
//! plays a simple scripted hunter that slays enemies and picks random
//! upgrades whenever a level-up menu opens.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ember_arena_core::{dagger_level, Command, Event};
use ember_arena_system_upgrades::{Config as UpgradesConfig, LoadoutView, Upgrades};
use ember_arena_system_wave_sequencer::{default_waves, Config as SequencerConfig, WaveSequencer};
use ember_arena_world::{self as world, query, World};

#[derive(Debug, Parser)]
#[command(name = "ember-arena", about = "Scripted headless Ember Arena run")]
struct Args {
    /// Seed shared by wave placement, option shuffling, and the scripted player.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Maximum number of simulation ticks before the run is abandoned.
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    dt_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.dt_ms == 0 {
        bail!("--dt-ms must be greater than zero");
    }

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let dt = Duration::from_millis(args.dt_ms);
    let mut world = World::new();
    println!("{}", query::welcome_banner(&world));

    let arena = query::arena(&world);
    let mut sequencer =
        WaveSequencer::new(SequencerConfig::new(arena, args.seed, default_waves(arena)));
    let mut upgrades = Upgrades::new(UpgradesConfig::new(args.seed));
    let mut player_rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut carried = Vec::new();
    world::apply(&mut world, Command::StartRun, &mut carried);
    sequencer.start();
    tracing::info!(seed = args.seed, "run started");

    let mut last_wave_name = sequencer.current_wave_name().to_owned();
    let mut enemies_slain = 0_u64;

    for tick in 0..args.ticks {
        let mut events = carried;
        world::apply(&mut world, Command::Tick { dt }, &mut events);

        loop {
            let window = query::gameplay_window_open(&world);
            let live = query::live_enemy_count(&world);
            let phase = query::game_phase(&world);
            let level_up = query::level_up_state(&world);
            let loadout = query::weapon_loadout(&world);

            let mut commands = Vec::new();
            sequencer.handle(&events, window, live, &mut commands);
            upgrades.handle(
                &events,
                phase,
                level_up.pending(),
                level_up.active(),
                LoadoutView {
                    dagger: loadout.dagger_level,
                    fast_sword: loadout.fast_sword_level,
                    fire_wand: loadout.fire_wand_level,
                },
                &mut commands,
            );

            log_events(&events, &mut enemies_slain);
            events.clear();
            if commands.is_empty() {
                break;
            }
            for command in commands {
                world::apply(&mut world, command, &mut events);
            }
        }

        if sequencer.current_wave_name() != last_wave_name {
            last_wave_name = sequencer.current_wave_name().to_owned();
            tracing::info!(tick, wave = %last_wave_name, phase = ?sequencer.phase(), "wave changed");
        }

        carried = scripted_player(&mut world, &mut player_rng);

        if sequencer.phase() == ember_arena_core::WavePhase::Done {
            break;
        }
    }

    let stats = query::player_stats(&world);
    tracing::info!(
        waves = %sequencer.current_wave_name(),
        level = stats.level(),
        total_exp = stats.total_exp(),
        enemies_slain,
        "run finished"
    );

    if sequencer.phase() != ember_arena_core::WavePhase::Done {
        bail!("run ended before the script cleared: {:?}", sequencer.phase());
    }
    Ok(())
}

/// One decision step of the scripted hunter.
///
/// When a level-up menu is open it picks a random option; otherwise it
/// swings the installed dagger at one random live enemy, standing in for the
/// host engine's collision handling.
fn scripted_player(world: &mut World, rng: &mut ChaCha8Rng) -> Vec<Event> {
    let mut events = Vec::new();

    if let Some(options) = query::offered_upgrades(world) {
        let option = rng.gen_range(0..options.len());
        world::apply(world, Command::ChooseUpgrade { option }, &mut events);
        return events;
    }

    if !query::gameplay_window_open(world) {
        return events;
    }

    let enemies = query::enemy_view(world).into_vec();
    if enemies.is_empty() {
        return events;
    }

    let damage = dagger_level(query::weapon_loadout(world).dagger_level)
        .map_or(1, |def| def.damage);
    let target = enemies[rng.gen_range(0..enemies.len())];
    world::apply(
        world,
        Command::SetPlayerPosition {
            position: target.position,
        },
        &mut events,
    );
    world::apply(
        world,
        Command::HitEnemy {
            enemy: target.id,
            damage,
        },
        &mut events,
    );
    events
}

fn log_events(events: &[Event], enemies_slain: &mut u64) {
    for event in events {
        match event {
            Event::GamePhaseChanged { phase, previous } => {
                tracing::info!(?previous, ?phase, "game phase changed");
            }
            Event::LevelGained { level } => {
                tracing::info!(level, "level up queued");
            }
            Event::UpgradeSessionOpened { options } => {
                tracing::info!(options = options.len(), "upgrade menu opened");
            }
            Event::UpgradeApplied { option } => {
                tracing::info!(name = %option.name, "upgrade applied");
            }
            Event::EnemyDied { .. } => {
                *enemies_slain += 1;
            }
            Event::ShardCollected { value, .. } => {
                tracing::debug!(value, "shard collected");
            }
            _ => {}
        }
    }
}
