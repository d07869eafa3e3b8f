//! Headless barrage: builds a level, drops a probe on a random platform and
//! replays a scripted mix of melee chips, rockets and a high-yield blast.
//!
//! Usage: `rubble-sim [level-index] [config.json]`

use glam::Vec2;
use rubble_engine::{ArenaConfig, Impact, LevelLibrary};
use rubble_sim::ArenaRunner;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;

/// (frame, impact) pairs fired by the script.
fn barrage(tuning_nuke: f32) -> Vec<(u32, Impact)> {
    vec![
        (10, Impact::carve(Vec2::new(-8.0, -0.8), 0.4)),
        (20, Impact::carve(Vec2::new(-7.2, -0.8), 0.4)),
        (45, Impact::damage(Vec2::new(0.0, 2.0), 2.0, 120.0)),
        (60, Impact::damage(Vec2::new(0.5, 2.2), 2.0, 120.0)),
        (90, Impact::carve(Vec2::new(4.0, 4.5), 0.9)),
        (120, Impact::damage(Vec2::new(0.0, -4.5), 3.0, tuning_nuke)),
        (150, Impact::carve(Vec2::new(9.0, -1.0), 1.2)),
        (180, Impact::damage(Vec2::new(-4.0, 4.4), 1.5, 300.0)),
    ]
}

fn load_config(path: Option<String>) -> ArenaConfig {
    let Some(path) = path else {
        return ArenaConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match ArenaConfig::from_json(&json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}: invalid config ({}), using defaults", path, err);
                ArenaConfig::default()
            }
        },
        Err(err) => {
            log::warn!("{}: {}, using defaults", path, err);
            ArenaConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let level = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(0);
    let config = load_config(args.next());
    let nuke = config.tuning.nuke_damage;

    let mut runner = ArenaRunner::new(config, LevelLibrary::builtin());
    let Some(level) = runner.load_level(level) else {
        log::error!("no levels available");
        return;
    };

    let landing = runner.random_platform_top();
    let probe = runner.spawn_probe(landing, 0.3);
    log::info!("level {}: probe dropped at {:?}", level, landing);

    let script = barrage(nuke);
    let mut next = 0;
    for frame in 0..FRAMES {
        while next < script.len() && script[next].0 == frame {
            runner.push_impact(script[next].1);
            next += 1;
        }

        runner.tick(FRAME_DT);

        let report = runner.frame_report();
        if report.hit > 0 {
            log::info!(
                "frame {:>3}: hit {} destroyed {} remnants {} -> {} platforms alive",
                frame,
                report.hit,
                report.destroyed,
                report.remnants,
                runner.arena().alive_count()
            );
        }
    }

    let (probe_pos, _) = runner.physics().body_position(&probe);
    log::info!(
        "done after {} steps: {} platforms, {} bodies, probe at {:?}",
        runner.steps(),
        runner.arena().alive_count(),
        runner.physics().body_count(),
        probe_pos
    );
}
