//! Fixed-tick loop: script playback, pacing and restarts

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use quarry_core::session::CraftResult;
use quarry_core::{Session, SessionConfig, SessionStatus};

use crate::script::{Action, Script};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Total ticks across every session
    pub ticks: u64,
    /// Sleep between ticks to hold the tick period
    pub realtime: bool,
    pub max_restarts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub restarts: u32,
    pub pickups: usize,
    pub crafted: usize,
    pub final_status: SessionStatus,
    /// Final player health/food
    pub player: String,
}

fn play_actions(session: &mut Session, script: &Script, tick: u64) -> Result<usize> {
    let mut crafted = 0;
    for action in script.actions_at(tick) {
        match action {
            Action::Input(event) => session.push_input(event.clone()),
            Action::Craft(grid) => {
                match session.craft(grid).with_context(|| format!("Crafting at tick {}", tick))? {
                    CraftResult::Crafted { .. } => crafted += 1,
                    other => log::warn!("[CRAFT] Tick {}: {:?}", tick, other),
                }
            }
        }
    }
    Ok(crafted)
}

/// Run sessions until the tick budget is spent or the player dies with no
/// restarts left. The script restarts with every session; each restart
/// bumps the seed by one
pub fn run(base: &SessionConfig, script: &Script, options: &RunOptions) -> Result<RunSummary> {
    let period = Duration::from_millis(base.tick_ms);
    let mut session = Session::new(base.clone());
    let mut restarts = 0;
    let mut ticks = 0;
    let mut pickups = 0;
    let mut crafted = 0;

    while ticks < options.ticks {
        let started = Instant::now();

        let next = session.tick_count() + 1;
        crafted += play_actions(&mut session, script, next)?;

        let report = session
            .tick()
            .with_context(|| format!("Fatal interaction error at tick {}", next))?;
        ticks += 1;
        pickups += report.pickups.len();

        if report.status == SessionStatus::PlayerDied {
            if restarts >= options.max_restarts {
                log::info!("[SESSION] No restarts left after {} ticks", ticks);
                break;
            }
            restarts += 1;
            let config = SessionConfig {
                seed: base.seed.wrapping_add(restarts as u64),
                ..base.clone()
            };
            log::info!("[SESSION] Restart {} with seed {}", restarts, config.seed);
            session = Session::new(config);
            continue;
        }

        if options.realtime {
            if let Some(remaining) = period.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    let summary = RunSummary {
        ticks,
        restarts,
        pickups,
        crafted,
        final_status: session.status(),
        player: session.player().status_line(),
    };
    log::info!(
        "[SESSION] Finished: {} ticks, {} restarts, {} pickups, {} crafted, {}",
        summary.ticks,
        summary.restarts,
        summary.pickups,
        summary.crafted,
        summary.player
    );
    Ok(summary)
}
