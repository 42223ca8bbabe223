//! `striker-cli` – headless driver for the striker control loop.
//!
//! This binary is the composition root.  It:
//!
//! 1. Loads `striker.toml` (or the file named on the command line or in
//!    `STRIKER_CONFIG`).  A missing or malformed robot identity aborts here.
//! 2. Initialises tracing, optionally exporting spans over OTLP.
//! 3. Wires the team bus, the simulated filter and motion engine, and the
//!    scripted vision source into a
//!    [`CycleOrchestrator`][striker_runtime::CycleOrchestrator].
//! 4. Runs one cycle per fixed time step.  Ticks missed because a cycle
//!    overran are skipped outright and counted.
//! 5. Stops cleanly on **Ctrl-C** or after `cycle.max_cycles`.

mod config;
mod scenario;

use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use striker_comm::{CommHandle, TeamBus};
use striker_localization::RecordingEstimator;
use striker_motion::SimMotion;
use striker_runtime::{CycleOrchestrator, CycleReport, init_tracing};
use striker_types::RobotIdentity;

use crate::scenario::ScriptedVision;

fn main() -> ExitCode {
    // ── Configuration ─────────────────────────────────────────────────────
    let path = config::resolve_path(
        std::env::args().nth(1),
        std::env::var("STRIKER_CONFIG").ok(),
    );
    let cfg = match config::load(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}: {e}", "Config error".red().bold());
            return ExitCode::FAILURE;
        }
    };
    let identity = match cfg.identity() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{}: {e}", "Config error".red().bold());
            eprintln!("  Set [robot] in {} or the STRIKER_* variables.", path.display());
            return ExitCode::FAILURE;
        }
    };

    // ── Structured logging ────────────────────────────────────────────────
    let _guard = init_tracing(&cfg.telemetry("striker"));

    print_banner(&identity);

    // ── Shared shutdown flag ──────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping after this cycle …".yellow().bold());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; stop with max_cycles instead");
    }

    // ── Composition ───────────────────────────────────────────────────────
    let bus = TeamBus::default();
    let comm = CommHandle::new(identity, bus);
    let mut teammates = comm.subscribe();
    let vision = ScriptedVision::new();
    let estimator = RecordingEstimator::new().with_pose(scenario::START_POSE);

    let mut orchestrator = match CycleOrchestrator::new(
        cfg.orchestrator_config(identity),
        estimator,
        comm,
        SimMotion::new(),
    ) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}: {e}", "Startup error".red().bold());
            return ExitCode::FAILURE;
        }
    };

    // ── Fixed time-step loop ──────────────────────────────────────────────
    let step = cfg.time_step();
    let echo_every = (1000 / cfg.cycle.time_step_ms.max(1)).max(1);
    let max_cycles = cfg.cycle.max_cycles;
    info!(
        step_ms = step.as_millis() as u64,
        max_cycles, "control loop starting"
    );

    let mut tick: u64 = 0;
    let mut skipped: u64 = 0;
    let mut failed: u64 = 0;
    let mut unsent: u64 = 0;
    let mut next_tick = Instant::now();

    while !shutdown.load(Ordering::SeqCst) {
        if max_cycles > 0 && orchestrator.cycles_run() >= max_cycles {
            break;
        }

        match orchestrator.run_cycle(&vision.input(tick)) {
            Ok(report) => {
                if !report.broadcast {
                    unsent += 1;
                }
                if report.cycle % echo_every == 1 || echo_every == 1 {
                    echo_packet(&report);
                }
            }
            Err(e) => {
                failed += 1;
                warn!(tick, error = %e, "cycle aborted");
            }
        }
        // The recording filter keeps every call; nothing here reads them.
        orchestrator.estimator_mut().take_calls();

        for msg in teammates.drain() {
            debug!(
                player = msg.player_number,
                x = msg.packet.x,
                y = msg.packet.y,
                "teammate packet"
            );
        }

        let missed = wait_for_next_tick(&mut next_tick, step);
        if missed > 0 {
            debug!(tick, missed, "cycle overran; skipping ticks");
        }
        skipped += missed;
        tick += 1 + missed;
    }

    info!(
        cycles = orchestrator.cycles_run(),
        skipped, failed, unsent, "control loop stopped"
    );
    println!();
    println!(
        "  {} {} cycles, {} skipped, {} failed",
        "Done:".bold(),
        orchestrator.cycles_run().to_string().green(),
        skipped.to_string().yellow(),
        failed.to_string().red()
    );
    ExitCode::SUCCESS
}

/// Sleep until the next tick boundary.  Returns how many whole ticks were
/// missed because the last cycle ran past them.
fn wait_for_next_tick(next_tick: &mut Instant, step: Duration) -> u64 {
    *next_tick += step;
    let now = Instant::now();
    if now < *next_tick {
        std::thread::sleep(*next_tick - now);
        return 0;
    }
    let behind = (now - *next_tick).as_nanos() / step.as_nanos().max(1);
    let missed = u32::try_from(behind).unwrap_or(u32::MAX);
    *next_tick += step * missed;
    u64::from(missed)
}

fn echo_packet(report: &CycleReport) {
    let p = &report.packet;
    println!(
        "  {} pose ({:>7.1}, {:>7.1}, {:>6.1}°)  ball ({:>7.1}, {:>7.1}) d={:>6.1}  role {}  lm {}/{}",
        format!("#{:<6}", report.cycle).dimmed(),
        p.x,
        p.y,
        p.heading,
        p.ball_x,
        p.ball_y,
        p.ball_distance,
        p.sub_role.to_string().cyan(),
        report.feed.landmarks.to_string().green(),
        (report.feed.landmarks + report.feed.skipped).to_string().dimmed(),
    );
}

fn print_banner(identity: &RobotIdentity) {
    println!();
    println!("  {} {}", "Striker".bold().cyan(), format!("v{}", env!("CARGO_PKG_VERSION")).dimmed());
    println!(
        "  Team {} ({}), player {}",
        identity.team_number().to_string().bold(),
        identity.team_color().to_string().bold(),
        identity.player_number().to_string().bold()
    );
    println!();
}
