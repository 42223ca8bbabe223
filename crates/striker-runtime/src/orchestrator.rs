//! [`CycleOrchestrator`] – one control tick, start to finish.
//!
//! ```text
//!  VisionFrame ──► refresh ──► feed ──► capture ──► packet ──► TeamComm
//!                  (world)    (filter)  (pose,ball)
//! ```
//!
//! The first call binds landmark roles from the configured team color and
//! moves the orchestrator from [`CycleState::Idle`] to
//! [`CycleState::Running`].  Every call then runs the four stages to
//! completion or fails before touching the estimator; there is no partially
//! executed cycle.  A packet the team link refuses does not undo the cycle:
//! the failure is logged and flagged in the [`CycleReport`].  Cycles the
//! driver skips simply never happen here.

use std::time::Instant;

use striker_comm::TeamComm;
use striker_localization::{
    CorrespondenceFeeder, Estimator, FeedReport,
    snapshot::{assemble_packet, capture},
};
use striker_motion::{BodyJointCommand, JointChain, MotionInterface};
use striker_perception::{LandmarkBindings, VisionFrame, WorldModel};
use striker_types::{OdometryDelta, OutboundPacket, RobotIdentity, RobotPose, StrikerError, TeamColor};
use tracing::{debug, debug_span, info, warn};

use crate::delayed_action::DelayedAction;
use crate::profiler::{CycleProfiler, Stage};

/// Seconds the startup arm motion takes.
const STARTUP_MOTION_SECS: f32 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration and per-cycle I/O
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CycleOrchestratorConfig {
    pub identity: RobotIdentity,
    /// Forward measured odometry to the filter instead of a zero delta.
    pub feed_odometry: bool,
    /// Enqueue the startup arm motion after this many cycles.
    pub startup_motion_delay: Option<u32>,
    /// Profile this many cycles from the first one.
    pub profile_frames: Option<u32>,
}

impl CycleOrchestratorConfig {
    pub fn new(identity: RobotIdentity) -> Self {
        Self {
            identity,
            feed_odometry: false,
            startup_motion_delay: None,
            profile_frames: None,
        }
    }
}

/// Everything the outside world hands in for one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleInput {
    pub vision: VisionFrame,
    pub odometry: OdometryDelta,
    /// Passed through unchanged into the packet.
    pub sub_role: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// 1-based number of this cycle.
    pub cycle: u64,
    pub feed: FeedReport,
    pub packet: OutboundPacket,
    /// The team link accepted the packet.
    pub broadcast: bool,
    /// The startup motion was enqueued during this cycle.
    pub motion_enqueued: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Running,
}

// ─────────────────────────────────────────────────────────────────────────────
// CycleOrchestrator
// ─────────────────────────────────────────────────────────────────────────────

pub struct CycleOrchestrator<E, C, M> {
    identity: RobotIdentity,
    state: CycleState,
    world: WorldModel,
    pose: RobotPose,
    feeder: CorrespondenceFeeder,
    estimator: E,
    comm: C,
    motion: M,
    startup_motion: Option<DelayedAction<BodyJointCommand>>,
    profiler: CycleProfiler,
    last_packet: Option<OutboundPacket>,
    cycles: u64,
}

impl<E, C, M> CycleOrchestrator<E, C, M>
where
    E: Estimator,
    C: TeamComm,
    M: MotionInterface,
{
    /// # Errors
    ///
    /// Returns [`StrikerError::Motion`] if the startup motion cannot be
    /// built.
    pub fn new(
        config: CycleOrchestratorConfig,
        estimator: E,
        comm: C,
        motion: M,
    ) -> Result<Self, StrikerError> {
        let startup_motion = match config.startup_motion_delay {
            Some(delay) => Some(DelayedAction::new(
                delay,
                BodyJointCommand::zero(STARTUP_MOTION_SECS, JointChain::LeftArm)?,
            )),
            None => None,
        };
        let mut profiler = CycleProfiler::new();
        if let Some(frames) = config.profile_frames {
            profiler.profile_frames(Some(frames));
            // Close the empty frame before the first cycle so profiling
            // covers cycle one.
            profiler.next_frame();
        }

        Ok(Self {
            identity: config.identity,
            state: CycleState::Idle,
            world: WorldModel::new(),
            pose: RobotPose::default(),
            feeder: CorrespondenceFeeder::new(config.feed_odometry),
            estimator,
            comm,
            motion,
            startup_motion,
            profiler,
            last_packet: None,
            cycles: 0,
        })
    }

    /// Run one full cycle.
    ///
    /// # Errors
    ///
    /// Propagates [`StrikerError::RolesUnbound`] from the feed, which fails
    /// before the estimator is called.  A refused packet or a rejected
    /// startup motion is only logged.
    pub fn run_cycle(&mut self, input: &CycleInput) -> Result<CycleReport, StrikerError> {
        if self.state == CycleState::Idle {
            self.world.bind_team_color(self.identity.team_color());
            self.state = CycleState::Running;
            info!(
                team_color = %self.identity.team_color(),
                player = self.identity.player_number(),
                "cycle orchestrator running"
            );
        }

        let n = self.cycles + 1;
        let _span = debug_span!("cycle", n).entered();
        let cycle_start = Instant::now();

        // ── Refresh ──────────────────────────────────────────────────────────
        let t = Instant::now();
        self.world.refresh(&input.vision);
        self.profiler.record(Stage::Refresh, t.elapsed());

        // ── Correct ──────────────────────────────────────────────────────────
        let t = Instant::now();
        let feed = self
            .feeder
            .feed(&self.world, input.odometry, &mut self.estimator)?;
        self.profiler.record(Stage::Correct, t.elapsed());

        // ── Snapshot ─────────────────────────────────────────────────────────
        let t = Instant::now();
        capture(&self.estimator, &mut self.pose, self.world.ball_mut());
        self.profiler.record(Stage::Snapshot, t.elapsed());

        // ── Broadcast ────────────────────────────────────────────────────────
        let t = Instant::now();
        let packet = assemble_packet(&self.pose, self.world.ball(), input.sub_role);
        let broadcast = match self.comm.set_data(packet) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "team packet not sent");
                false
            }
        };
        self.last_packet = Some(packet);
        self.profiler.record(Stage::Broadcast, t.elapsed());

        self.cycles = n;
        let motion_enqueued = self.advance_startup_motion();

        self.profiler.record(Stage::Cycle, cycle_start.elapsed());
        self.profiler.next_frame();

        debug!(
            landmarks = feed.landmarks,
            skipped = feed.skipped,
            corners = feed.corners,
            x = packet.x,
            y = packet.y,
            heading = packet.heading,
            "cycle complete"
        );

        Ok(CycleReport {
            cycle: n,
            feed,
            packet,
            broadcast,
            motion_enqueued,
        })
    }

    fn advance_startup_motion(&mut self) -> bool {
        let Some(command) = self.startup_motion.as_mut().and_then(DelayedAction::advance) else {
            return false;
        };
        match self.motion.enqueue(command) {
            Ok(()) => {
                info!("startup motion enqueued");
                true
            }
            Err(e) => {
                warn!(error = %e, "startup motion rejected");
                false
            }
        }
    }

    /// Change team color mid-match and rebind every landmark role.
    pub fn set_team_color(&mut self, team_color: TeamColor) -> LandmarkBindings {
        self.identity = self.identity.with_team_color(team_color);
        info!(%team_color, "team color changed");
        self.world.bind_team_color(team_color)
    }

    /// Arm the profiler; see [`CycleProfiler::profile_frames`].
    pub fn profile_frames(&mut self, frames: Option<u32>) {
        self.profiler.profile_frames(frames);
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn identity(&self) -> &RobotIdentity {
        &self.identity
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    pub fn pose(&self) -> &RobotPose {
        &self.pose
    }

    pub fn last_packet(&self) -> Option<&OutboundPacket> {
        self.last_packet.as_ref()
    }

    /// Completed cycles.
    pub fn cycles_run(&self) -> u64 {
        self.cycles
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn estimator_mut(&mut self) -> &mut E {
        &mut self.estimator
    }

    pub fn comm(&self) -> &C {
        &self.comm
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn profiler(&self) -> &CycleProfiler {
        &self.profiler
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
