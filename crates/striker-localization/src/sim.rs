//! In-process filter stand-in for CI and the headless driver.
//!
//! [`RecordingEstimator`] logs every call it receives, in order, and keeps
//! just enough state to return plausible estimates: odometry is integrated
//! directly, a ball sighting places the ball, and a missed ball only decays
//! the velocity confidence.  No filtering happens.
//!
//! # Example
//!
//! ```rust
//! use striker_localization::estimator::Estimator;
//! use striker_localization::sim::{EstimatorCall, RecordingEstimator};
//!
//! let mut est = RecordingEstimator::new();
//! est.ball_not_seen();
//! assert_eq!(est.calls(), &[EstimatorCall::BallNotSeen]);
//! ```

use striker_perception::Corner;
use striker_types::{BallEstimate, OdometryDelta, RobotPose};

use crate::estimator::{Estimator, LandmarkObservation};

/// Multiplier applied to ball-velocity confidence on every missed frame.
pub const BALL_VELOCITY_DECAY: f32 = 0.9;

/// One recorded call into the filter.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorCall {
    Odometry(OdometryDelta),
    Landmark(LandmarkObservation),
    /// Batch size of a corner correction.
    Corners(usize),
    Ball { distance: f32, bearing: f32 },
    BallNotSeen,
}

/// Records calls and returns the state it was seeded with.
#[derive(Debug, Clone)]
pub struct RecordingEstimator {
    calls: Vec<EstimatorCall>,
    pose: RobotPose,
    ball: BallEstimate,
    ball_velocity_confidence: f32,
}

impl Default for RecordingEstimator {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            pose: RobotPose::default(),
            ball: BallEstimate::default(),
            ball_velocity_confidence: 1.0,
        }
    }
}

impl RecordingEstimator {
    /// Full ball-velocity confidence, pose and ball at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pose(mut self, pose: RobotPose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_ball(mut self, ball: BallEstimate) -> Self {
        self.ball = ball;
        self
    }

    pub fn calls(&self) -> &[EstimatorCall] {
        &self.calls
    }

    /// Drain the log, e.g. between cycles.
    pub fn take_calls(&mut self) -> Vec<EstimatorCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn landmark_calls(&self) -> impl Iterator<Item = &LandmarkObservation> {
        self.calls.iter().filter_map(|c| match c {
            EstimatorCall::Landmark(obs) => Some(obs),
            _ => None,
        })
    }

    pub fn ball_velocity_confidence(&self) -> f32 {
        self.ball_velocity_confidence
    }
}

impl Estimator for RecordingEstimator {
    fn update_odometry(&mut self, delta: OdometryDelta) {
        self.calls.push(EstimatorCall::Odometry(delta));
        let h = self.pose.heading.to_radians();
        self.pose.x += delta.forward * h.cos() - delta.lateral * h.sin();
        self.pose.y += delta.forward * h.sin() + delta.lateral * h.cos();
        self.pose.heading += delta.rotation;
    }

    fn saw_landmark(&mut self, observation: &LandmarkObservation) {
        self.calls.push(EstimatorCall::Landmark(*observation));
    }

    fn saw_corners(&mut self, corners: &[Corner]) {
        self.calls.push(EstimatorCall::Corners(corners.len()));
    }

    fn saw_ball(&mut self, distance: f32, bearing: f32) {
        self.calls.push(EstimatorCall::Ball { distance, bearing });
        let angle = (self.pose.heading + bearing).to_radians();
        self.ball.x = self.pose.x + distance * angle.cos();
        self.ball.y = self.pose.y + distance * angle.sin();
        self.ball.distance = distance;
        self.ball_velocity_confidence = 1.0;
    }

    fn ball_not_seen(&mut self) {
        self.calls.push(EstimatorCall::BallNotSeen);
        self.ball_velocity_confidence *= BALL_VELOCITY_DECAY;
    }

    fn pose(&self) -> RobotPose {
        self.pose
    }

    fn ball(&self) -> BallEstimate {
        self.ball
    }
}
