//! [`CorrespondenceFeeder`] – drives the filter with one cycle of
//! observations.
//!
//! # Order
//!
//! 1. **Predict** – odometry update.
//! 2. **Landmarks** – each role-bound goal post with `distance > 0`, in
//!    [`VisionId::GOAL_POSTS`][striker_types::VisionId::GOAL_POSTS] order.
//!    Unseen posts are skipped outright; they are never submitted as a
//!    zero-distance observation.
//! 3. **Corners** – the whole corner list as one batch, even when empty.
//! 4. **Ball** – a correction with the bearing negated if the ball was
//!    seen, otherwise an explicit not-seen signal.
//!
//! Later corrections are taken relative to the pose refined by earlier
//! ones, so the order is fixed.
//!
//! # Example
//!
//! ```rust
//! use striker_localization::feeder::CorrespondenceFeeder;
//! use striker_localization::sim::{EstimatorCall, RecordingEstimator};
//! use striker_perception::WorldModel;
//! use striker_types::{OdometryDelta, TeamColor};
//!
//! let mut world = WorldModel::new();
//! world.bind_team_color(TeamColor::Blue);
//!
//! let mut est = RecordingEstimator::new();
//! let report = CorrespondenceFeeder::default()
//!     .feed(&world, OdometryDelta::ZERO, &mut est)
//!     .unwrap();
//!
//! assert_eq!(report.landmarks, 0);
//! assert_eq!(est.calls().last(), Some(&EstimatorCall::BallNotSeen));
//! ```

use striker_perception::WorldModel;
use striker_types::{OdometryDelta, StrikerError};
use tracing::{debug, trace};

use crate::estimator::{Estimator, LandmarkObservation};

/// What was submitted for the ball this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallCorrection {
    /// Correction sent, with the bearing as submitted (already negated).
    Seen { distance: f32, bearing: f32 },
    NotSeen,
}

/// Summary of one feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedReport {
    /// Goal posts submitted.
    pub landmarks: usize,
    /// Goal posts skipped as unseen.
    pub skipped: usize,
    /// Size of the corner batch.
    pub corners: usize,
    pub ball: BallCorrection,
}

/// Submits a cycle's observations to an [`Estimator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrespondenceFeeder {
    /// When `false` the prediction step always receives
    /// [`OdometryDelta::ZERO`], whatever the caller measured.
    feed_odometry: bool,
}

impl CorrespondenceFeeder {
    pub fn new(feed_odometry: bool) -> Self {
        Self { feed_odometry }
    }

    /// Run one predict-then-correct pass.
    ///
    /// # Errors
    ///
    /// Returns [`StrikerError::RolesUnbound`] if `world` has no team color
    /// bound.  In that case the estimator is not called at all.
    pub fn feed<E: Estimator + ?Sized>(
        &self,
        world: &WorldModel,
        odometry: OdometryDelta,
        estimator: &mut E,
    ) -> Result<FeedReport, StrikerError> {
        let posts = world.role_bound_posts()?;

        // ── 1. Predict ────────────────────────────────────────────────────────
        let delta = if self.feed_odometry {
            odometry
        } else {
            OdometryDelta::ZERO
        };
        estimator.update_odometry(delta);

        // ── 2. Landmarks ──────────────────────────────────────────────────────
        let mut landmarks = 0;
        let mut skipped = 0;
        for (role, obj) in posts {
            if obj.is_seen() {
                let obs = LandmarkObservation::new(role, obj);
                trace!(
                    ?role,
                    id = ?obs.vision_id,
                    distance = obs.distance,
                    bearing = obs.bearing,
                    field_x = obs.field_x,
                    field_y = obs.field_y,
                    "landmark correction"
                );
                estimator.saw_landmark(&obs);
                landmarks += 1;
            } else {
                trace!(?role, id = ?obj.vision_id(), "skipping unseen landmark");
                skipped += 1;
            }
        }

        // ── 3. Corners ────────────────────────────────────────────────────────
        let corners = world.corners();
        estimator.saw_corners(corners);

        // ── 4. Ball ───────────────────────────────────────────────────────────
        let ball = world.ball();
        let ball = if ball.seen {
            let bearing = -ball.bearing;
            estimator.saw_ball(ball.distance, bearing);
            BallCorrection::Seen {
                distance: ball.distance,
                bearing,
            }
        } else {
            estimator.ball_not_seen();
            BallCorrection::NotSeen
        };

        let report = FeedReport {
            landmarks,
            skipped,
            corners: corners.len(),
            ball,
        };
        debug!(?report, "corrections fed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EstimatorCall, RecordingEstimator};
    use striker_perception::{BallDetection, Detection, VisionCorner, VisionFrame};
    use striker_types::{LandmarkRole, TeamColor, VisionId};

    fn bound_world(color: TeamColor, frame: &VisionFrame) -> WorldModel {
        let mut world = WorldModel::new();
        world.bind_team_color(color);
        world.refresh(frame);
        world
    }

    fn kind(call: &EstimatorCall) -> &'static str {
        match call {
            EstimatorCall::Odometry(_) => "odometry",
            EstimatorCall::Landmark(_) => "landmark",
            EstimatorCall::Corners(_) => "corners",
            EstimatorCall::Ball { .. } => "ball",
            EstimatorCall::BallNotSeen => "ball_not_seen",
        }
    }

    #[test]
    fn unbound_world_makes_no_calls() {
        let world = WorldModel::new();
        let mut est = RecordingEstimator::new();
        let err = CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap_err();
        assert!(matches!(err, StrikerError::RolesUnbound));
        assert!(est.calls().is_empty());
    }

    #[test]
    fn unseen_landmarks_are_never_submitted() {
        let frame = VisionFrame::empty()
            .with_landmark(VisionId::YellowGoalRightPost, Detection::at(300.0, 8.0))
            .with_landmark(VisionId::BlueGoalLeftPost, Detection::at(-1.0, 8.0));
        let world = bound_world(TeamColor::Blue, &frame);
        let mut est = RecordingEstimator::new();
        let report = CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();

        assert_eq!(report.landmarks, 1);
        assert_eq!(report.skipped, 3);
        let ids: Vec<VisionId> = est.landmark_calls().map(|o| o.vision_id).collect();
        assert_eq!(ids, vec![VisionId::YellowGoalRightPost]);
        assert!(est.landmark_calls().all(|o| o.distance > 0.0));
    }

    #[test]
    fn seen_ball_is_corrected_once_with_negated_bearing() {
        let frame = VisionFrame::empty().with_ball(BallDetection::at(90.0, 15.0));
        let world = bound_world(TeamColor::Yellow, &frame);
        let mut est = RecordingEstimator::new();
        let report = CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();

        let ball_calls: Vec<&EstimatorCall> = est
            .calls()
            .iter()
            .filter(|c| matches!(c, EstimatorCall::Ball { .. } | EstimatorCall::BallNotSeen))
            .collect();
        assert_eq!(
            ball_calls,
            vec![&EstimatorCall::Ball {
                distance: 90.0,
                bearing: -15.0
            }]
        );
        assert_eq!(
            report.ball,
            BallCorrection::Seen {
                distance: 90.0,
                bearing: -15.0
            }
        );
    }

    #[test]
    fn unseen_ball_signals_not_seen_exactly_once() {
        let world = bound_world(TeamColor::Blue, &VisionFrame::empty());
        let mut est = RecordingEstimator::new();
        CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();

        let not_seen = est
            .calls()
            .iter()
            .filter(|c| **c == EstimatorCall::BallNotSeen)
            .count();
        let corrections = est
            .calls()
            .iter()
            .filter(|c| matches!(c, EstimatorCall::Ball { .. }))
            .count();
        assert_eq!(not_seen, 1);
        assert_eq!(corrections, 0);
    }

    #[test]
    fn corner_batch_is_sent_even_when_empty() {
        let world = bound_world(TeamColor::Blue, &VisionFrame::empty());
        let mut est = RecordingEstimator::new();
        CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();
        assert!(est.calls().contains(&EstimatorCall::Corners(0)));
    }

    #[test]
    fn corner_batch_size_is_capped_by_capacity() {
        let frame = VisionFrame::empty().with_corners(vec![VisionCorner::default(); 2], 5);
        let world = bound_world(TeamColor::Blue, &frame);
        let mut est = RecordingEstimator::new();
        let report = CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();
        assert_eq!(report.corners, 2);
        assert!(est.calls().contains(&EstimatorCall::Corners(2)));
    }

    #[test]
    fn calls_follow_predict_landmarks_corners_ball() {
        let frame = VisionFrame::empty()
            .with_landmark(VisionId::YellowGoalLeftPost, Detection::at(400.0, -20.0))
            .with_landmark(VisionId::BlueGoalRightPost, Detection::at(150.0, 30.0))
            .with_corners(vec![VisionCorner::default(); 3], 3)
            .with_ball(BallDetection::at(60.0, 5.0));
        let world = bound_world(TeamColor::Blue, &frame);
        let mut est = RecordingEstimator::new();
        CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();

        let kinds: Vec<&str> = est.calls().iter().map(kind).collect();
        assert_eq!(kinds, vec!["odometry", "landmark", "landmark", "corners", "ball"]);
        let roles: Vec<LandmarkRole> = est.landmark_calls().map(|o| o.role).collect();
        assert_eq!(
            roles,
            vec![LandmarkRole::OppGoalRightPost, LandmarkRole::MyGoalLeftPost]
        );
    }

    #[test]
    fn odometry_is_zeroed_unless_enabled() {
        let world = bound_world(TeamColor::Blue, &VisionFrame::empty());
        let moved = OdometryDelta {
            forward: 5.0,
            lateral: 0.0,
            rotation: 2.0,
        };

        let mut est = RecordingEstimator::new();
        CorrespondenceFeeder::new(false).feed(&world, moved, &mut est).unwrap();
        assert_eq!(est.calls()[0], EstimatorCall::Odometry(OdometryDelta::ZERO));

        let mut est = RecordingEstimator::new();
        CorrespondenceFeeder::new(true).feed(&world, moved, &mut est).unwrap();
        assert_eq!(est.calls()[0], EstimatorCall::Odometry(moved));
    }

    #[test]
    fn lines_are_never_fed() {
        let frame = VisionFrame::empty().with_lines(vec![Default::default(); 4], 4);
        let world = bound_world(TeamColor::Blue, &frame);
        assert_eq!(world.lines().len(), 4);
        let mut est = RecordingEstimator::new();
        CorrespondenceFeeder::default()
            .feed(&world, OdometryDelta::ZERO, &mut est)
            .unwrap();
        assert_eq!(est.calls().len(), 3);
    }
}
