//! Interface of the external pose/ball filter.
//!
//! Implementations own the robot pose and ball state; callers only submit
//! observations and read estimates.  Every method is synchronous and must
//! have taken effect by the time it returns.

use striker_perception::{Corner, FieldObject};
use striker_types::{BallEstimate, LandmarkRole, OdometryDelta, RobotPose, VisionId};

/// A seen goal post, as submitted for correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkObservation {
    pub role: LandmarkRole,
    pub vision_id: VisionId,
    pub distance: f32,
    pub bearing: f32,
    /// Known global position of the post.
    pub field_x: f32,
    pub field_y: f32,
}

impl LandmarkObservation {
    pub fn new(role: LandmarkRole, obj: &FieldObject) -> Self {
        Self {
            role,
            vision_id: obj.vision_id(),
            distance: obj.distance,
            bearing: obj.bearing,
            field_x: obj.x(),
            field_y: obj.y(),
        }
    }
}

/// The pose/ball filter.
///
/// Rejecting an implausible observation is the implementation's business;
/// callers never retry.
pub trait Estimator {
    /// Prediction step from the robot's own motion.  Ball motion is
    /// predicted internally.
    fn update_odometry(&mut self, delta: OdometryDelta);

    /// Correct against one seen goal post.
    fn saw_landmark(&mut self, observation: &LandmarkObservation);

    /// Correct against every corner seen this cycle, as one batch.
    fn saw_corners(&mut self, corners: &[Corner]);

    /// Correct the ball estimate.  `bearing` is in the filter's
    /// convention, which is the negated vision bearing.
    fn saw_ball(&mut self, distance: f32, bearing: f32);

    /// The ball was not seen.  Lets ball-velocity confidence decay; must
    /// not reset the ball position.
    fn ball_not_seen(&mut self);

    fn pose(&self) -> RobotPose;

    fn ball(&self) -> BallEstimate;
}
