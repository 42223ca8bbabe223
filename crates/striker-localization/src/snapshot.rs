//! Reading the posterior back out of the filter.
//!
//! [`capture`] runs strictly after the correction feed of the same cycle.
//! It only reads from the estimator.

use striker_perception::Ball;
use striker_types::{OutboundPacket, RobotPose};
use tracing::trace;

use crate::estimator::Estimator;

/// Copy the filter's pose and ball posterior into the externally visible
/// records.
pub fn capture<E: Estimator + ?Sized>(estimator: &E, pose: &mut RobotPose, ball: &mut Ball) {
    *pose = estimator.pose();
    ball.update_estimate(estimator.ball());
    trace!(
        x = pose.x,
        y = pose.y,
        h = pose.heading,
        ball_x = ball.estimate.x,
        ball_y = ball.estimate.y,
        "posterior captured"
    );
}

/// Build the team packet from the captured records.
pub fn assemble_packet(pose: &RobotPose, ball: &Ball, sub_role: i32) -> OutboundPacket {
    OutboundPacket::new(pose, &ball.estimate, sub_role)
}
