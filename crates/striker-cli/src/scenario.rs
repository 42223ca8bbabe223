//! Scripted vision source for headless runs.
//!
//! The robot stands on the center spot facing the yellow goal and sweeps
//! its head left and right.  A ball rolls back and forth in front of it.
//! Every detection is derived from the true geometry and the head angle of
//! the requested tick, so the same tick always yields the same frame.

use striker_perception::{BallDetection, Detection, VisionCorner, VisionFrame, geometry};
use striker_runtime::CycleInput;
use striker_types::{RobotPose, VisionId};

/// Where the simulated robot stands.
pub const START_POSE: RobotPose = RobotPose {
    x: geometry::FIELD_WHITE_LENGTH / 2.0,
    y: geometry::FIELD_WHITE_WIDTH / 2.0,
    heading: 0.0,
    uncert_x: 50.0,
    uncert_y: 50.0,
    uncert_h: 30.0,
};

/// Half the horizontal field of view of the camera (degrees).
const HALF_FOV_DEG: f32 = 23.0;
/// Maximum head pan either side (degrees).
const HEAD_PAN_DEG: f32 = 90.0;
/// Ticks for one full head sweep left-right-left.
const SWEEP_TICKS: u64 = 80;
/// Ticks for one ball oscillation.
const BALL_TICKS: u64 = 200;
/// Ticks between sub-role changes from the play caller.
const SUB_ROLE_TICKS: u64 = 250;

const FIELD_CORNERS: [(f32, f32); 4] = [
    (0.0, 0.0),
    (geometry::FIELD_WHITE_LENGTH, 0.0),
    (0.0, geometry::FIELD_WHITE_WIDTH),
    (geometry::FIELD_WHITE_LENGTH, geometry::FIELD_WHITE_WIDTH),
];

#[derive(Debug, Clone)]
pub struct ScriptedVision {
    pose: RobotPose,
}

impl Default for ScriptedVision {
    fn default() -> Self {
        Self { pose: START_POSE }
    }
}

impl ScriptedVision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head pan at `tick`, a triangle wave in `[-HEAD_PAN_DEG, HEAD_PAN_DEG]`.
    pub fn head_pan(&self, tick: u64) -> f32 {
        let phase = (tick % SWEEP_TICKS) as f32 / SWEEP_TICKS as f32;
        let tri = if phase < 0.5 { phase * 4.0 - 1.0 } else { 3.0 - phase * 4.0 };
        tri * HEAD_PAN_DEG
    }

    pub fn ball_position(&self, tick: u64) -> (f32, f32) {
        let phase = (tick % BALL_TICKS) as f32 / BALL_TICKS as f32;
        let swing = (phase * std::f32::consts::TAU).sin();
        (self.pose.x + 120.0, self.pose.y + 100.0 * swing)
    }

    /// The cycle input for `tick`.
    pub fn input(&self, tick: u64) -> CycleInput {
        let pan = self.head_pan(tick);
        let mut vision = VisionFrame::empty();

        for id in VisionId::ALL {
            let (distance, bearing) = self.range_bearing(geometry::landmark_position(id));
            if in_view(bearing, pan) {
                vision.set_detection(id, Detection::at(distance, bearing));
            }
        }

        let (distance, bearing) = self.range_bearing(self.ball_position(tick));
        if in_view(bearing, pan) {
            vision.ball = BallDetection::at(distance, bearing);
        }

        let corners: Vec<VisionCorner> = FIELD_CORNERS
            .iter()
            .filter_map(|&point| {
                let (distance, bearing) = self.range_bearing(point);
                in_view(bearing, pan).then(|| VisionCorner {
                    distance,
                    bearing,
                    x: distance * bearing.to_radians().cos(),
                    y: distance * bearing.to_radians().sin(),
                })
            })
            .collect();
        let num_corners = corners.len();

        CycleInput {
            vision: vision.with_corners(corners, num_corners),
            sub_role: ((tick / SUB_ROLE_TICKS) % 2) as i32,
            ..CycleInput::default()
        }
    }

    /// Range (cm) and body-relative bearing (degrees) to a field point.
    fn range_bearing(&self, (x, y): (f32, f32)) -> (f32, f32) {
        let dx = x - self.pose.x;
        let dy = y - self.pose.y;
        let bearing = dy.atan2(dx).to_degrees() - self.pose.heading;
        (dx.hypot(dy), wrap_degrees(bearing))
    }
}

fn in_view(bearing: f32, pan: f32) -> bool {
    wrap_degrees(bearing - pan).abs() <= HALF_FOV_DEG
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tick_same_frame() {
        let s = ScriptedVision::new();
        assert_eq!(s.input(37).vision, s.input(37).vision);
    }

    #[test]
    fn head_sweeps_full_range() {
        let s = ScriptedVision::new();
        assert!((s.head_pan(0) + HEAD_PAN_DEG).abs() < 1e-3);
        assert!((s.head_pan(SWEEP_TICKS / 2) - HEAD_PAN_DEG).abs() < 1e-3);
    }

    #[test]
    fn looking_ahead_sees_yellow_goal_only() {
        let s = ScriptedVision::new();
        // Center of the sweep: head straight ahead.
        let frame = s.input(SWEEP_TICKS / 4).vision;
        assert!(frame.detection(VisionId::YellowGoalLeftPost).is_seen());
        assert!(frame.detection(VisionId::YellowGoalRightPost).is_seen());
        assert!(!frame.detection(VisionId::BlueGoalLeftPost).is_seen());
        assert!(!frame.detection(VisionId::BlueGoalRightPost).is_seen());
    }

    #[test]
    fn post_distance_matches_geometry() {
        let s = ScriptedVision::new();
        let frame = s.input(SWEEP_TICKS / 4).vision;
        let d = frame.detection(VisionId::YellowGoalLeftPost).distance;
        // (600, 270) from (300, 200)
        assert!((d - 300.0f32.hypot(70.0)).abs() < 1e-3);
    }

    #[test]
    fn wrap_keeps_angles_in_half_open_range() {
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
    }

    #[test]
    fn sub_role_alternates() {
        let s = ScriptedVision::new();
        assert_eq!(s.input(0).sub_role, 0);
        assert_eq!(s.input(SUB_ROLE_TICKS).sub_role, 1);
    }
}
