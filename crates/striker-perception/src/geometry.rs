//! Field dimensions and the global position of every fixed landmark.
//!
//! Origin at the back-left corner of the white field lines, x along the
//! long axis towards the yellow goal, y across.  All values in centimetres.

use striker_types::VisionId;

pub const FIELD_WHITE_LENGTH: f32 = 600.0;
pub const FIELD_WHITE_WIDTH: f32 = 400.0;
pub const GOAL_WIDTH: f32 = 140.0;
pub const GOAL_BACKSTOP_DEPTH: f32 = 40.0;

const CENTER_Y: f32 = FIELD_WHITE_WIDTH / 2.0;
const HALF_GOAL: f32 = GOAL_WIDTH / 2.0;

/// Global `(x, y)` of the landmark.
///
/// Post sidedness is as seen by a robot facing into that goal.
pub fn landmark_position(id: VisionId) -> (f32, f32) {
    match id {
        VisionId::BlueGoalLeftPost => (0.0, CENTER_Y - HALF_GOAL),
        VisionId::BlueGoalRightPost => (0.0, CENTER_Y + HALF_GOAL),
        VisionId::YellowGoalLeftPost => (FIELD_WHITE_LENGTH, CENTER_Y + HALF_GOAL),
        VisionId::YellowGoalRightPost => (FIELD_WHITE_LENGTH, CENTER_Y - HALF_GOAL),
        VisionId::BlueGoalBackstop => (-GOAL_BACKSTOP_DEPTH, CENTER_Y),
        VisionId::YellowGoalBackstop => (FIELD_WHITE_LENGTH + GOAL_BACKSTOP_DEPTH, CENTER_Y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_are_one_goal_width_apart() {
        let (_, l) = landmark_position(VisionId::BlueGoalLeftPost);
        let (_, r) = landmark_position(VisionId::BlueGoalRightPost);
        assert!(((r - l).abs() - GOAL_WIDTH).abs() < 1e-4);
    }

    #[test]
    fn backstops_sit_behind_their_goals() {
        let (bx, _) = landmark_position(VisionId::BlueGoalBackstop);
        let (yx, _) = landmark_position(VisionId::YellowGoalBackstop);
        assert!(bx < 0.0);
        assert!(yx > FIELD_WHITE_LENGTH);
    }
}
