//! `striker-types` – shared vocabulary of the striker control loop.
//!
//! Team-color and landmark-role enums, the pose and ball estimates read back
//! from the localization filter, the 13-field team packet, and the single
//! error type every crate in the workspace returns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Team identity
// ────────────────────────────────────────────────────────────────────────────

/// Color assigned to our team for the match.  Also names the goal that
/// team defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Blue,
    Yellow,
}

impl TeamColor {
    /// The other team's color.
    pub fn opponent(self) -> Self {
        match self {
            TeamColor::Blue => TeamColor::Yellow,
            TeamColor::Yellow => TeamColor::Blue,
        }
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamColor::Blue => write!(f, "blue"),
            TeamColor::Yellow => write!(f, "yellow"),
        }
    }
}

impl FromStr for TeamColor {
    type Err = StrikerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(TeamColor::Blue),
            "yellow" => Ok(TeamColor::Yellow),
            other => Err(StrikerError::Config(format!(
                "unknown team color {other:?} (expected \"blue\" or \"yellow\")"
            ))),
        }
    }
}

/// Highest player number a robot may carry on the field.
pub const MAX_PLAYERS: u8 = 4;

/// Validated identity of this robot.  Only constructible through
/// [`RobotIdentity::new`], so a running cycle never sees an unset color or
/// an out-of-range player number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotIdentity {
    team_color: TeamColor,
    player_number: u8,
    team_number: u8,
}

impl RobotIdentity {
    /// # Errors
    ///
    /// Returns [`StrikerError::Config`] when `player_number` is outside
    /// `1..=MAX_PLAYERS`.
    pub fn new(team_color: TeamColor, player_number: u8, team_number: u8) -> Result<Self, StrikerError> {
        if !(1..=MAX_PLAYERS).contains(&player_number) {
            return Err(StrikerError::Config(format!(
                "player_number {player_number} out of range 1..={MAX_PLAYERS}"
            )));
        }
        Ok(Self {
            team_color,
            player_number,
            team_number,
        })
    }

    pub fn team_color(&self) -> TeamColor {
        self.team_color
    }

    pub fn player_number(&self) -> u8 {
        self.player_number
    }

    pub fn team_number(&self) -> u8 {
        self.team_number
    }

    /// Same robot, different color.  Used on an explicit color change.
    pub fn with_team_color(self, team_color: TeamColor) -> Self {
        Self { team_color, ..self }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Landmarks
// ────────────────────────────────────────────────────────────────────────────

/// Raw, color-specific identity of a landmark as reported by vision.
///
/// "Left" and "right" are the detector's global naming, not the robot's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisionId {
    YellowGoalLeftPost,
    YellowGoalRightPost,
    BlueGoalLeftPost,
    BlueGoalRightPost,
    YellowGoalBackstop,
    BlueGoalBackstop,
}

impl VisionId {
    /// The four goal posts, in the order corrections are fed to the filter.
    pub const GOAL_POSTS: [VisionId; 4] = [
        VisionId::YellowGoalLeftPost,
        VisionId::YellowGoalRightPost,
        VisionId::BlueGoalLeftPost,
        VisionId::BlueGoalRightPost,
    ];

    pub const BACKSTOPS: [VisionId; 2] = [VisionId::YellowGoalBackstop, VisionId::BlueGoalBackstop];

    pub const ALL: [VisionId; 6] = [
        VisionId::YellowGoalLeftPost,
        VisionId::YellowGoalRightPost,
        VisionId::BlueGoalLeftPost,
        VisionId::BlueGoalRightPost,
        VisionId::YellowGoalBackstop,
        VisionId::BlueGoalBackstop,
    ];

    /// Left post of the goal painted `goal`.
    pub fn left_post(goal: TeamColor) -> Self {
        match goal {
            TeamColor::Blue => VisionId::BlueGoalLeftPost,
            TeamColor::Yellow => VisionId::YellowGoalLeftPost,
        }
    }

    /// Right post of the goal painted `goal`.
    pub fn right_post(goal: TeamColor) -> Self {
        match goal {
            TeamColor::Blue => VisionId::BlueGoalRightPost,
            TeamColor::Yellow => VisionId::YellowGoalRightPost,
        }
    }

    /// Backstop behind the goal painted `goal`.
    pub fn backstop(goal: TeamColor) -> Self {
        match goal {
            TeamColor::Blue => VisionId::BlueGoalBackstop,
            TeamColor::Yellow => VisionId::YellowGoalBackstop,
        }
    }

    /// Dense index into per-landmark tables, matching [`VisionId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_goal_post(self) -> bool {
        self.index() < Self::GOAL_POSTS.len()
    }
}

/// Team-relative role of a goal post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LandmarkRole {
    MyGoalLeftPost,
    MyGoalRightPost,
    OppGoalLeftPost,
    OppGoalRightPost,
}

impl LandmarkRole {
    pub const ALL: [LandmarkRole; 4] = [
        LandmarkRole::MyGoalLeftPost,
        LandmarkRole::MyGoalRightPost,
        LandmarkRole::OppGoalLeftPost,
        LandmarkRole::OppGoalRightPost,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Team-relative role of a backstop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackstopRole {
    MyGoalBackstop,
    OppGoalBackstop,
}

// ────────────────────────────────────────────────────────────────────────────
// Estimates
// ────────────────────────────────────────────────────────────────────────────

/// Incremental robot motion since the previous cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OdometryDelta {
    pub forward: f32,
    pub lateral: f32,
    pub rotation: f32,
}

impl OdometryDelta {
    pub const ZERO: OdometryDelta = OdometryDelta {
        forward: 0.0,
        lateral: 0.0,
        rotation: 0.0,
    };
}

/// Robot pose estimate with per-axis uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RobotPose {
    pub x: f32,
    pub y: f32,
    /// Heading in degrees.
    pub heading: f32,
    pub uncert_x: f32,
    pub uncert_y: f32,
    pub uncert_h: f32,
}

/// Ball posterior as reported by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallEstimate {
    pub x: f32,
    pub y: f32,
    pub uncert_x: f32,
    pub uncert_y: f32,
    /// Estimated range from robot to ball.
    pub distance: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Team packet
// ────────────────────────────────────────────────────────────────────────────

/// State broadcast to teammates once per cycle.
///
/// The wire form is a flat sequence of [`OutboundPacket::FIELD_COUNT`]
/// scalars in declaration order; teammates decode by position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutboundPacket {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub uncert_x: f32,
    pub uncert_y: f32,
    pub uncert_h: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_uncert_x: f32,
    pub ball_uncert_y: f32,
    pub ball_distance: f32,
    pub sub_role: i32,
    pub chase_time: f32,
}

impl OutboundPacket {
    pub const FIELD_COUNT: usize = 13;

    /// Chase time is not computed yet; every packet carries this sentinel.
    pub const CHASE_TIME_UNSET: f32 = -1.0;

    /// Build a packet from the post-correction pose and ball estimates.
    pub fn new(pose: &RobotPose, ball: &BallEstimate, sub_role: i32) -> Self {
        Self {
            x: pose.x,
            y: pose.y,
            heading: pose.heading,
            uncert_x: pose.uncert_x,
            uncert_y: pose.uncert_y,
            uncert_h: pose.uncert_h,
            ball_x: ball.x,
            ball_y: ball.y,
            ball_uncert_x: ball.uncert_x,
            ball_uncert_y: ball.uncert_y,
            ball_distance: ball.distance,
            sub_role,
            chase_time: Self::CHASE_TIME_UNSET,
        }
    }

    /// Flatten into wire order.
    pub fn to_wire(&self) -> [f32; Self::FIELD_COUNT] {
        [
            self.x,
            self.y,
            self.heading,
            self.uncert_x,
            self.uncert_y,
            self.uncert_h,
            self.ball_x,
            self.ball_y,
            self.ball_uncert_x,
            self.ball_uncert_y,
            self.ball_distance,
            self.sub_role as f32,
            self.chase_time,
        ]
    }

    /// Decode a teammate's packet.
    ///
    /// # Errors
    ///
    /// Returns [`StrikerError::PacketLength`] unless `fields` holds exactly
    /// [`OutboundPacket::FIELD_COUNT`] values.
    pub fn from_wire(fields: &[f32]) -> Result<Self, StrikerError> {
        let f: &[f32; Self::FIELD_COUNT] =
            fields.try_into().map_err(|_| StrikerError::PacketLength {
                expected: Self::FIELD_COUNT,
                actual: fields.len(),
            })?;
        Ok(Self {
            x: f[0],
            y: f[1],
            heading: f[2],
            uncert_x: f[3],
            uncert_y: f[4],
            uncert_h: f[5],
            ball_x: f[6],
            ball_y: f[7],
            ball_uncert_x: f[8],
            ball_uncert_y: f[9],
            ball_distance: f[10],
            sub_role: f[11].round() as i32,
            chase_time: f[12],
        })
    }
}

/// Envelope carrying one [`OutboundPacket`] over the team bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBroadcast {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub team_number: u8,
    pub player_number: u8,
    pub packet: OutboundPacket,
}

impl TeamBroadcast {
    pub fn new(identity: &RobotIdentity, packet: OutboundPacket) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            team_number: identity.team_number(),
            player_number: identity.player_number(),
            packet,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Workspace-wide error type.
#[derive(Error, Debug)]
pub enum StrikerError {
    /// Missing or malformed startup configuration.  Fatal: no cycle may run.
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Landmark roles are not bound; assign a team color before feeding corrections")]
    RolesUnbound,

    #[error("Team Comm Error: {0}")]
    Comm(String),

    #[error("Packet Length Error: expected {expected} fields, got {actual}")]
    PacketLength { expected: usize, actual: usize },

    #[error("Motion Error: {0}")]
    Motion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_packet() -> OutboundPacket {
        let pose = RobotPose {
            x: 1.0,
            y: 2.0,
            heading: 3.0,
            uncert_x: 4.0,
            uncert_y: 5.0,
            uncert_h: 6.0,
        };
        let ball = BallEstimate {
            x: 7.0,
            y: 8.0,
            uncert_x: 9.0,
            uncert_y: 10.0,
            distance: 11.0,
        };
        OutboundPacket::new(&pose, &ball, 12)
    }

    #[test]
    fn team_color_parses_case_insensitively() {
        assert_eq!("Blue".parse::<TeamColor>().unwrap(), TeamColor::Blue);
        assert_eq!(" yellow ".parse::<TeamColor>().unwrap(), TeamColor::Yellow);
        assert!(matches!("red".parse::<TeamColor>(), Err(StrikerError::Config(_))));
    }

    #[test]
    fn opponent_color_is_the_other_one() {
        assert_eq!(TeamColor::Blue.opponent(), TeamColor::Yellow);
        assert_eq!(TeamColor::Yellow.opponent(), TeamColor::Blue);
    }

    #[test]
    fn identity_rejects_out_of_range_player() {
        assert!(RobotIdentity::new(TeamColor::Blue, 0, 1).is_err());
        assert!(RobotIdentity::new(TeamColor::Blue, MAX_PLAYERS + 1, 1).is_err());
        let id = RobotIdentity::new(TeamColor::Yellow, 3, 7).unwrap();
        assert_eq!(id.player_number(), 3);
        assert_eq!(id.team_number(), 7);
        assert_eq!(id.with_team_color(TeamColor::Blue).team_color(), TeamColor::Blue);
    }

    #[test]
    fn vision_ids_resolve_by_goal_color() {
        assert_eq!(VisionId::left_post(TeamColor::Blue), VisionId::BlueGoalLeftPost);
        assert_eq!(VisionId::right_post(TeamColor::Yellow), VisionId::YellowGoalRightPost);
        assert_eq!(VisionId::backstop(TeamColor::Yellow), VisionId::YellowGoalBackstop);
        for (i, id) in VisionId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert!(VisionId::BlueGoalRightPost.is_goal_post());
        assert!(!VisionId::BlueGoalBackstop.is_goal_post());
    }

    #[test]
    fn packet_wire_order_is_fixed() {
        let wire = sample_packet().to_wire();
        assert_eq!(wire.len(), OutboundPacket::FIELD_COUNT);
        assert_eq!(
            wire,
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, -1.0]
        );
    }

    #[test]
    fn new_packet_carries_unset_chase_time() {
        assert_eq!(sample_packet().chase_time, OutboundPacket::CHASE_TIME_UNSET);
    }

    #[test]
    fn from_wire_decodes_teammate_packet() {
        let packet = sample_packet();
        let decoded = OutboundPacket::from_wire(&packet.to_wire()).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn from_wire_rejects_wrong_length() {
        let err = OutboundPacket::from_wire(&[0.0; 12]).unwrap_err();
        assert!(matches!(
            err,
            StrikerError::PacketLength {
                expected: 13,
                actual: 12
            }
        ));
    }

    #[test]
    fn broadcast_envelope_serializes_packet() {
        let id = RobotIdentity::new(TeamColor::Blue, 2, 1).unwrap();
        let msg = TeamBroadcast::new(&id, sample_packet());
        let json = serde_json::to_string(&msg).unwrap();
        let back: TeamBroadcast = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.player_number, 2);
        assert_eq!(back.packet, msg.packet);
    }

    #[test]
    fn error_display() {
        let err = StrikerError::Config("team_color missing".to_string());
        assert!(err.to_string().contains("team_color missing"));
        assert!(StrikerError::RolesUnbound.to_string().contains("not bound"));
    }
}
