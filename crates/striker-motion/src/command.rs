//! Joint-space motion commands.

use serde::{Deserialize, Serialize};
use striker_types::StrikerError;

/// Kinematic chain a [`BodyJointCommand`] drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointChain {
    Head,
    LeftArm,
    LeftLeg,
    RightLeg,
    RightArm,
}

impl JointChain {
    /// Number of joint angles a command for this chain must carry.
    pub fn joint_count(self) -> usize {
        match self {
            JointChain::Head => 2,
            JointChain::LeftArm | JointChain::RightArm => 4,
            JointChain::LeftLeg | JointChain::RightLeg => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Linear,
    Smooth,
}

/// Move one chain to target angles over `duration` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyJointCommand {
    duration: f32,
    chain: JointChain,
    angles: Vec<f32>,
    interpolation: Interpolation,
}

impl BodyJointCommand {
    /// # Errors
    ///
    /// Returns [`StrikerError::Motion`] when `duration` is not positive or
    /// the angle count does not match the chain.
    pub fn new(
        duration: f32,
        chain: JointChain,
        angles: Vec<f32>,
        interpolation: Interpolation,
    ) -> Result<Self, StrikerError> {
        if duration.is_nan() || duration <= 0.0 {
            return Err(StrikerError::Motion(format!(
                "command duration must be positive, got {duration}"
            )));
        }
        if angles.len() != chain.joint_count() {
            return Err(StrikerError::Motion(format!(
                "{chain:?} takes {} angles, got {}",
                chain.joint_count(),
                angles.len()
            )));
        }
        Ok(Self {
            duration,
            chain,
            angles,
            interpolation,
        })
    }

    /// Zero all joints of `chain` over `duration` seconds.
    pub fn zero(duration: f32, chain: JointChain) -> Result<Self, StrikerError> {
        Self::new(duration, chain, vec![0.0; chain.joint_count()], Interpolation::Linear)
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn chain(&self) -> JointChain {
        self.chain
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }
}

/// Anything that accepts motion commands.
pub trait MotionInterface {
    /// Queue `command` behind whatever is already running.
    ///
    /// # Errors
    ///
    /// Returns [`StrikerError::Motion`] if the engine refuses the command.
    fn enqueue(&mut self, command: BodyJointCommand) -> Result<(), StrikerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_command_matches_chain() {
        let cmd = BodyJointCommand::zero(3.0, JointChain::LeftArm).unwrap();
        assert_eq!(cmd.angles(), &[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(cmd.interpolation(), Interpolation::Linear);
        assert!((cmd.duration() - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn wrong_angle_count_is_rejected() {
        let err = BodyJointCommand::new(1.0, JointChain::Head, vec![0.0; 4], Interpolation::Smooth)
            .unwrap_err();
        assert!(err.to_string().contains("Head"));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        assert!(BodyJointCommand::zero(0.0, JointChain::RightLeg).is_err());
        assert!(BodyJointCommand::zero(f32::NAN, JointChain::RightLeg).is_err());
    }
}
