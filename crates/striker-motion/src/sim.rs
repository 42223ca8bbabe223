//! Simulated motion engine for CI and headless runs.
//!
//! # Example
//!
//! ```rust
//! use striker_motion::{BodyJointCommand, JointChain, MotionInterface, SimMotion};
//!
//! let mut motion = SimMotion::new();
//! motion
//!     .enqueue(BodyJointCommand::zero(1.0, JointChain::Head).unwrap())
//!     .unwrap();
//! assert_eq!(motion.queued().len(), 1);
//! ```

use striker_types::StrikerError;
use tracing::info;

use crate::command::{BodyJointCommand, MotionInterface};

/// Records every enqueued command.  Always succeeds.
#[derive(Debug, Default)]
pub struct SimMotion {
    queue: Vec<BodyJointCommand>,
}

impl SimMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queued(&self) -> &[BodyJointCommand] {
        &self.queue
    }
}

impl MotionInterface for SimMotion {
    fn enqueue(&mut self, command: BodyJointCommand) -> Result<(), StrikerError> {
        info!(chain = ?command.chain(), duration = command.duration(), "sim motion enqueued");
        self.queue.push(command);
        Ok(())
    }
}
