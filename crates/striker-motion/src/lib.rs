//! `striker-motion` – the motion engine as seen from the control loop.
//!
//! The loop never drives joints itself; it enqueues commands on a
//! [`MotionInterface`][command::MotionInterface] and moves on.  Drivers
//! implement the trait, so the real engine and the simulation stub are
//! interchangeable.
//!
//! # Modules
//!
//! - [`command`] – [`BodyJointCommand`][command::BodyJointCommand] and the
//!   [`MotionInterface`][command::MotionInterface] trait.
//! - [`sim`] – [`SimMotion`][sim::SimMotion]: records enqueued commands for
//!   CI and headless runs.

pub mod command;
pub mod sim;

pub use command::{BodyJointCommand, Interpolation, JointChain, MotionInterface};
pub use sim::SimMotion;
