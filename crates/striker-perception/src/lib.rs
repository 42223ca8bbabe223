//! `striker-perception` – what the robot currently sees.
//!
//! Turns the vision system's raw, color-specific detections into the
//! team-relative landmark records the localization filter is fed with.
//!
//! # Modules
//!
//! - [`detection`] – [`VisionFrame`][detection::VisionFrame]: one cycle of
//!   raw detections (goal posts, backstops, ball, corners, lines).
//! - [`geometry`] – known field positions of every fixed landmark.
//! - [`landmarks`] – [`LandmarkMapper`][landmarks::LandmarkMapper]: binds
//!   raw goal posts and backstops to own-goal / opponent-goal roles for a
//!   given [`TeamColor`][striker_types::TeamColor].
//! - [`world`] – [`WorldModel`][world::WorldModel]: the tracked
//!   [`FieldObject`][world::FieldObject]s, [`Ball`][world::Ball], and the
//!   per-cycle corner and line lists, refreshed once per cycle.

pub mod detection;
pub mod geometry;
pub mod landmarks;
pub mod world;

pub use detection::{BallDetection, Detection, FieldLines, VisionCorner, VisionFrame, VisionLine};
pub use landmarks::{LandmarkBindings, LandmarkMapper};
pub use world::{Ball, Corner, FieldObject, Line, WorldModel};
