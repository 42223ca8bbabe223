//! `striker-localization` – feeding the pose/ball filter.
//!
//! The filter itself lives outside this workspace; it is reached through
//! the [`Estimator`][estimator::Estimator] trait.  This crate decides what
//! the filter is told each cycle, in which order, and reads the result back.
//!
//! # Modules
//!
//! - [`estimator`] – [`Estimator`][estimator::Estimator]: the synchronous
//!   predict / correct / read interface of the filter.
//! - [`feeder`] – [`CorrespondenceFeeder`][feeder::CorrespondenceFeeder]:
//!   odometry, then seen landmarks, then the corner batch, then the ball.
//! - [`snapshot`] – copies the posterior into the world model and builds the
//!   [`OutboundPacket`][striker_types::OutboundPacket].
//! - [`sim`] – [`RecordingEstimator`][sim::RecordingEstimator]: an in-process
//!   stand-in that records every call, for tests and the headless driver.

pub mod estimator;
pub mod feeder;
pub mod sim;
pub mod snapshot;

pub use estimator::{Estimator, LandmarkObservation};
pub use feeder::{BallCorrection, CorrespondenceFeeder, FeedReport};
pub use sim::{EstimatorCall, RecordingEstimator};
