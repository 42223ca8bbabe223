//! `striker-comm` – team communication.
//!
//! Carries this robot's per-cycle [`OutboundPacket`][striker_types::OutboundPacket]
//! to teammates and collects theirs.  The handle is built by the process
//! composition root and injected into the cycle orchestrator; there is no
//! global instance.
//!
//! # Modules
//!
//! - [`bus`] – [`TeamBus`]: broadcast channel of
//!   [`TeamBroadcast`][striker_types::TeamBroadcast] envelopes, with a
//!   non-blocking [`TeamSubscriber`].
//! - [`handle`] – [`TeamComm`] trait and its bus-backed implementation
//!   [`CommHandle`].

pub mod bus;
pub mod handle;

pub use bus::{TeamBus, TeamSubscriber};
pub use handle::{CommHandle, TeamComm};
