//! `striker-runtime` – the per-cycle control loop.
//!
//! Sequences perception, localization and team communication once per
//! fixed time step.  The loop owns all mutable state; collaborators are
//! injected at construction.
//!
//! # Modules
//!
//! - [`orchestrator`] – [`CycleOrchestrator`][orchestrator::CycleOrchestrator]:
//!   binds landmark roles on the first call, then runs refresh, correction
//!   feed, snapshot and broadcast in that order on every call.  A skipped
//!   call leaves every piece of state as the previous cycle left it.
//! - [`delayed_action`] – [`DelayedAction`][delayed_action::DelayedAction]:
//!   a one-shot action that fires after a fixed number of cycles.
//! - [`profiler`] – [`CycleProfiler`][profiler::CycleProfiler]: per-stage
//!   timing over a window of cycles, logged as a summary when it closes.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]:
//!   initialises the global `tracing` subscriber with an optional OTLP span
//!   exporter.

pub mod delayed_action;
pub mod orchestrator;
pub mod profiler;
pub mod telemetry;

pub use delayed_action::{DelayedAction, DelayedActionState};
pub use orchestrator::{
    CycleInput, CycleOrchestrator, CycleOrchestratorConfig, CycleReport, CycleState,
};
pub use profiler::{CycleProfiler, Stage, StageSummary};
pub use telemetry::{TelemetryConfig, TracerProviderGuard, init_tracing};
